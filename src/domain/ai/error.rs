use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum AiServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("AI limit reached")]
    LimitReached,
    #[error("project not found")]
    ProjectNotFound,
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("assistant error: {0}")]
    Assistant(String),
    #[error("malformed assistant answer: {0}")]
    MalformedAnswer(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AiServiceError> for AppError {
    fn from(err: AiServiceError) -> Self {
        match err {
            AiServiceError::Invalid(msg) => AppError::BadRequest(msg),
            AiServiceError::LimitReached => AppError::Forbidden("AI limit reached".to_string()),
            AiServiceError::ProjectNotFound => AppError::NotFound("Project not found".to_string()),
            AiServiceError::Forbidden(msg) => AppError::Forbidden(msg),
            AiServiceError::Assistant(msg) => AppError::ExternalService(msg),
            AiServiceError::MalformedAnswer(msg) => {
                AppError::Internal(format!("Could not parse AI response: {}", msg))
            }
            AiServiceError::Dependency(msg) => AppError::Internal(msg),
            AiServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
