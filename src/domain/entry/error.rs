use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum EntryServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("entry not found")]
    NotFound,
    #[error("project not found")]
    ProjectNotFound,
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<EntryServiceError> for AppError {
    fn from(err: EntryServiceError) -> Self {
        match err {
            EntryServiceError::Invalid(msg) => AppError::BadRequest(msg),
            EntryServiceError::NotFound => AppError::NotFound("Entry not found".to_string()),
            EntryServiceError::ProjectNotFound => {
                AppError::NotFound("Project not found".to_string())
            }
            EntryServiceError::Forbidden(msg) => AppError::Forbidden(msg),
            EntryServiceError::Dependency(msg) => AppError::Internal(msg),
            EntryServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
