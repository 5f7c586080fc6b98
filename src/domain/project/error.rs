use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ProjectServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("project not found")]
    NotFound,
    #[error("project belongs to another user")]
    Forbidden,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for ProjectServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => ProjectServiceError::Invalid(msg),
            AppError::NotFound(_) => ProjectServiceError::NotFound,
            AppError::Forbidden(_) => ProjectServiceError::Forbidden,
            _ => ProjectServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<ProjectServiceError> for AppError {
    fn from(err: ProjectServiceError) -> Self {
        match err {
            ProjectServiceError::Invalid(msg) => AppError::BadRequest(msg),
            ProjectServiceError::NotFound => AppError::NotFound("Project not found".to_string()),
            ProjectServiceError::Forbidden => AppError::Forbidden(
                "You are not allowed to access this project".to_string(),
            ),
            ProjectServiceError::Dependency(msg) => AppError::Internal(msg),
            ProjectServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
