use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum TaskServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("task not found")]
    NotFound,
    #[error("project not found")]
    ProjectNotFound,
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<AppError> for TaskServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::BadRequest(msg) => TaskServiceError::Invalid(msg),
            AppError::NotFound(_) => TaskServiceError::NotFound,
            AppError::Forbidden(msg) => TaskServiceError::Forbidden(msg),
            _ => TaskServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<TaskServiceError> for AppError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::Invalid(msg) => AppError::BadRequest(msg),
            TaskServiceError::NotFound => AppError::NotFound("Task not found".to_string()),
            TaskServiceError::ProjectNotFound => {
                AppError::NotFound("Project not found".to_string())
            }
            TaskServiceError::Forbidden(msg) => AppError::Forbidden(msg),
            TaskServiceError::Dependency(msg) => AppError::Internal(msg),
            TaskServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
