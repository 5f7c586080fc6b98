use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum InvoiceServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("invoice not found")]
    NotFound,
    #[error("project not found")]
    ProjectNotFound,
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("invoice id already in use: {0}")]
    DuplicateId(String),
    #[error("invoice numbers exhausted for {0}")]
    SequenceExhausted(String),
    #[error(transparent)]
    Render(#[from] super::PdfRenderError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<InvoiceServiceError> for AppError {
    fn from(err: InvoiceServiceError) -> Self {
        match err {
            InvoiceServiceError::Invalid(msg) => AppError::BadRequest(msg),
            InvoiceServiceError::NotFound => AppError::NotFound("Invoice not found".to_string()),
            InvoiceServiceError::ProjectNotFound => {
                AppError::NotFound("Project not found".to_string())
            }
            InvoiceServiceError::Forbidden(msg) => AppError::Forbidden(msg),
            InvoiceServiceError::DuplicateId(id) => {
                AppError::Conflict(format!("Invoice id {} is already in use", id))
            }
            InvoiceServiceError::SequenceExhausted(prefix) => AppError::Conflict(format!(
                "Invoice numbers {}NNNN are exhausted for this month",
                prefix
            )),
            InvoiceServiceError::Dependency(msg) => AppError::Internal(msg),
            InvoiceServiceError::Render(e) => AppError::Internal(e.to_string()),
            InvoiceServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
