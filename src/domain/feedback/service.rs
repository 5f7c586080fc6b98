use super::{CreateFeedbackRequest, Feedback, MAX_MESSAGE_LENGTH};
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::FeedbackRepository;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct FeedbackService {
    feedback_repo: Arc<FeedbackRepository>,
}

impl FeedbackService {
    pub fn new(feedback_repo: Arc<FeedbackRepository>) -> Self {
        Self { feedback_repo }
    }

    /// Store a public feedback message
    pub async fn submit(&self, request: CreateFeedbackRequest) -> AppResult<Feedback> {
        let message = validate_message(&request.message)?;

        let feedback = Feedback {
            id: Uuid::new_v4(),
            kind: request.kind,
            name: request.name.trim().to_string(),
            message,
            created_at: Utc::now(),
        };
        let created = self.feedback_repo.create(&feedback).await?;

        tracing::info!(feedback_id = %created.id, kind = ?created.kind, "Feedback received");

        Ok(created)
    }

    /// All feedback, newest first. Admins only.
    pub async fn list(&self, is_admin: bool) -> AppResult<Vec<Feedback>> {
        if !is_admin {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }
        self.feedback_repo.find_all().await
    }
}

fn validate_message(message: &str) -> AppResult<String> {
    let message = message.trim();
    if message.is_empty() {
        return Err(AppError::BadRequest("Message is required".to_string()));
    }
    if message.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Message must be {} characters or less",
            MAX_MESSAGE_LENGTH
        )));
    }
    Ok(message.to_string())
}
