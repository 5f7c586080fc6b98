use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Serialize;
use std::sync::Arc;

use super::extract::AppJson;
use crate::domain::feedback::{CreateFeedbackRequest, Feedback, FeedbackListResponse};
use crate::domain::shared::ApiEnvelope;
use crate::{domain::feedback::FeedbackService, error::AppResult, infrastructure::auth::AuthUser};

#[derive(Debug, Serialize)]
pub struct FeedbackPayload {
    pub feedback: Feedback,
}

pub struct FeedbackController {
    feedback_service: Arc<FeedbackService>,
}

impl FeedbackController {
    pub fn new(feedback_service: Arc<FeedbackService>) -> Self {
        Self { feedback_service }
    }

    /// POST /api/feedback - Public submission
    pub async fn submit(
        State(controller): State<Arc<FeedbackController>>,
        AppJson(request): AppJson<CreateFeedbackRequest>,
    ) -> AppResult<(StatusCode, Json<ApiEnvelope<FeedbackPayload>>)> {
        let feedback = controller.feedback_service.submit(request).await?;
        Ok((
            StatusCode::CREATED,
            Json(ApiEnvelope::success(
                "Thanks for your feedback",
                FeedbackPayload { feedback },
            )),
        ))
    }

    /// GET /api/feedback - Admins only
    pub async fn list(
        State(controller): State<Arc<FeedbackController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Json<ApiEnvelope<FeedbackListResponse>>> {
        let feedback = controller.feedback_service.list(auth_user.is_admin).await?;
        Ok(Json(ApiEnvelope::success(
            "Feedback loaded",
            FeedbackListResponse { feedback },
        )))
    }
}
