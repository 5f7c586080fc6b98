use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use super::extract::AppJson;
use crate::domain::ai::{
    GenerateTasksRequest, GenerateTasksResponse, PrioritizeRequest, PrioritizeResponse,
};
use crate::domain::shared::ApiEnvelope;
use crate::{
    domain::ai::{AiService, AiServiceApi},
    error::AppResult,
    infrastructure::auth::AuthUser,
};

pub struct AiController {
    ai_service: Arc<AiService>,
}

impl AiController {
    pub fn new(ai_service: Arc<AiService>) -> Self {
        Self { ai_service }
    }

    /// POST /api/ai/prioritize
    pub async fn prioritize(
        State(controller): State<Arc<AiController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppJson(request): AppJson<PrioritizeRequest>,
    ) -> AppResult<Json<ApiEnvelope<PrioritizeResponse>>> {
        let result = controller
            .ai_service
            .prioritize_tasks(auth_user.user_id, request.project_id)
            .await?;
        Ok(Json(ApiEnvelope::success("Tasks prioritized", result)))
    }

    /// POST /api/ai/generate-tasks
    pub async fn generate_tasks(
        State(controller): State<Arc<AiController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppJson(request): AppJson<GenerateTasksRequest>,
    ) -> AppResult<Json<ApiEnvelope<GenerateTasksResponse>>> {
        let result = controller
            .ai_service
            .generate_tasks(auth_user.user_id, request)
            .await?;
        Ok(Json(ApiEnvelope::success("Tasks generated", result)))
    }
}
