use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::extract::{AppJson, AppPath, AppQuery};
use crate::domain::entry::{CreateEntryRequest, EntryListQuery, EntryResponse};
use crate::domain::shared::{ApiEnvelope, Empty};
use crate::{
    domain::entry::{EntryService, EntryServiceApi},
    error::AppResult,
    infrastructure::auth::AuthUser,
};

#[derive(Debug, Serialize)]
pub struct EntryPayload {
    pub entry: EntryResponse,
}

#[derive(Debug, Serialize)]
pub struct EntryListPayload {
    pub entries: Vec<EntryResponse>,
}

pub struct EntryController {
    entry_service: Arc<EntryService>,
}

impl EntryController {
    pub fn new(entry_service: Arc<EntryService>) -> Self {
        Self { entry_service }
    }

    /// GET /api/entries?projectId=
    pub async fn list_entries(
        State(controller): State<Arc<EntryController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppQuery(query): AppQuery<EntryListQuery>,
    ) -> AppResult<Json<ApiEnvelope<EntryListPayload>>> {
        let entries = controller
            .entry_service
            .list_entries(auth_user.user_id, query.project_id)
            .await?;
        Ok(Json(ApiEnvelope::success(
            "Entries loaded",
            EntryListPayload { entries },
        )))
    }

    /// POST /api/entries - Record a finished timer session
    pub async fn create_entry(
        State(controller): State<Arc<EntryController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppJson(request): AppJson<CreateEntryRequest>,
    ) -> AppResult<(StatusCode, Json<ApiEnvelope<EntryPayload>>)> {
        let entry = controller
            .entry_service
            .record_entry(auth_user.user_id, request)
            .await?;
        Ok((
            StatusCode::CREATED,
            Json(ApiEnvelope::success("Time entry saved", EntryPayload { entry })),
        ))
    }

    /// DELETE /api/entries/{id}
    pub async fn delete_entry(
        State(controller): State<Arc<EntryController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppPath(entry_id): AppPath<Uuid>,
    ) -> AppResult<Json<ApiEnvelope<Empty>>> {
        controller
            .entry_service
            .delete_entry(auth_user.user_id, entry_id)
            .await?;
        Ok(Json(ApiEnvelope::message("Time entry deleted")))
    }
}
