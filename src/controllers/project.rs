use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::extract::{AppJson, AppPath};
use crate::domain::project::{
    BoardResponse, CreateProjectRequest, ProjectResponse, UpdateProjectRequest,
};
use crate::domain::shared::{ApiEnvelope, Empty};
use crate::{
    domain::project::{ProjectService, ProjectServiceApi},
    error::AppResult,
    infrastructure::auth::AuthUser,
};

#[derive(Debug, Serialize)]
pub struct ProjectPayload {
    pub project: ProjectResponse,
}

#[derive(Debug, Serialize)]
pub struct ProjectListPayload {
    pub projects: Vec<ProjectResponse>,
}

pub struct ProjectController {
    project_service: Arc<ProjectService>,
}

impl ProjectController {
    pub fn new(project_service: Arc<ProjectService>) -> Self {
        Self { project_service }
    }

    /// GET /api/projects - List the caller's projects
    pub async fn list_projects(
        State(controller): State<Arc<ProjectController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Json<ApiEnvelope<ProjectListPayload>>> {
        let projects = controller
            .project_service
            .list_projects(auth_user.user_id)
            .await?;
        Ok(Json(ApiEnvelope::success(
            "Projects loaded",
            ProjectListPayload { projects },
        )))
    }

    /// POST /api/projects - Create project
    pub async fn create_project(
        State(controller): State<Arc<ProjectController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppJson(request): AppJson<CreateProjectRequest>,
    ) -> AppResult<(StatusCode, Json<ApiEnvelope<ProjectPayload>>)> {
        let project = controller
            .project_service
            .create_project(auth_user.user_id, request)
            .await?;
        Ok((
            StatusCode::CREATED,
            Json(ApiEnvelope::success("Project created", ProjectPayload { project })),
        ))
    }

    /// GET /api/projects/{id}
    pub async fn get_project(
        State(controller): State<Arc<ProjectController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppPath(project_id): AppPath<Uuid>,
    ) -> AppResult<Json<ApiEnvelope<ProjectPayload>>> {
        let project = controller
            .project_service
            .get_project(auth_user.user_id, project_id)
            .await?;
        Ok(Json(ApiEnvelope::success("Project loaded", ProjectPayload { project })))
    }

    /// PUT /api/projects/{id} - Partial update
    pub async fn update_project(
        State(controller): State<Arc<ProjectController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppPath(project_id): AppPath<Uuid>,
        AppJson(request): AppJson<UpdateProjectRequest>,
    ) -> AppResult<Json<ApiEnvelope<ProjectPayload>>> {
        let project = controller
            .project_service
            .update_project(auth_user.user_id, project_id, request)
            .await?;
        Ok(Json(ApiEnvelope::success("Project updated", ProjectPayload { project })))
    }

    /// DELETE /api/projects/{id}
    pub async fn delete_project(
        State(controller): State<Arc<ProjectController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppPath(project_id): AppPath<Uuid>,
    ) -> AppResult<Json<ApiEnvelope<Empty>>> {
        controller
            .project_service
            .delete_project(auth_user.user_id, project_id)
            .await?;
        Ok(Json(ApiEnvelope::message("Project deleted")))
    }

    /// GET /api/projects/{id}/board - Tasks grouped by status
    pub async fn get_board(
        State(controller): State<Arc<ProjectController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppPath(project_id): AppPath<Uuid>,
    ) -> AppResult<Json<ApiEnvelope<BoardResponse>>> {
        let board = controller
            .project_service
            .get_board(auth_user.user_id, project_id)
            .await?;
        Ok(Json(ApiEnvelope::success("Board loaded", board)))
    }
}
