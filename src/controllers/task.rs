use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::extract::{AppJson, AppPath, AppQuery};
use crate::domain::shared::ApiEnvelope;
use crate::domain::task::{
    CreateTaskRequest, TaskListQuery, TaskMutationResponse, TaskResponse, UpdateTaskRequest,
    UpdateTaskStatusRequest,
};
use crate::{
    domain::task::{TaskService, TaskServiceApi},
    error::AppResult,
    infrastructure::auth::AuthUser,
};

#[derive(Debug, Serialize)]
pub struct TaskPayload {
    pub task: TaskResponse,
}

#[derive(Debug, Serialize)]
pub struct TaskListPayload {
    pub tasks: Vec<TaskResponse>,
}

#[derive(Debug, Serialize)]
pub struct ProgressPayload {
    pub progress: i32,
}

pub struct TaskController {
    task_service: Arc<TaskService>,
}

impl TaskController {
    pub fn new(task_service: Arc<TaskService>) -> Self {
        Self { task_service }
    }

    /// GET /api/tasks?projectId=
    pub async fn list_tasks(
        State(controller): State<Arc<TaskController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppQuery(query): AppQuery<TaskListQuery>,
    ) -> AppResult<Json<ApiEnvelope<TaskListPayload>>> {
        let tasks = controller
            .task_service
            .list_tasks(auth_user.user_id, query.project_id)
            .await?;
        Ok(Json(ApiEnvelope::success("Tasks loaded", TaskListPayload { tasks })))
    }

    /// POST /api/tasks
    pub async fn create_task(
        State(controller): State<Arc<TaskController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppJson(request): AppJson<CreateTaskRequest>,
    ) -> AppResult<(StatusCode, Json<ApiEnvelope<TaskMutationResponse>>)> {
        let result = controller
            .task_service
            .create_task(auth_user.user_id, request)
            .await?;
        Ok((
            StatusCode::CREATED,
            Json(ApiEnvelope::success("Task created", result)),
        ))
    }

    /// GET /api/tasks/{id}
    pub async fn get_task(
        State(controller): State<Arc<TaskController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppPath(task_id): AppPath<Uuid>,
    ) -> AppResult<Json<ApiEnvelope<TaskPayload>>> {
        let task = controller
            .task_service
            .get_task(auth_user.user_id, task_id)
            .await?;
        Ok(Json(ApiEnvelope::success("Task loaded", TaskPayload { task })))
    }

    /// PUT /api/tasks/{id}
    pub async fn update_task(
        State(controller): State<Arc<TaskController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppPath(task_id): AppPath<Uuid>,
        AppJson(request): AppJson<UpdateTaskRequest>,
    ) -> AppResult<Json<ApiEnvelope<TaskMutationResponse>>> {
        let result = controller
            .task_service
            .update_task(auth_user.user_id, task_id, request)
            .await?;
        Ok(Json(ApiEnvelope::success("Task updated", result)))
    }

    /// PATCH /api/tasks/{id}/status - Kanban move
    pub async fn update_task_status(
        State(controller): State<Arc<TaskController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppPath(task_id): AppPath<Uuid>,
        AppJson(request): AppJson<UpdateTaskStatusRequest>,
    ) -> AppResult<Json<ApiEnvelope<TaskMutationResponse>>> {
        let result = controller
            .task_service
            .update_task_status(auth_user.user_id, task_id, request.status)
            .await?;
        Ok(Json(ApiEnvelope::success("Task status updated", result)))
    }

    /// DELETE /api/tasks/{id}
    pub async fn delete_task(
        State(controller): State<Arc<TaskController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppPath(task_id): AppPath<Uuid>,
    ) -> AppResult<Json<ApiEnvelope<ProgressPayload>>> {
        let progress = controller
            .task_service
            .delete_task(auth_user.user_id, task_id)
            .await?;
        Ok(Json(ApiEnvelope::success("Task deleted", ProgressPayload { progress })))
    }
}
