use super::error::TaskServiceError;
use super::{
    CreateTaskRequest, Task, TaskMutationResponse, TaskResponse, TaskStatus, UpdateTaskRequest,
};
use crate::domain::project::{recompute_progress, Project};
use crate::domain::shared::validate_title;
use crate::infrastructure::repositories::{ProjectRepository, TaskRepository};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

const MAX_TITLE_LENGTH: usize = 200;

pub struct TaskService {
    task_repo: Arc<TaskRepository>,
    project_repo: Arc<ProjectRepository>,
}

impl TaskService {
    pub fn new(task_repo: Arc<TaskRepository>, project_repo: Arc<ProjectRepository>) -> Self {
        Self {
            task_repo,
            project_repo,
        }
    }
}

#[async_trait]
pub trait TaskServiceApi: Send + Sync {
    async fn list_tasks(
        &self,
        user_id: Uuid,
        project_id: Option<Uuid>,
    ) -> Result<Vec<TaskResponse>, TaskServiceError>;

    async fn get_task(&self, user_id: Uuid, task_id: Uuid)
        -> Result<TaskResponse, TaskServiceError>;

    async fn create_task(
        &self,
        user_id: Uuid,
        request: CreateTaskRequest,
    ) -> Result<TaskMutationResponse, TaskServiceError>;

    async fn update_task(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        request: UpdateTaskRequest,
    ) -> Result<TaskMutationResponse, TaskServiceError>;

    /// Kanban drag-and-drop
    async fn update_task_status(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        status: TaskStatus,
    ) -> Result<TaskMutationResponse, TaskServiceError>;

    async fn delete_task(&self, user_id: Uuid, task_id: Uuid) -> Result<i32, TaskServiceError>;
}

#[async_trait]
impl TaskServiceApi for TaskService {
    async fn list_tasks(
        &self,
        user_id: Uuid,
        project_id: Option<Uuid>,
    ) -> Result<Vec<TaskResponse>, TaskServiceError> {
        if let Some(project_id) = project_id {
            self.verify_project_ownership(project_id, user_id).await?;
        }

        let tasks = self
            .task_repo
            .find_by_user(user_id, project_id)
            .await
            .map_err(|e| TaskServiceError::Dependency(e.to_string()))?;
        Ok(tasks.into_iter().map(TaskResponse::from).collect())
    }

    async fn get_task(
        &self,
        user_id: Uuid,
        task_id: Uuid,
    ) -> Result<TaskResponse, TaskServiceError> {
        let task = self.verify_task_ownership(task_id, user_id).await?;
        Ok(TaskResponse::from(task))
    }

    async fn create_task(
        &self,
        user_id: Uuid,
        request: CreateTaskRequest,
    ) -> Result<TaskMutationResponse, TaskServiceError> {
        let title =
            validate_title(&request.title, MAX_TITLE_LENGTH).map_err(TaskServiceError::Invalid)?;
        self.verify_project_ownership(request.project_id, user_id)
            .await?;

        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            title,
            description: request.description.trim().to_string(),
            due_date: request.due_date,
            status: request.status,
            priority: request.priority,
            project_id: request.project_id,
            created_by: user_id,
            created_at: now,
            updated_at: now,
        };

        let created = self
            .task_repo
            .create(&task)
            .await
            .map_err(|e| TaskServiceError::Dependency(e.to_string()))?;

        tracing::info!(
            user_id = %user_id,
            task_id = %created.id,
            project_id = %created.project_id,
            "Task created"
        );

        self.with_progress(created).await
    }

    async fn update_task(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        request: UpdateTaskRequest,
    ) -> Result<TaskMutationResponse, TaskServiceError> {
        let mut task = self.verify_task_ownership(task_id, user_id).await?;

        if let Some(title) = request.title {
            task.title = validate_title(&title, MAX_TITLE_LENGTH).map_err(TaskServiceError::Invalid)?;
        }
        if let Some(description) = request.description {
            task.description = description.trim().to_string();
        }
        if let Some(due_date) = request.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(status) = request.status {
            task.status = status;
        }
        if let Some(priority) = request.priority {
            task.priority = priority;
        }

        let updated = self
            .task_repo
            .update(&task)
            .await
            .map_err(|e| TaskServiceError::Dependency(e.to_string()))?;

        self.with_progress(updated).await
    }

    async fn update_task_status(
        &self,
        user_id: Uuid,
        task_id: Uuid,
        status: TaskStatus,
    ) -> Result<TaskMutationResponse, TaskServiceError> {
        let task = self.verify_task_ownership(task_id, user_id).await?;

        let updated = self
            .task_repo
            .update_status(task.id, status)
            .await
            .map_err(|e| TaskServiceError::Dependency(e.to_string()))?;

        tracing::info!(
            task_id = %task_id,
            from = task.status.as_str(),
            to = status.as_str(),
            "Task moved"
        );

        self.with_progress(updated).await
    }

    async fn delete_task(&self, user_id: Uuid, task_id: Uuid) -> Result<i32, TaskServiceError> {
        let task = self.verify_task_ownership(task_id, user_id).await?;

        let deleted = self
            .task_repo
            .delete(task_id)
            .await
            .map_err(|e| TaskServiceError::Dependency(e.to_string()))?;
        if !deleted {
            return Err(TaskServiceError::NotFound);
        }

        self.refresh_progress(task.project_id).await
    }
}

impl TaskService {
    async fn with_progress(&self, task: Task) -> Result<TaskMutationResponse, TaskServiceError> {
        let progress = self.refresh_progress(task.project_id).await?;
        Ok(TaskMutationResponse {
            task: TaskResponse::from(task),
            progress,
        })
    }

    async fn refresh_progress(&self, project_id: Uuid) -> Result<i32, TaskServiceError> {
        recompute_progress(&self.task_repo, &self.project_repo, project_id)
            .await
            .map_err(|e| TaskServiceError::Dependency(e.to_string()))
    }

    async fn verify_project_ownership(
        &self,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<Project, TaskServiceError> {
        let project = self
            .project_repo
            .find_by_id(project_id)
            .await
            .map_err(|e| TaskServiceError::Dependency(e.to_string()))?
            .ok_or(TaskServiceError::ProjectNotFound)?;

        if project.created_by != user_id {
            return Err(TaskServiceError::Forbidden(
                "You are not allowed to access this project".to_string(),
            ));
        }

        Ok(project)
    }

    async fn verify_task_ownership(
        &self,
        task_id: Uuid,
        user_id: Uuid,
    ) -> Result<Task, TaskServiceError> {
        let task = self
            .task_repo
            .find_by_id(task_id)
            .await
            .map_err(|e| TaskServiceError::Dependency(e.to_string()))?
            .ok_or(TaskServiceError::NotFound)?;

        if task.created_by != user_id {
            return Err(TaskServiceError::Forbidden(
                "You are not allowed to access this task".to_string(),
            ));
        }

        Ok(task)
    }
}
