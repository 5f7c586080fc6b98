use super::error::ProjectServiceError;
use super::{
    normalize_tags, BoardColumns, BoardResponse, CreateProjectRequest, Project, ProjectResponse,
    UpdateProjectRequest,
};
use crate::domain::shared::validate_title;
use crate::domain::task::{TaskResponse, TaskStatus};
use crate::infrastructure::repositories::{ProjectRepository, TaskRepository};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

const MAX_TITLE_LENGTH: usize = 200;

pub struct ProjectService {
    project_repo: Arc<ProjectRepository>,
    task_repo: Arc<TaskRepository>,
}

impl ProjectService {
    pub fn new(project_repo: Arc<ProjectRepository>, task_repo: Arc<TaskRepository>) -> Self {
        Self {
            project_repo,
            task_repo,
        }
    }
}

#[async_trait]
pub trait ProjectServiceApi: Send + Sync {
    async fn list_projects(&self, user_id: Uuid)
        -> Result<Vec<ProjectResponse>, ProjectServiceError>;

    async fn get_project(
        &self,
        user_id: Uuid,
        project_id: Uuid,
    ) -> Result<ProjectResponse, ProjectServiceError>;

    async fn create_project(
        &self,
        user_id: Uuid,
        request: CreateProjectRequest,
    ) -> Result<ProjectResponse, ProjectServiceError>;

    async fn update_project(
        &self,
        user_id: Uuid,
        project_id: Uuid,
        request: UpdateProjectRequest,
    ) -> Result<ProjectResponse, ProjectServiceError>;

    async fn delete_project(&self, user_id: Uuid, project_id: Uuid)
        -> Result<(), ProjectServiceError>;

    async fn get_board(
        &self,
        user_id: Uuid,
        project_id: Uuid,
    ) -> Result<BoardResponse, ProjectServiceError>;
}

#[async_trait]
impl ProjectServiceApi for ProjectService {
    async fn list_projects(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ProjectResponse>, ProjectServiceError> {
        let projects = self
            .project_repo
            .find_by_user(user_id)
            .await
            .map_err(|e| ProjectServiceError::Dependency(e.to_string()))?;
        Ok(projects.into_iter().map(ProjectResponse::from).collect())
    }

    async fn get_project(
        &self,
        user_id: Uuid,
        project_id: Uuid,
    ) -> Result<ProjectResponse, ProjectServiceError> {
        let project = self.verify_project_ownership(project_id, user_id).await?;
        Ok(ProjectResponse::from(project))
    }

    async fn create_project(
        &self,
        user_id: Uuid,
        request: CreateProjectRequest,
    ) -> Result<ProjectResponse, ProjectServiceError> {
        let title =
            validate_title(&request.title, MAX_TITLE_LENGTH).map_err(ProjectServiceError::Invalid)?;
        let now = Utc::now();

        let project = Project {
            id: Uuid::new_v4(),
            title,
            description: request.description.trim().to_string(),
            due_date: request.due_date,
            status: request.status,
            priority: request.priority,
            tags: normalize_tags(request.tags),
            progress: 0,
            created_by: user_id,
            created_at: now,
            updated_at: now,
        };

        let created = self
            .project_repo
            .create(&project)
            .await
            .map_err(|e| ProjectServiceError::Dependency(e.to_string()))?;

        tracing::info!(user_id = %user_id, project_id = %created.id, "Project created");

        Ok(ProjectResponse::from(created))
    }

    async fn update_project(
        &self,
        user_id: Uuid,
        project_id: Uuid,
        request: UpdateProjectRequest,
    ) -> Result<ProjectResponse, ProjectServiceError> {
        let mut project = self.verify_project_ownership(project_id, user_id).await?;

        if let Some(title) = request.title {
            project.title =
                validate_title(&title, MAX_TITLE_LENGTH).map_err(ProjectServiceError::Invalid)?;
        }
        if let Some(description) = request.description {
            project.description = description.trim().to_string();
        }
        if let Some(due_date) = request.due_date {
            project.due_date = Some(due_date);
        }
        if let Some(status) = request.status {
            project.status = status;
        }
        if let Some(priority) = request.priority {
            project.priority = priority;
        }
        if let Some(tags) = request.tags {
            project.tags = normalize_tags(tags);
        }

        let updated = self
            .project_repo
            .update(&project)
            .await
            .map_err(|e| ProjectServiceError::Dependency(e.to_string()))?;

        Ok(ProjectResponse::from(updated))
    }

    async fn delete_project(
        &self,
        user_id: Uuid,
        project_id: Uuid,
    ) -> Result<(), ProjectServiceError> {
        self.verify_project_ownership(project_id, user_id).await?;

        let deleted = self
            .project_repo
            .delete(project_id)
            .await
            .map_err(|e| ProjectServiceError::Dependency(e.to_string()))?;
        if !deleted {
            return Err(ProjectServiceError::NotFound);
        }

        tracing::info!(user_id = %user_id, project_id = %project_id, "Project deleted");

        Ok(())
    }

    async fn get_board(
        &self,
        user_id: Uuid,
        project_id: Uuid,
    ) -> Result<BoardResponse, ProjectServiceError> {
        let project = self.verify_project_ownership(project_id, user_id).await?;
        let tasks = self
            .task_repo
            .find_by_project(project_id)
            .await
            .map_err(|e| ProjectServiceError::Dependency(e.to_string()))?;

        let mut columns = BoardColumns::default();
        for task in tasks {
            let column = match task.status {
                TaskStatus::NotStarted => &mut columns.not_started,
                TaskStatus::InProgress => &mut columns.in_progress,
                TaskStatus::Completed => &mut columns.completed,
            };
            column.push(TaskResponse::from(task));
        }

        Ok(BoardResponse {
            project: ProjectResponse::from(project),
            columns,
        })
    }
}

impl ProjectService {
    /// Missing project is 404, someone else's project is 403
    async fn verify_project_ownership(
        &self,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<Project, ProjectServiceError> {
        let project = self
            .project_repo
            .find_by_id(project_id)
            .await
            .map_err(|e| ProjectServiceError::Dependency(e.to_string()))?
            .ok_or(ProjectServiceError::NotFound)?;

        if project.created_by != user_id {
            tracing::warn!(
                user_id = %user_id,
                project_id = %project_id,
                "Rejected access to another user's project"
            );
            return Err(ProjectServiceError::Forbidden);
        }

        Ok(project)
    }
}
