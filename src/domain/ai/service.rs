use super::error::AiServiceError;
use super::{
    build_generate_prompt, build_prioritize_prompt, parse_generated_tasks, parse_priorities,
    GenerateTasksRequest, GenerateTasksResponse, PrioritizeResponse,
};
use crate::domain::project::{recompute_progress, Project};
use crate::domain::task::{Task, TaskResponse, TaskStatus};
use crate::infrastructure::repositories::{
    ProjectRepository, TaskAssistant, TaskRepository, UserRepository,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

const MAX_TITLE_LENGTH: usize = 200;

pub struct AiService {
    assistant: Arc<dyn TaskAssistant>,
    user_repo: Arc<UserRepository>,
    project_repo: Arc<ProjectRepository>,
    task_repo: Arc<TaskRepository>,
}

impl AiService {
    pub fn new(
        assistant: Arc<dyn TaskAssistant>,
        user_repo: Arc<UserRepository>,
        project_repo: Arc<ProjectRepository>,
        task_repo: Arc<TaskRepository>,
    ) -> Self {
        Self {
            assistant,
            user_repo,
            project_repo,
            task_repo,
        }
    }
}

#[async_trait]
pub trait AiServiceApi: Send + Sync {
    /// Re-rank the caller's open tasks. Costs one credit on success.
    async fn prioritize_tasks(
        &self,
        user_id: Uuid,
        project_id: Option<Uuid>,
    ) -> Result<PrioritizeResponse, AiServiceError>;

    /// Draft new tasks for a project. Costs one credit on success.
    async fn generate_tasks(
        &self,
        user_id: Uuid,
        request: GenerateTasksRequest,
    ) -> Result<GenerateTasksResponse, AiServiceError>;
}

#[async_trait]
impl AiServiceApi for AiService {
    async fn prioritize_tasks(
        &self,
        user_id: Uuid,
        project_id: Option<Uuid>,
    ) -> Result<PrioritizeResponse, AiServiceError> {
        self.ensure_credits(user_id).await?;
        if let Some(project_id) = project_id {
            self.verify_project_ownership(project_id, user_id).await?;
        }

        let open_tasks: Vec<Task> = self
            .task_repo
            .find_by_user(user_id, project_id)
            .await
            .map_err(|e| AiServiceError::Dependency(e.to_string()))?
            .into_iter()
            .filter(|task| task.status != TaskStatus::Completed)
            .collect();
        if open_tasks.is_empty() {
            return Err(AiServiceError::Invalid(
                "There are no open tasks to prioritize".to_string(),
            ));
        }

        let prompt = build_prioritize_prompt(&open_tasks);
        let answer = self
            .assistant
            .complete(&prompt)
            .await
            .map_err(AiServiceError::Assistant)?;

        let known: HashSet<Uuid> = open_tasks.iter().map(|task| task.id).collect();
        let updates = parse_priorities(&answer, &known).map_err(AiServiceError::MalformedAnswer)?;

        let updated = self
            .task_repo
            .update_priorities(user_id, &updates)
            .await
            .map_err(|e| AiServiceError::Dependency(e.to_string()))?;

        let ai_limit = self.consume_credit(user_id).await?;

        tracing::info!(
            user_id = %user_id,
            candidates = open_tasks.len(),
            updated = updated.len(),
            ai_limit,
            "Tasks prioritized"
        );

        Ok(PrioritizeResponse {
            tasks: updated.into_iter().map(TaskResponse::from).collect(),
            ai_limit,
        })
    }

    async fn generate_tasks(
        &self,
        user_id: Uuid,
        request: GenerateTasksRequest,
    ) -> Result<GenerateTasksResponse, AiServiceError> {
        self.ensure_credits(user_id).await?;
        let project = self
            .verify_project_ownership(request.project_id, user_id)
            .await?;
        let count = request.effective_count();

        let existing = self
            .task_repo
            .find_by_project(project.id)
            .await
            .map_err(|e| AiServiceError::Dependency(e.to_string()))?;

        let prompt = build_generate_prompt(&project, &existing, count);
        let answer = self
            .assistant
            .complete(&prompt)
            .await
            .map_err(AiServiceError::Assistant)?;

        let drafts = parse_generated_tasks(&answer, count, MAX_TITLE_LENGTH)
            .map_err(AiServiceError::MalformedAnswer)?;
        if drafts.is_empty() {
            return Err(AiServiceError::MalformedAnswer(
                "the answer contained no usable tasks".to_string(),
            ));
        }

        let now = Utc::now();
        let tasks: Vec<Task> = drafts
            .into_iter()
            .map(|draft| Task {
                id: Uuid::new_v4(),
                title: draft.title,
                description: draft.description,
                due_date: None,
                status: TaskStatus::NotStarted,
                priority: draft.priority,
                project_id: project.id,
                created_by: user_id,
                created_at: now,
                updated_at: now,
            })
            .collect();

        let created = self
            .task_repo
            .create_many(&tasks)
            .await
            .map_err(|e| AiServiceError::Dependency(e.to_string()))?;

        let progress = recompute_progress(&self.task_repo, &self.project_repo, project.id)
            .await
            .map_err(|e| AiServiceError::Dependency(e.to_string()))?;
        let ai_limit = self.consume_credit(user_id).await?;

        tracing::info!(
            user_id = %user_id,
            project_id = %project.id,
            created = created.len(),
            ai_limit,
            "Tasks generated"
        );

        Ok(GenerateTasksResponse {
            tasks: created.into_iter().map(TaskResponse::from).collect(),
            progress,
            ai_limit,
        })
    }
}

impl AiService {
    /// Refuse before contacting the model when the caller has no credits left
    async fn ensure_credits(&self, user_id: Uuid) -> Result<(), AiServiceError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(|e| AiServiceError::Dependency(e.to_string()))?
            .ok_or_else(|| AiServiceError::Forbidden("User not found".to_string()))?;

        if !user.has_ai_credits() {
            tracing::info!(user_id = %user_id, "AI request refused: no credits left");
            return Err(AiServiceError::LimitReached);
        }
        Ok(())
    }

    /// Decrement by exactly one. A concurrent call may have spent the last credit
    /// in the meantime, in which case nothing is decremented.
    async fn consume_credit(&self, user_id: Uuid) -> Result<i32, AiServiceError> {
        let remaining = self
            .user_repo
            .consume_ai_credit(user_id)
            .await
            .map_err(|e| AiServiceError::Dependency(e.to_string()))?;

        match remaining {
            Some(remaining) => Ok(remaining),
            None => {
                tracing::warn!(user_id = %user_id, "AI credit already spent by a concurrent request");
                Ok(0)
            }
        }
    }

    async fn verify_project_ownership(
        &self,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<Project, AiServiceError> {
        let project = self
            .project_repo
            .find_by_id(project_id)
            .await
            .map_err(|e| AiServiceError::Dependency(e.to_string()))?
            .ok_or(AiServiceError::ProjectNotFound)?;

        if project.created_by != user_id {
            return Err(AiServiceError::Forbidden(
                "You are not allowed to access this project".to_string(),
            ));
        }

        Ok(project)
    }
}
