use super::error::EntryServiceError;
use super::{validate_session, CreateEntryRequest, Entry, EntryResponse};
use crate::infrastructure::repositories::{EntryRepository, ProjectRepository};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

const MAX_DESCRIPTION_LENGTH: usize = 1000;

pub struct EntryService {
    entry_repo: Arc<EntryRepository>,
    project_repo: Arc<ProjectRepository>,
}

impl EntryService {
    pub fn new(entry_repo: Arc<EntryRepository>, project_repo: Arc<ProjectRepository>) -> Self {
        Self {
            entry_repo,
            project_repo,
        }
    }
}

#[async_trait]
pub trait EntryServiceApi: Send + Sync {
    async fn list_entries(
        &self,
        user_id: Uuid,
        project_id: Option<Uuid>,
    ) -> Result<Vec<EntryResponse>, EntryServiceError>;

    /// Store a finished timer session
    async fn record_entry(
        &self,
        user_id: Uuid,
        request: CreateEntryRequest,
    ) -> Result<EntryResponse, EntryServiceError>;

    async fn delete_entry(&self, user_id: Uuid, entry_id: Uuid) -> Result<(), EntryServiceError>;
}

#[async_trait]
impl EntryServiceApi for EntryService {
    async fn list_entries(
        &self,
        user_id: Uuid,
        project_id: Option<Uuid>,
    ) -> Result<Vec<EntryResponse>, EntryServiceError> {
        let entries = self
            .entry_repo
            .find_by_user(user_id, project_id)
            .await
            .map_err(|e| EntryServiceError::Dependency(e.to_string()))?;
        Ok(entries.into_iter().map(EntryResponse::from).collect())
    }

    async fn record_entry(
        &self,
        user_id: Uuid,
        request: CreateEntryRequest,
    ) -> Result<EntryResponse, EntryServiceError> {
        validate_session(request.duration, request.start_time, request.end_time)
            .map_err(EntryServiceError::Invalid)?;

        let description = request.description.trim().to_string();
        if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(EntryServiceError::Invalid(format!(
                "Description must be {} characters or less",
                MAX_DESCRIPTION_LENGTH
            )));
        }

        let project = self
            .project_repo
            .find_by_id(request.project_id)
            .await
            .map_err(|e| EntryServiceError::Dependency(e.to_string()))?
            .ok_or(EntryServiceError::ProjectNotFound)?;
        if project.created_by != user_id {
            return Err(EntryServiceError::Forbidden(
                "You are not allowed to track time on this project".to_string(),
            ));
        }

        let entry = Entry {
            id: Uuid::new_v4(),
            description,
            duration: request.duration,
            start_time: request.start_time,
            end_time: request.end_time,
            mode: request.mode,
            project_id: request.project_id,
            user_id,
            created_at: Utc::now(),
        };

        let created = self
            .entry_repo
            .create(&entry)
            .await
            .map_err(|e| EntryServiceError::Dependency(e.to_string()))?;

        tracing::info!(
            user_id = %user_id,
            project_id = %created.project_id,
            duration = created.duration,
            "Time entry recorded"
        );

        Ok(EntryResponse::from(created))
    }

    async fn delete_entry(&self, user_id: Uuid, entry_id: Uuid) -> Result<(), EntryServiceError> {
        let entry = self
            .entry_repo
            .find_by_id(entry_id)
            .await
            .map_err(|e| EntryServiceError::Dependency(e.to_string()))?
            .ok_or(EntryServiceError::NotFound)?;
        if entry.user_id != user_id {
            return Err(EntryServiceError::Forbidden(
                "You are not allowed to delete this entry".to_string(),
            ));
        }

        self.entry_repo
            .delete(entry_id)
            .await
            .map_err(|e| EntryServiceError::Dependency(e.to_string()))?;

        Ok(())
    }
}
