pub mod error;
pub mod model;
pub mod progress;
pub mod service;

pub use error::ProjectServiceError;
pub use model::{Project, ProjectStatus};
pub use progress::{calculate_progress, recompute_progress};
pub use service::{ProjectService, ProjectServiceApi};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::shared::Priority;
use crate::domain::task::TaskResponse;

/// Project as returned by the API
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub status: ProjectStatus,
    pub priority: Priority,
    pub tags: Vec<String>,
    pub progress: i32,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Project> for ProjectResponse {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            title: project.title,
            description: project.description,
            due_date: project.due_date,
            status: project.status,
            priority: project.priority,
            tags: project.tags,
            progress: project.progress,
            created_by: project.created_by,
            created_at: project.created_at,
            updated_at: project.updated_at,
        }
    }
}

/// Request to create a project
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Partial project update; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<ProjectStatus>,
    pub priority: Option<Priority>,
    pub tags: Option<Vec<String>>,
}

/// Kanban view of a project
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    pub project: ProjectResponse,
    pub columns: BoardColumns,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardColumns {
    pub not_started: Vec<TaskResponse>,
    pub in_progress: Vec<TaskResponse>,
    pub completed: Vec<TaskResponse>,
}

/// Trim, drop empties and duplicates, keep first-seen order
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_string();
        if !tag.is_empty() && !out.iter().any(|t| t.eq_ignore_ascii_case(&tag)) {
            out.push(tag);
        }
    }
    out
}
