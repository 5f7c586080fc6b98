pub mod error;
pub mod model;
pub mod service;

pub use error::EntryServiceError;
pub use model::{validate_session, Entry, TimerMode};
pub use service::{EntryService, EntryServiceApi};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    pub id: Uuid,
    pub description: String,
    pub duration: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub mode: TimerMode,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<Entry> for EntryResponse {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            description: entry.description,
            duration: entry.duration,
            start_time: entry.start_time,
            end_time: entry.end_time,
            mode: entry.mode,
            project_id: entry.project_id,
            user_id: entry.user_id,
            created_at: entry.created_at,
        }
    }
}

/// A finished session posted by the client timer
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    #[serde(default)]
    pub description: String,
    pub duration: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub mode: TimerMode,
    pub project_id: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryListQuery {
    pub project_id: Option<Uuid>,
}
