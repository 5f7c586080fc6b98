use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One recorded tracking session
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Entry {
    pub id: Uuid,
    pub description: String,
    /// Seconds actually tracked, pauses excluded
    pub duration: i64,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub mode: TimerMode,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    #[default]
    Stopwatch,
    Countdown,
}

/// Reject sessions the client could not have tracked: non-positive durations,
/// end before start, or more tracked time than wall-clock time elapsed.
pub fn validate_session(
    duration: i64,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<(), String> {
    if duration <= 0 {
        return Err("Duration must be greater than zero".to_string());
    }
    if end_time < start_time {
        return Err("End time must not be before start time".to_string());
    }
    let span = (end_time - start_time).num_seconds();
    if duration > span {
        return Err(format!(
            "Duration of {}s exceeds the {}s between start and end time",
            duration, span
        ));
    }
    Ok(())
}
