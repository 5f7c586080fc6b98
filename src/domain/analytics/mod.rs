pub mod service;

pub use service::AnalyticsService;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Title reported for entries whose project no longer exists
pub const DELETED_PROJECT_TITLE: &str = "Deleted project";

/// Raw per-day aggregate
#[derive(Debug, FromRow)]
pub struct DailySeconds {
    pub day: NaiveDate,
    pub seconds: i64,
}

/// Raw per-project aggregate; `title` is NULL once the project is gone
#[derive(Debug, FromRow)]
pub struct ProjectSeconds {
    pub project_id: Uuid,
    pub title: Option<String>,
    pub seconds: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub total_invoices: i64,
    pub total_amount: Decimal,
    /// Paid invoices
    pub earnings: Decimal,
    /// Drafts and sent invoices that are not past due
    pub pending: Decimal,
    pub overdue_count: i64,
    pub overdue_amount: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HoursByDay {
    pub date: NaiveDate,
    pub hours: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinutesByProject {
    pub project_id: Uuid,
    pub title: String,
    pub minutes: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HoursByDayResponse {
    /// `YYYY-MM`
    pub month: String,
    pub days: Vec<HoursByDay>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MinutesByProjectResponse {
    pub projects: Vec<MinutesByProject>,
}

/// Round to two decimals
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn seconds_to_hours(seconds: i64) -> f64 {
    round2(seconds as f64 / 3600.0)
}

pub fn seconds_to_minutes(seconds: i64) -> f64 {
    round2(seconds as f64 / 60.0)
}

impl From<DailySeconds> for HoursByDay {
    fn from(row: DailySeconds) -> Self {
        Self {
            date: row.day,
            hours: seconds_to_hours(row.seconds),
        }
    }
}

impl From<ProjectSeconds> for MinutesByProject {
    fn from(row: ProjectSeconds) -> Self {
        Self {
            project_id: row.project_id,
            title: row
                .title
                .unwrap_or_else(|| DELETED_PROJECT_TITLE.to_string()),
            minutes: seconds_to_minutes(row.seconds),
        }
    }
}
