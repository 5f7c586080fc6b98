use super::{
    HoursByDay, HoursByDayResponse, InvoiceSummary, MinutesByProject, MinutesByProjectResponse,
};
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::AnalyticsRepository;
use chrono::{Datelike, NaiveDate, NaiveTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Read-only dashboard aggregates, scoped to the caller
pub struct AnalyticsService {
    analytics_repo: Arc<AnalyticsRepository>,
}

impl AnalyticsService {
    pub fn new(analytics_repo: Arc<AnalyticsRepository>) -> Self {
        Self { analytics_repo }
    }

    /// Tracked hours per day for the current UTC month
    pub async fn hours_by_day(&self, user_id: Uuid) -> AppResult<HoursByDayResponse> {
        let today = Utc::now().date_naive();
        let (start, end) = month_bounds(today)
            .ok_or_else(|| AppError::Internal(format!("no month range for {}", today)))?;

        let rows = self
            .analytics_repo
            .seconds_by_day(
                user_id,
                start.and_time(NaiveTime::MIN).and_utc(),
                end.and_time(NaiveTime::MIN).and_utc(),
            )
            .await?;

        Ok(HoursByDayResponse {
            month: format!("{:04}-{:02}", today.year(), today.month()),
            days: rows.into_iter().map(HoursByDay::from).collect(),
        })
    }

    /// Tracked minutes per project, largest first
    pub async fn minutes_by_project(&self, user_id: Uuid) -> AppResult<MinutesByProjectResponse> {
        let rows = self.analytics_repo.seconds_by_project(user_id).await?;
        Ok(MinutesByProjectResponse {
            projects: rows.into_iter().map(MinutesByProject::from).collect(),
        })
    }

    pub async fn invoice_summary(&self, user_id: Uuid) -> AppResult<InvoiceSummary> {
        let today = Utc::now().date_naive();
        let summary = self.analytics_repo.invoice_summary(user_id, today).await?;

        tracing::debug!(
            user_id = %user_id,
            invoices = summary.total_invoices,
            overdue = summary.overdue_count,
            "Invoice summary computed"
        );

        Ok(summary)
    }
}

/// First day of the month containing `day` and first day of the following month
fn month_bounds(day: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let start = day.with_day(1)?;
    let end = if day.month() == 12 {
        NaiveDate::from_ymd_opt(day.year() + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(day.year(), day.month() + 1, 1)?
    };
    Some((start, end))
}
