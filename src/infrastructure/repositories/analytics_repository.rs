use crate::domain::analytics::{DailySeconds, InvoiceSummary, ProjectSeconds};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

pub struct AnalyticsRepository {
    pool: Arc<DbPool>,
}

impl AnalyticsRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Tracked seconds per UTC day for entries starting in `[from, to)`
    pub async fn seconds_by_day(
        &self,
        user_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> AppResult<Vec<DailySeconds>> {
        let pool = self.pool.as_ref();
        let rows = sqlx::query_as::<_, DailySeconds>(
            r#"
            SELECT (start_time AT TIME ZONE 'UTC')::date AS day,
                   SUM(duration)::BIGINT AS seconds
            FROM entries
            WHERE user_id = $1 AND start_time >= $2 AND start_time < $3
            GROUP BY day
            ORDER BY day
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Tracked seconds per project; projects that were deleted come back with a NULL title
    pub async fn seconds_by_project(&self, user_id: Uuid) -> AppResult<Vec<ProjectSeconds>> {
        let pool = self.pool.as_ref();
        let rows = sqlx::query_as::<_, ProjectSeconds>(
            r#"
            SELECT e.project_id, p.title, SUM(e.duration)::BIGINT AS seconds
            FROM entries e
            LEFT JOIN projects p ON p.id = e.project_id
            WHERE e.user_id = $1
            GROUP BY e.project_id, p.title
            ORDER BY seconds DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(rows)
    }

    /// Invoice counters in one pass. Sent invoices due before `today` count as overdue.
    pub async fn invoice_summary(&self, user_id: Uuid, today: NaiveDate) -> AppResult<InvoiceSummary> {
        let pool = self.pool.as_ref();
        let summary = sqlx::query_as::<_, InvoiceSummary>(
            r#"
            SELECT
                COUNT(*) AS total_invoices,
                COALESCE(SUM(total), 0) AS total_amount,
                COALESCE(SUM(total) FILTER (WHERE status = 'paid'), 0) AS earnings,
                COALESCE(SUM(total) FILTER (
                    WHERE status = 'draft' OR (status = 'sent' AND due_date >= $2)
                ), 0) AS pending,
                COUNT(*) FILTER (
                    WHERE status = 'overdue' OR (status = 'sent' AND due_date < $2)
                ) AS overdue_count,
                COALESCE(SUM(total) FILTER (
                    WHERE status = 'overdue' OR (status = 'sent' AND due_date < $2)
                ), 0) AS overdue_amount
            FROM invoices
            WHERE created_by = $1
            "#,
        )
        .bind(user_id)
        .bind(today)
        .fetch_one(pool)
        .await?;

        Ok(summary)
    }
}
