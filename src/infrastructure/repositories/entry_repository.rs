use crate::domain::entry::Entry;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use std::sync::Arc;
use uuid::Uuid;

pub struct EntryRepository {
    pool: Arc<DbPool>,
}

impl EntryRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Entries of a user, latest session first
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        project_id: Option<Uuid>,
    ) -> AppResult<Vec<Entry>> {
        let pool = self.pool.as_ref();
        let entries = sqlx::query_as::<_, Entry>(
            r#"
            SELECT *
            FROM entries
            WHERE user_id = $1
              AND ($2::uuid IS NULL OR project_id = $2)
            ORDER BY start_time DESC
            "#,
        )
        .bind(user_id)
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(entries)
    }

    pub async fn find_by_id(&self, entry_id: Uuid) -> AppResult<Option<Entry>> {
        let pool = self.pool.as_ref();
        let entry = sqlx::query_as::<_, Entry>("SELECT * FROM entries WHERE id = $1")
            .bind(entry_id)
            .fetch_optional(pool)
            .await?;

        Ok(entry)
    }

    pub async fn create(&self, entry: &Entry) -> AppResult<Entry> {
        let pool = self.pool.as_ref();
        let created = sqlx::query_as::<_, Entry>(
            r#"
            INSERT INTO entries (id, description, duration, start_time, end_time, mode, project_id, user_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(entry.id)
        .bind(&entry.description)
        .bind(entry.duration)
        .bind(entry.start_time)
        .bind(entry.end_time)
        .bind(entry.mode)
        .bind(entry.project_id)
        .bind(entry.user_id)
        .bind(entry.created_at)
        .fetch_one(pool)
        .await?;

        Ok(created)
    }

    pub async fn delete(&self, entry_id: Uuid) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(entry_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
