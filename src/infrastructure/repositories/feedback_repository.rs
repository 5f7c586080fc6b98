use crate::domain::feedback::Feedback;
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use std::sync::Arc;

pub struct FeedbackRepository {
    pool: Arc<DbPool>,
}

impl FeedbackRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    pub async fn create(&self, feedback: &Feedback) -> AppResult<Feedback> {
        let pool = self.pool.as_ref();
        let created = sqlx::query_as::<_, Feedback>(
            r#"
            INSERT INTO feedback (id, type, name, message, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(feedback.id)
        .bind(feedback.kind)
        .bind(&feedback.name)
        .bind(&feedback.message)
        .bind(feedback.created_at)
        .fetch_one(pool)
        .await?;

        Ok(created)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Feedback>> {
        let pool = self.pool.as_ref();
        let feedback =
            sqlx::query_as::<_, Feedback>("SELECT * FROM feedback ORDER BY created_at DESC")
                .fetch_all(pool)
                .await?;

        Ok(feedback)
    }
}
