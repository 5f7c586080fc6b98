use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct RefreshTokenRecord {
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
}

impl RefreshTokenRecord {
    pub fn is_usable(&self) -> bool {
        !self.revoked && self.expires_at > Utc::now()
    }
}

pub struct RefreshTokenRepository {
    pool: Arc<DbPool>,
}

impl RefreshTokenRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Persist an issued refresh token
    pub async fn create(
        &self,
        user_id: Uuid,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (id, user_id, token, expires_at, created_at, revoked)
            VALUES ($1, $2, $3, $4, NOW(), FALSE)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(token)
        .bind(expires_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Look up a refresh token regardless of its state
    pub async fn find(&self, token: &str) -> AppResult<Option<RefreshTokenRecord>> {
        let pool = self.pool.as_ref();
        let record = sqlx::query_as::<_, RefreshTokenRecord>(
            r#"
            SELECT user_id, expires_at, revoked
            FROM refresh_tokens
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Revoke `old_token` and store `new_token` in one transaction
    pub async fn rotate(
        &self,
        old_token: &str,
        user_id: Uuid,
        new_token: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE token = $1")
            .bind(old_token)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (id, user_id, token, expires_at, created_at, revoked)
            VALUES ($1, $2, $3, $4, NOW(), FALSE)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(new_token)
        .bind(expires_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Revoke a refresh token
    pub async fn revoke(&self, token: &str) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked = TRUE
            WHERE token = $1 AND NOT revoked
            "#,
        )
        .bind(token)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Revoke every live refresh token of a user
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> AppResult<u64> {
        let pool = self.pool.as_ref();
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked = TRUE
            WHERE user_id = $1 AND NOT revoked
            "#,
        )
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}
