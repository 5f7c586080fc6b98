use crate::infrastructure::db::DbPool;
use crate::{
    domain::user::{CompanyDetails, SubscriptionStatus, User},
    error::{AppError, AppResult},
};
use sqlx::types::Json;
use std::sync::Arc;
use uuid::Uuid;

pub struct UserRepository {
    pool: Arc<DbPool>,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Find user by ID
    pub async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let pool = self.pool.as_ref();
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Find user by email (case-insensitive)
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let pool = self.pool.as_ref();
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(pool)
            .await?;

        Ok(user)
    }

    /// Create a new user with an already hashed password
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        ai_limit: i32,
    ) -> AppResult<User> {
        let pool = self.pool.as_ref();
        let id = Uuid::new_v4();
        let now = chrono::Utc::now();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash, is_admin, ai_limit, is_pro, subscription_status, company_details, created_at, updated_at)
            VALUES ($1, $2, $3, $4, FALSE, $5, FALSE, 'inactive', '{}'::jsonb, $6, $6)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(ai_limit)
        .bind(now)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict("Email already registered".to_string());
                }
            }
            AppError::Database(e)
        })?;

        Ok(user)
    }

    /// Update display name
    pub async fn update_name(&self, user_id: Uuid, name: &str) -> AppResult<User> {
        let pool = self.pool.as_ref();
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $1, updated_at = $2
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(chrono::Utc::now())
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Replace company details
    pub async fn update_company_details(
        &self,
        user_id: Uuid,
        details: &CompanyDetails,
    ) -> AppResult<User> {
        let pool = self.pool.as_ref();
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET company_details = $1, updated_at = $2
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(Json(details))
        .bind(chrono::Utc::now())
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }

    /// Spend one AI credit. Returns the remaining credits, or `None` when the
    /// user had none left.
    pub async fn consume_ai_credit(&self, user_id: Uuid) -> AppResult<Option<i32>> {
        let pool = self.pool.as_ref();
        let remaining = sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE users
            SET ai_limit = ai_limit - 1, updated_at = NOW()
            WHERE id = $1 AND ai_limit > 0
            RETURNING ai_limit
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(remaining)
    }

    /// Update Pro flag and subscription status for the account with this email
    pub async fn set_subscription_by_email(
        &self,
        email: &str,
        is_pro: bool,
        status: SubscriptionStatus,
    ) -> AppResult<Option<User>> {
        let pool = self.pool.as_ref();
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET is_pro = $1, subscription_status = $2, updated_at = NOW()
            WHERE LOWER(email) = LOWER($3)
            RETURNING *
            "#,
        )
        .bind(is_pro)
        .bind(status)
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}
