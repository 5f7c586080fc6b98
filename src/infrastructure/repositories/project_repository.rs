use crate::infrastructure::db::DbPool;
use crate::{domain::project::Project, error::AppResult};
use std::sync::Arc;
use uuid::Uuid;

pub struct ProjectRepository {
    pool: Arc<DbPool>,
}

impl ProjectRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Get all projects created by a user, newest first
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Project>> {
        let pool = self.pool.as_ref();
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT *
            FROM projects
            WHERE created_by = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(projects)
    }

    /// Get a project by ID
    pub async fn find_by_id(&self, project_id: Uuid) -> AppResult<Option<Project>> {
        let pool = self.pool.as_ref();
        let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(project_id)
            .fetch_optional(pool)
            .await?;

        Ok(project)
    }

    pub async fn create(&self, project: &Project) -> AppResult<Project> {
        let pool = self.pool.as_ref();
        let created = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (id, title, description, due_date, status, priority, tags, progress, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(project.id)
        .bind(&project.title)
        .bind(&project.description)
        .bind(project.due_date)
        .bind(project.status)
        .bind(project.priority)
        .bind(&project.tags)
        .bind(project.progress)
        .bind(project.created_by)
        .bind(project.created_at)
        .bind(project.updated_at)
        .fetch_one(pool)
        .await?;

        Ok(created)
    }

    /// Persist editable fields; progress is owned by `set_progress`
    pub async fn update(&self, project: &Project) -> AppResult<Project> {
        let pool = self.pool.as_ref();
        let updated = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET title = $1, description = $2, due_date = $3, status = $4,
                priority = $5, tags = $6, updated_at = NOW()
            WHERE id = $7
            RETURNING *
            "#,
        )
        .bind(&project.title)
        .bind(&project.description)
        .bind(project.due_date)
        .bind(project.status)
        .bind(project.priority)
        .bind(&project.tags)
        .bind(project.id)
        .fetch_one(pool)
        .await?;

        Ok(updated)
    }

    pub async fn set_progress(&self, project_id: Uuid, progress: i32) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query("UPDATE projects SET progress = $1, updated_at = NOW() WHERE id = $2")
            .bind(progress)
            .bind(project_id)
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Delete a project. Tasks, entries and invoices are left in place.
    pub async fn delete(&self, project_id: Uuid) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(project_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
