use crate::domain::shared::Priority;
use crate::domain::task::{Task, TaskStatus};
use crate::error::AppResult;
use crate::infrastructure::db::DbPool;
use std::sync::Arc;
use uuid::Uuid;

pub struct TaskRepository {
    pool: Arc<DbPool>,
}

impl TaskRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Tasks created by a user, optionally restricted to one project
    pub async fn find_by_user(
        &self,
        user_id: Uuid,
        project_id: Option<Uuid>,
    ) -> AppResult<Vec<Task>> {
        let pool = self.pool.as_ref();
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT *
            FROM tasks
            WHERE created_by = $1
              AND ($2::uuid IS NULL OR project_id = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    pub async fn find_by_project(&self, project_id: Uuid) -> AppResult<Vec<Task>> {
        let pool = self.pool.as_ref();
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT *
            FROM tasks
            WHERE project_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    pub async fn find_by_id(&self, task_id: Uuid) -> AppResult<Option<Task>> {
        let pool = self.pool.as_ref();
        let task = sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1")
            .bind(task_id)
            .fetch_optional(pool)
            .await?;

        Ok(task)
    }

    pub async fn create(&self, task: &Task) -> AppResult<Task> {
        let pool = self.pool.as_ref();
        let created = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (id, title, description, due_date, status, priority, project_id, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.status)
        .bind(task.priority)
        .bind(task.project_id)
        .bind(task.created_by)
        .bind(task.created_at)
        .bind(task.updated_at)
        .fetch_one(pool)
        .await?;

        Ok(created)
    }

    /// Insert several tasks in one transaction
    pub async fn create_many(&self, tasks: &[Task]) -> AppResult<Vec<Task>> {
        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(tasks.len());

        for task in tasks {
            let row = sqlx::query_as::<_, Task>(
                r#"
                INSERT INTO tasks (id, title, description, due_date, status, priority, project_id, created_by, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING *
                "#,
            )
            .bind(task.id)
            .bind(&task.title)
            .bind(&task.description)
            .bind(task.due_date)
            .bind(task.status)
            .bind(task.priority)
            .bind(task.project_id)
            .bind(task.created_by)
            .bind(task.created_at)
            .bind(task.updated_at)
            .fetch_one(&mut *tx)
            .await?;
            created.push(row);
        }

        tx.commit().await?;
        Ok(created)
    }

    pub async fn update(&self, task: &Task) -> AppResult<Task> {
        let pool = self.pool.as_ref();
        let updated = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = $1, description = $2, due_date = $3, status = $4,
                priority = $5, updated_at = NOW()
            WHERE id = $6
            RETURNING *
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.status)
        .bind(task.priority)
        .bind(task.id)
        .fetch_one(pool)
        .await?;

        Ok(updated)
    }

    pub async fn update_status(&self, task_id: Uuid, status: TaskStatus) -> AppResult<Task> {
        let pool = self.pool.as_ref();
        let updated = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(task_id)
        .fetch_one(pool)
        .await?;

        Ok(updated)
    }

    /// Apply priorities to tasks owned by `user_id`; other ids are skipped
    pub async fn update_priorities(
        &self,
        user_id: Uuid,
        updates: &[(Uuid, Priority)],
    ) -> AppResult<Vec<Task>> {
        let mut tx = self.pool.begin().await?;
        let mut updated = Vec::with_capacity(updates.len());

        for (task_id, priority) in updates {
            let row = sqlx::query_as::<_, Task>(
                r#"
                UPDATE tasks
                SET priority = $1, updated_at = NOW()
                WHERE id = $2 AND created_by = $3
                RETURNING *
                "#,
            )
            .bind(priority)
            .bind(task_id)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

            if let Some(task) = row {
                updated.push(task);
            }
        }

        tx.commit().await?;
        Ok(updated)
    }

    pub async fn delete(&self, task_id: Uuid) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(task_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// (completed, total) task counts of a project
    pub async fn count_completion(&self, project_id: Uuid) -> AppResult<(i64, i64)> {
        let pool = self.pool.as_ref();
        let counts = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT COUNT(*) FILTER (WHERE status = 'completed'), COUNT(*)
            FROM tasks
            WHERE project_id = $1
            "#,
        )
        .bind(project_id)
        .fetch_one(pool)
        .await?;

        Ok(counts)
    }
}
