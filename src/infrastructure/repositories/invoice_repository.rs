use crate::domain::invoice::{Invoice, InvoiceStatus};
use crate::error::{AppError, AppResult};
use crate::infrastructure::db::DbPool;
use std::sync::Arc;
use uuid::Uuid;

pub struct InvoiceRepository {
    pool: Arc<DbPool>,
}

impl InvoiceRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }

    /// Invoices of a user, most recent invoice date first
    pub async fn find_by_user(&self, user_id: Uuid) -> AppResult<Vec<Invoice>> {
        let pool = self.pool.as_ref();
        let invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT *
            FROM invoices
            WHERE created_by = $1
            ORDER BY invoice_date DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(invoices)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Invoice>> {
        let pool = self.pool.as_ref();
        let invoice = sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(invoice)
    }

    pub async fn invoice_id_exists(&self, invoice_id: &str) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM invoices WHERE invoice_id = $1)",
        )
        .bind(invoice_id)
        .fetch_one(pool)
        .await?;

        Ok(exists)
    }

    /// Highest sequence number issued under a month prefix such as `INV-202503-`
    pub async fn max_sequence(&self, prefix: &str) -> AppResult<Option<i32>> {
        let pool = self.pool.as_ref();
        let max = sqlx::query_scalar::<_, Option<i32>>(
            r#"
            SELECT MAX(CAST(SUBSTRING(invoice_id FROM LENGTH($1) + 1) AS INTEGER))
            FROM invoices
            WHERE invoice_id LIKE $1 || '%'
              AND invoice_id ~ '^INV-[0-9]{6}-[0-9]+$'
            "#,
        )
        .bind(prefix)
        .fetch_one(pool)
        .await?;

        Ok(max)
    }

    /// Insert an invoice. A taken `invoice_id` is reported as `Conflict`.
    pub async fn create(&self, invoice: &Invoice) -> AppResult<Invoice> {
        let pool = self.pool.as_ref();
        let created = sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (
                id, invoice_id, invoice_date, due_date, sender, client, items,
                subtotal, tax, discount, total, notes, terms, status,
                created_by, project_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            RETURNING *
            "#,
        )
        .bind(invoice.id)
        .bind(&invoice.invoice_id)
        .bind(invoice.invoice_date)
        .bind(invoice.due_date)
        .bind(&invoice.sender)
        .bind(&invoice.client)
        .bind(&invoice.items)
        .bind(invoice.subtotal)
        .bind(invoice.tax)
        .bind(invoice.discount)
        .bind(invoice.total)
        .bind(&invoice.notes)
        .bind(&invoice.terms)
        .bind(invoice.status)
        .bind(invoice.created_by)
        .bind(invoice.project_id)
        .bind(invoice.created_at)
        .bind(invoice.updated_at)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(invoice.invoice_id.clone());
                }
            }
            AppError::Database(e)
        })?;

        Ok(created)
    }

    /// Persist every editable field including recomputed totals
    pub async fn update(&self, invoice: &Invoice) -> AppResult<Invoice> {
        let pool = self.pool.as_ref();
        let updated = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices
            SET invoice_date = $1, due_date = $2, sender = $3, client = $4, items = $5,
                subtotal = $6, tax = $7, discount = $8, total = $9, notes = $10,
                terms = $11, status = $12, project_id = $13, updated_at = NOW()
            WHERE id = $14
            RETURNING *
            "#,
        )
        .bind(invoice.invoice_date)
        .bind(invoice.due_date)
        .bind(&invoice.sender)
        .bind(&invoice.client)
        .bind(&invoice.items)
        .bind(invoice.subtotal)
        .bind(invoice.tax)
        .bind(invoice.discount)
        .bind(invoice.total)
        .bind(&invoice.notes)
        .bind(&invoice.terms)
        .bind(invoice.status)
        .bind(invoice.project_id)
        .bind(invoice.id)
        .fetch_one(pool)
        .await?;

        Ok(updated)
    }

    pub async fn update_status(&self, id: Uuid, status: InvoiceStatus) -> AppResult<Invoice> {
        let pool = self.pool.as_ref();
        let updated = sqlx::query_as::<_, Invoice>(
            "UPDATE invoices SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(id)
        .fetch_one(pool)
        .await?;

        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let pool = self.pool.as_ref();
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
