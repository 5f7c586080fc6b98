use super::error::InvoiceServiceError;
use super::{
    calculate_totals, month_prefix, next_invoice_id, parse_invoice_id, price_items,
    render_invoice_pdf, ClientDetails, CreateInvoiceRequest, Invoice, InvoiceItem,
    InvoiceItemInput, InvoiceResponse, InvoiceStatus, InvoiceTemplate, InvoiceTotals,
    UpdateInvoiceRequest, MAX_AMOUNT,
};
use crate::error::AppError;
use crate::infrastructure::repositories::{InvoiceRepository, ProjectRepository, UserRepository};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use std::sync::Arc;
use uuid::Uuid;

/// Retries when a generated id races with a concurrent insert
const MAX_ID_ATTEMPTS: usize = 3;

pub struct InvoiceService {
    invoice_repo: Arc<InvoiceRepository>,
    user_repo: Arc<UserRepository>,
    project_repo: Arc<ProjectRepository>,
}

impl InvoiceService {
    pub fn new(
        invoice_repo: Arc<InvoiceRepository>,
        user_repo: Arc<UserRepository>,
        project_repo: Arc<ProjectRepository>,
    ) -> Self {
        Self {
            invoice_repo,
            user_repo,
            project_repo,
        }
    }
}

/// Rendered document ready to be streamed as a download
pub struct InvoicePdf {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait InvoiceServiceApi: Send + Sync {
    async fn list_invoices(&self, user_id: Uuid)
        -> Result<Vec<InvoiceResponse>, InvoiceServiceError>;

    async fn get_invoice(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<InvoiceResponse, InvoiceServiceError>;

    async fn create_invoice(
        &self,
        user_id: Uuid,
        request: CreateInvoiceRequest,
    ) -> Result<InvoiceResponse, InvoiceServiceError>;

    async fn update_invoice(
        &self,
        user_id: Uuid,
        id: Uuid,
        request: UpdateInvoiceRequest,
    ) -> Result<InvoiceResponse, InvoiceServiceError>;

    async fn update_invoice_status(
        &self,
        user_id: Uuid,
        id: Uuid,
        status: InvoiceStatus,
    ) -> Result<InvoiceResponse, InvoiceServiceError>;

    async fn delete_invoice(&self, user_id: Uuid, id: Uuid) -> Result<(), InvoiceServiceError>;

    /// Id the next invoice created this month would receive
    async fn next_invoice_id(&self) -> Result<String, InvoiceServiceError>;

    async fn render_pdf(
        &self,
        user_id: Uuid,
        id: Uuid,
        template: InvoiceTemplate,
    ) -> Result<InvoicePdf, InvoiceServiceError>;
}

#[async_trait]
impl InvoiceServiceApi for InvoiceService {
    async fn list_invoices(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<InvoiceResponse>, InvoiceServiceError> {
        let invoices = self
            .invoice_repo
            .find_by_user(user_id)
            .await
            .map_err(|e| InvoiceServiceError::Dependency(e.to_string()))?;
        Ok(invoices.into_iter().map(InvoiceResponse::from).collect())
    }

    async fn get_invoice(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<InvoiceResponse, InvoiceServiceError> {
        let invoice = self.verify_invoice_ownership(id, user_id).await?;
        Ok(InvoiceResponse::from(invoice))
    }

    async fn create_invoice(
        &self,
        user_id: Uuid,
        request: CreateInvoiceRequest,
    ) -> Result<InvoiceResponse, InvoiceServiceError> {
        let today = Utc::now().date_naive();
        let invoice_date = request.invoice_date.unwrap_or(today);
        validate_invoice(
            &request.client,
            &request.items,
            request.tax,
            request.discount,
            invoice_date,
            request.due_date,
        )
        .map_err(InvoiceServiceError::Invalid)?;

        if let Some(project_id) = request.project_id {
            self.verify_project_ownership(project_id, user_id).await?;
        }

        let sender = match request.sender {
            Some(sender) => sender,
            None => {
                self.user_repo
                    .find_by_id(user_id)
                    .await
                    .map_err(|e| InvoiceServiceError::Dependency(e.to_string()))?
                    .map(|user| user.company_details.0)
                    .unwrap_or_default()
            }
        };

        let (items, totals) = price_invoice(&request.items, request.tax, request.discount)?;
        let now = Utc::now();
        let mut invoice = Invoice {
            id: Uuid::new_v4(),
            invoice_id: String::new(),
            invoice_date,
            due_date: request.due_date,
            sender: Json(sender),
            client: Json(trim_client(request.client)),
            items: Json(items),
            subtotal: totals.subtotal,
            tax: request.tax,
            discount: request.discount,
            total: totals.total,
            notes: request.notes.trim().to_string(),
            terms: request.terms.trim().to_string(),
            status: request.status,
            created_by: user_id,
            project_id: request.project_id,
            created_at: now,
            updated_at: now,
        };

        let created = match request.invoice_id {
            Some(invoice_id) => {
                let invoice_id = invoice_id.trim().to_string();
                if parse_invoice_id(&invoice_id).is_none() {
                    return Err(InvoiceServiceError::Invalid(
                        "Invoice id must look like INV-YYYYMM-NNNN".to_string(),
                    ));
                }
                if self
                    .invoice_repo
                    .invoice_id_exists(&invoice_id)
                    .await
                    .map_err(|e| InvoiceServiceError::Dependency(e.to_string()))?
                {
                    return Err(InvoiceServiceError::DuplicateId(invoice_id));
                }
                invoice.invoice_id = invoice_id;
                self.insert(&invoice).await?
            }
            None => self.insert_with_generated_id(&mut invoice).await?,
        };

        tracing::info!(
            user_id = %user_id,
            invoice_id = %created.invoice_id,
            total = %created.total,
            "Invoice created"
        );

        Ok(InvoiceResponse::from(created))
    }

    async fn update_invoice(
        &self,
        user_id: Uuid,
        id: Uuid,
        request: UpdateInvoiceRequest,
    ) -> Result<InvoiceResponse, InvoiceServiceError> {
        let mut invoice = self.verify_invoice_ownership(id, user_id).await?;

        if let Some(project_id) = request.project_id {
            self.verify_project_ownership(project_id, user_id).await?;
            invoice.project_id = Some(project_id);
        }
        if let Some(invoice_date) = request.invoice_date {
            invoice.invoice_date = invoice_date;
        }
        if let Some(due_date) = request.due_date {
            invoice.due_date = due_date;
        }
        if let Some(sender) = request.sender {
            invoice.sender = Json(sender);
        }
        if let Some(client) = request.client {
            invoice.client = Json(trim_client(client));
        }
        if let Some(tax) = request.tax {
            invoice.tax = tax;
        }
        if let Some(discount) = request.discount {
            invoice.discount = discount;
        }
        if let Some(notes) = request.notes {
            invoice.notes = notes.trim().to_string();
        }
        if let Some(terms) = request.terms {
            invoice.terms = terms.trim().to_string();
        }
        if let Some(status) = request.status {
            invoice.status = status;
        }

        let inputs: Vec<InvoiceItemInput> = match request.items {
            Some(items) => items,
            None => invoice
                .items
                .0
                .iter()
                .map(|item| InvoiceItemInput {
                    feature: item.feature.clone(),
                    description: item.description.clone(),
                    hours: item.hours,
                    rate: item.rate,
                })
                .collect(),
        };
        validate_invoice(
            &invoice.client.0,
            &inputs,
            invoice.tax,
            invoice.discount,
            invoice.invoice_date,
            invoice.due_date,
        )
        .map_err(InvoiceServiceError::Invalid)?;

        let (items, totals) = price_invoice(&inputs, invoice.tax, invoice.discount)?;
        invoice.items = Json(items);
        invoice.subtotal = totals.subtotal;
        invoice.total = totals.total;

        let updated = self
            .invoice_repo
            .update(&invoice)
            .await
            .map_err(|e| InvoiceServiceError::Dependency(e.to_string()))?;

        Ok(InvoiceResponse::from(updated))
    }

    async fn update_invoice_status(
        &self,
        user_id: Uuid,
        id: Uuid,
        status: InvoiceStatus,
    ) -> Result<InvoiceResponse, InvoiceServiceError> {
        let invoice = self.verify_invoice_ownership(id, user_id).await?;

        let updated = self
            .invoice_repo
            .update_status(invoice.id, status)
            .await
            .map_err(|e| InvoiceServiceError::Dependency(e.to_string()))?;

        tracing::info!(
            invoice_id = %updated.invoice_id,
            from = invoice.status.as_str(),
            to = status.as_str(),
            "Invoice status changed"
        );

        Ok(InvoiceResponse::from(updated))
    }

    async fn delete_invoice(&self, user_id: Uuid, id: Uuid) -> Result<(), InvoiceServiceError> {
        self.verify_invoice_ownership(id, user_id).await?;

        let deleted = self
            .invoice_repo
            .delete(id)
            .await
            .map_err(|e| InvoiceServiceError::Dependency(e.to_string()))?;
        if !deleted {
            return Err(InvoiceServiceError::NotFound);
        }

        Ok(())
    }

    async fn next_invoice_id(&self) -> Result<String, InvoiceServiceError> {
        let today = Utc::now().date_naive();
        let last = self.last_sequence(today).await?;
        next_invoice_id(today, last)
            .ok_or_else(|| InvoiceServiceError::SequenceExhausted(month_prefix(today)))
    }

    async fn render_pdf(
        &self,
        user_id: Uuid,
        id: Uuid,
        template: InvoiceTemplate,
    ) -> Result<InvoicePdf, InvoiceServiceError> {
        let invoice = self.verify_invoice_ownership(id, user_id).await?;

        let bytes = tokio::task::spawn_blocking(move || {
            render_invoice_pdf(&invoice, template).map(|bytes| InvoicePdf {
                file_name: format!("{}.pdf", invoice.invoice_id),
                bytes,
            })
        })
        .await
        .map_err(|e| InvoiceServiceError::Other(e.into()))??;

        tracing::debug!(file = %bytes.file_name, size = bytes.bytes.len(), "Invoice PDF rendered");

        Ok(bytes)
    }
}

impl InvoiceService {
    async fn last_sequence(&self, date: NaiveDate) -> Result<Option<u32>, InvoiceServiceError> {
        let max = self
            .invoice_repo
            .max_sequence(&month_prefix(date))
            .await
            .map_err(|e| InvoiceServiceError::Dependency(e.to_string()))?;
        Ok(max.and_then(|n| u32::try_from(n).ok()))
    }

    async fn insert(&self, invoice: &Invoice) -> Result<Invoice, InvoiceServiceError> {
        self.invoice_repo.create(invoice).await.map_err(|e| match e {
            AppError::Conflict(id) => InvoiceServiceError::DuplicateId(id),
            other => InvoiceServiceError::Dependency(other.to_string()),
        })
    }

    async fn insert_with_generated_id(
        &self,
        invoice: &mut Invoice,
    ) -> Result<Invoice, InvoiceServiceError> {
        let issued_on = Utc::now().date_naive();
        let mut last_error = None;

        for _ in 0..MAX_ID_ATTEMPTS {
            let last = self.last_sequence(issued_on).await?;
            invoice.invoice_id = next_invoice_id(issued_on, last)
                .ok_or_else(|| InvoiceServiceError::SequenceExhausted(month_prefix(issued_on)))?;

            match self.insert(invoice).await {
                Err(InvoiceServiceError::DuplicateId(id)) => {
                    tracing::warn!(invoice_id = %id, "Generated invoice id taken, retrying");
                    last_error = Some(InvoiceServiceError::DuplicateId(id));
                }
                result => return result,
            }
        }

        Err(last_error
            .unwrap_or_else(|| InvoiceServiceError::DuplicateId(invoice.invoice_id.clone())))
    }

    async fn verify_project_ownership(
        &self,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), InvoiceServiceError> {
        let project = self
            .project_repo
            .find_by_id(project_id)
            .await
            .map_err(|e| InvoiceServiceError::Dependency(e.to_string()))?
            .ok_or(InvoiceServiceError::ProjectNotFound)?;

        if project.created_by != user_id {
            return Err(InvoiceServiceError::Forbidden(
                "You are not allowed to access this project".to_string(),
            ));
        }

        Ok(())
    }

    async fn verify_invoice_ownership(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Invoice, InvoiceServiceError> {
        let invoice = self
            .invoice_repo
            .find_by_id(id)
            .await
            .map_err(|e| InvoiceServiceError::Dependency(e.to_string()))?
            .ok_or(InvoiceServiceError::NotFound)?;

        if invoice.created_by != user_id {
            return Err(InvoiceServiceError::Forbidden(
                "You are not allowed to access this invoice".to_string(),
            ));
        }

        Ok(invoice)
    }
}

fn trim_client(client: ClientDetails) -> ClientDetails {
    ClientDetails {
        name: client.name.trim().to_string(),
        ..client
    }
}

fn price_invoice(
    inputs: &[InvoiceItemInput],
    tax: Decimal,
    discount: Decimal,
) -> Result<(Vec<InvoiceItem>, InvoiceTotals), InvoiceServiceError> {
    let items = price_items(inputs).map_err(InvoiceServiceError::Invalid)?;
    let totals = calculate_totals(&items, tax, discount).map_err(InvoiceServiceError::Invalid)?;
    Ok((items, totals))
}

fn validate_invoice(
    client: &ClientDetails,
    items: &[InvoiceItemInput],
    tax: Decimal,
    discount: Decimal,
    invoice_date: NaiveDate,
    due_date: NaiveDate,
) -> Result<(), String> {
    if client.name.trim().is_empty() {
        return Err("Client name is required".to_string());
    }
    if items.is_empty() {
        return Err("An invoice needs at least one item".to_string());
    }
    for (idx, item) in items.iter().enumerate() {
        if item.feature.trim().is_empty() {
            return Err(format!("Item {} needs a name", idx + 1));
        }
        if item.hours.is_sign_negative() || item.rate.is_sign_negative() {
            return Err(format!("Item {} has negative hours or rate", idx + 1));
        }
        if item.hours > MAX_AMOUNT || item.rate > MAX_AMOUNT {
            return Err(format!("Item {} has hours or rate out of range", idx + 1));
        }
    }
    let percent = Decimal::ZERO..=Decimal::ONE_HUNDRED;
    if !percent.contains(&tax) {
        return Err("Tax must be between 0 and 100".to_string());
    }
    if !percent.contains(&discount) {
        return Err("Discount must be between 0 and 100".to_string());
    }
    // Percentages are stored as NUMERIC(5, 2); totals must come from the stored value
    if tax.normalize().scale() > 2 {
        return Err("Tax may have at most 2 decimal places".to_string());
    }
    if discount.normalize().scale() > 2 {
        return Err("Discount may have at most 2 decimal places".to_string());
    }
    if due_date < invoice_date {
        return Err("Due date cannot be before the invoice date".to_string());
    }
    Ok(())
}
