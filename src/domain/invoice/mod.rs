pub mod calc;
pub mod error;
pub mod model;
pub mod number;
pub mod pdf;
pub mod service;

pub use calc::{calculate_totals, percent_of, price_items, to_money, InvoiceTotals, MAX_AMOUNT};
pub use error::InvoiceServiceError;
pub use model::{ClientDetails, Invoice, InvoiceItem, InvoiceStatus};
pub use number::{
    format_invoice_id, month_prefix, next_invoice_id, parse_invoice_id, MAX_SEQUENCE,
};
pub use pdf::{render_invoice_pdf, InvoiceTemplate, PdfRenderError};
pub use service::{InvoicePdf, InvoiceService, InvoiceServiceApi};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::user::CompanyDetails;

/// Invoice as returned by the API, with the derived tax and discount amounts
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub invoice_id: String,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    pub sender: CompanyDetails,
    pub client: ClientDetails,
    pub items: Vec<InvoiceItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub tax_amount: Decimal,
    pub discount_amount: Decimal,
    pub total: Decimal,
    pub notes: String,
    pub terms: String,
    pub status: InvoiceStatus,
    pub is_overdue: bool,
    pub project_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        let tax_amount = percent_of(invoice.subtotal, invoice.tax);
        let discount_amount = percent_of(invoice.subtotal, invoice.discount);
        let is_overdue = invoice.is_overdue(Utc::now().date_naive());
        Self {
            id: invoice.id,
            invoice_id: invoice.invoice_id,
            invoice_date: invoice.invoice_date,
            due_date: invoice.due_date,
            sender: invoice.sender.0,
            client: invoice.client.0,
            items: invoice.items.0,
            subtotal: invoice.subtotal,
            tax: invoice.tax,
            discount: invoice.discount,
            tax_amount,
            discount_amount,
            total: invoice.total,
            notes: invoice.notes,
            terms: invoice.terms,
            status: invoice.status,
            is_overdue,
            project_id: invoice.project_id,
            created_at: invoice.created_at,
            updated_at: invoice.updated_at,
        }
    }
}

/// Line item as submitted; any client-sent `total` is ignored and recomputed
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItemInput {
    pub feature: String,
    #[serde(default)]
    pub description: String,
    pub hours: Decimal,
    pub rate: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    /// Generated when absent
    pub invoice_id: Option<String>,
    /// Defaults to today (UTC)
    pub invoice_date: Option<NaiveDate>,
    pub due_date: NaiveDate,
    /// Defaults to the caller's company details
    pub sender: Option<CompanyDetails>,
    pub client: ClientDetails,
    pub items: Vec<InvoiceItemInput>,
    #[serde(default)]
    pub tax: Decimal,
    #[serde(default)]
    pub discount: Decimal,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub terms: String,
    #[serde(default)]
    pub status: InvoiceStatus,
    pub project_id: Option<Uuid>,
}

/// Partial invoice update; totals are recomputed from the resulting items
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvoiceRequest {
    pub invoice_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub sender: Option<CompanyDetails>,
    pub client: Option<ClientDetails>,
    pub items: Option<Vec<InvoiceItemInput>>,
    pub tax: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub notes: Option<String>,
    pub terms: Option<String>,
    pub status: Option<InvoiceStatus>,
    pub project_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceStatusRequest {
    pub status: InvoiceStatus,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextInvoiceIdResponse {
    pub invoice_id: String,
}

#[derive(Debug, Deserialize)]
pub struct PdfQuery {
    pub template: Option<String>,
}
