use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::user::CompanyDetails;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    pub id: Uuid,
    /// Human-facing number, `INV-YYYYMM-NNNN`
    pub invoice_id: String,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    pub sender: Json<CompanyDetails>,
    pub client: Json<ClientDetails>,
    pub items: Json<Vec<InvoiceItem>>,
    pub subtotal: Decimal,
    /// Percentage
    pub tax: Decimal,
    /// Percentage
    pub discount: Decimal,
    pub total: Decimal,
    pub notes: String,
    pub terms: String,
    pub status: InvoiceStatus,
    pub created_by: Uuid,
    pub project_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientDetails {
    pub name: String,
    pub email: Option<String>,
    pub company: Option<String>,
    pub address: Option<String>,
}

/// Priced line item; `total` is always hours × rate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceItem {
    pub feature: String,
    pub description: String,
    pub hours: Decimal,
    pub rate: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Overdue,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
        }
    }
}

impl Invoice {
    /// Explicitly marked overdue, or sent and past its due date
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        match self.status {
            InvoiceStatus::Overdue => true,
            InvoiceStatus::Sent => self.due_date < today,
            InvoiceStatus::Draft | InvoiceStatus::Paid => false,
        }
    }
}
