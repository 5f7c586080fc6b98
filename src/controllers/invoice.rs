use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Extension, Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use super::extract::{AppJson, AppPath, AppQuery};
use crate::domain::invoice::{
    CreateInvoiceRequest, InvoiceResponse, InvoiceTemplate, NextInvoiceIdResponse, PdfQuery,
    UpdateInvoiceRequest, UpdateInvoiceStatusRequest,
};
use crate::domain::shared::{ApiEnvelope, Empty};
use crate::{
    domain::invoice::{InvoiceService, InvoiceServiceApi},
    error::{AppError, AppResult},
    infrastructure::auth::AuthUser,
};

#[derive(Debug, Serialize)]
pub struct InvoicePayload {
    pub invoice: InvoiceResponse,
}

#[derive(Debug, Serialize)]
pub struct InvoiceListPayload {
    pub invoices: Vec<InvoiceResponse>,
}

pub struct InvoiceController {
    invoice_service: Arc<InvoiceService>,
}

impl InvoiceController {
    pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
        Self { invoice_service }
    }

    /// GET /api/invoices
    pub async fn list_invoices(
        State(controller): State<Arc<InvoiceController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Json<ApiEnvelope<InvoiceListPayload>>> {
        let invoices = controller
            .invoice_service
            .list_invoices(auth_user.user_id)
            .await?;
        Ok(Json(ApiEnvelope::success(
            "Invoices loaded",
            InvoiceListPayload { invoices },
        )))
    }

    /// POST /api/invoices
    pub async fn create_invoice(
        State(controller): State<Arc<InvoiceController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppJson(request): AppJson<CreateInvoiceRequest>,
    ) -> AppResult<(StatusCode, Json<ApiEnvelope<InvoicePayload>>)> {
        let invoice = controller
            .invoice_service
            .create_invoice(auth_user.user_id, request)
            .await?;
        Ok((
            StatusCode::CREATED,
            Json(ApiEnvelope::success("Invoice created", InvoicePayload { invoice })),
        ))
    }

    /// GET /api/invoices/next-id - Preview the next generated invoice id
    pub async fn next_invoice_id(
        State(controller): State<Arc<InvoiceController>>,
    ) -> AppResult<Json<ApiEnvelope<NextInvoiceIdResponse>>> {
        let invoice_id = controller.invoice_service.next_invoice_id().await?;
        Ok(Json(ApiEnvelope::success(
            "Next invoice id",
            NextInvoiceIdResponse { invoice_id },
        )))
    }

    /// GET /api/invoices/{id}
    pub async fn get_invoice(
        State(controller): State<Arc<InvoiceController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppPath(id): AppPath<Uuid>,
    ) -> AppResult<Json<ApiEnvelope<InvoicePayload>>> {
        let invoice = controller
            .invoice_service
            .get_invoice(auth_user.user_id, id)
            .await?;
        Ok(Json(ApiEnvelope::success("Invoice loaded", InvoicePayload { invoice })))
    }

    /// PUT /api/invoices/{id}
    pub async fn update_invoice(
        State(controller): State<Arc<InvoiceController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppPath(id): AppPath<Uuid>,
        AppJson(request): AppJson<UpdateInvoiceRequest>,
    ) -> AppResult<Json<ApiEnvelope<InvoicePayload>>> {
        let invoice = controller
            .invoice_service
            .update_invoice(auth_user.user_id, id, request)
            .await?;
        Ok(Json(ApiEnvelope::success("Invoice updated", InvoicePayload { invoice })))
    }

    /// PATCH /api/invoices/{id}/status
    pub async fn update_invoice_status(
        State(controller): State<Arc<InvoiceController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppPath(id): AppPath<Uuid>,
        AppJson(request): AppJson<UpdateInvoiceStatusRequest>,
    ) -> AppResult<Json<ApiEnvelope<InvoicePayload>>> {
        let invoice = controller
            .invoice_service
            .update_invoice_status(auth_user.user_id, id, request.status)
            .await?;
        Ok(Json(ApiEnvelope::success(
            "Invoice status updated",
            InvoicePayload { invoice },
        )))
    }

    /// DELETE /api/invoices/{id}
    pub async fn delete_invoice(
        State(controller): State<Arc<InvoiceController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppPath(id): AppPath<Uuid>,
    ) -> AppResult<Json<ApiEnvelope<Empty>>> {
        controller
            .invoice_service
            .delete_invoice(auth_user.user_id, id)
            .await?;
        Ok(Json(ApiEnvelope::message("Invoice deleted")))
    }

    /// GET /api/invoices/{id}/pdf?template= - Download as PDF
    pub async fn download_pdf(
        State(controller): State<Arc<InvoiceController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppPath(id): AppPath<Uuid>,
        AppQuery(query): AppQuery<PdfQuery>,
    ) -> AppResult<impl IntoResponse> {
        let template = match query.template.as_deref() {
            Some(name) => name
                .parse::<InvoiceTemplate>()
                .map_err(AppError::BadRequest)?,
            None => InvoiceTemplate::default(),
        };

        let pdf = controller
            .invoice_service
            .render_pdf(auth_user.user_id, id, template)
            .await?;

        Ok((
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", pdf.file_name),
                ),
            ],
            pdf.bytes,
        ))
    }
}
