use axum::{extract::State, http::HeaderMap, Json};
use std::sync::Arc;

use super::extract::AppJson;
use crate::domain::billing::{WebhookEvent, WebhookOutcome, WEBHOOK_SECRET_HEADER};
use crate::domain::shared::ApiEnvelope;
use crate::{domain::billing::BillingService, error::AppResult};

pub struct WebhookController {
    billing_service: Arc<BillingService>,
}

impl WebhookController {
    pub fn new(billing_service: Arc<BillingService>) -> Self {
        Self { billing_service }
    }

    /// POST /api/webhook - Payment provider notifications
    pub async fn handle(
        State(controller): State<Arc<WebhookController>>,
        headers: HeaderMap,
        AppJson(event): AppJson<WebhookEvent>,
    ) -> AppResult<Json<ApiEnvelope<WebhookOutcome>>> {
        let secret = headers
            .get(WEBHOOK_SECRET_HEADER)
            .and_then(|v| v.to_str().ok());
        controller.billing_service.authorize(secret)?;

        let outcome = controller.billing_service.handle_event(event).await?;
        let message = if outcome.applied {
            "Webhook processed"
        } else {
            "Event ignored"
        };
        Ok(Json(ApiEnvelope::success(message, outcome)))
    }
}
