use super::{secret_matches, subscription_change, WebhookEvent, WebhookOutcome};
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::UserRepository;
use std::sync::Arc;

/// Applies payment provider events to user subscriptions
pub struct BillingService {
    user_repo: Arc<UserRepository>,
    webhook_secret: Option<String>,
}

impl BillingService {
    pub fn new(user_repo: Arc<UserRepository>, webhook_secret: Option<String>) -> Self {
        Self {
            user_repo,
            webhook_secret,
        }
    }

    /// Reject the call when a secret is configured and the header does not carry it
    pub fn authorize(&self, provided: Option<&str>) -> AppResult<()> {
        match (&self.webhook_secret, provided) {
            (None, _) => Ok(()),
            (Some(expected), Some(provided)) if secret_matches(expected, provided) => Ok(()),
            (Some(_), _) => {
                tracing::warn!("Webhook rejected: missing or wrong secret");
                Err(AppError::Unauthorized("Invalid webhook secret".to_string()))
            }
        }
    }

    pub async fn handle_event(&self, event: WebhookEvent) -> AppResult<WebhookOutcome> {
        let Some((is_pro, status)) = subscription_change(&event.event) else {
            tracing::info!(event = %event.event, "Ignoring webhook event");
            return Ok(WebhookOutcome {
                event: event.event,
                applied: false,
            });
        };

        let email = event.data.email.trim();
        if email.is_empty() {
            return Err(AppError::BadRequest("Event carries no email".to_string()));
        }

        let user = self
            .user_repo
            .set_subscription_by_email(email, is_pro, status)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        tracing::info!(
            user_id = %user.id,
            event = %event.event,
            is_pro,
            status = %status,
            "Subscription updated"
        );

        Ok(WebhookOutcome {
            event: event.event,
            applied: true,
        })
    }
}
