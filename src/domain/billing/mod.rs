pub mod service;

pub use service::BillingService;

use serde::{Deserialize, Serialize};

use crate::domain::user::SubscriptionStatus;

pub const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

/// Payment provider notification
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    pub event: String,
    pub data: WebhookData,
}

#[derive(Debug, Deserialize)]
pub struct WebhookData {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookOutcome {
    pub event: String,
    /// False when the event type is not one we act on
    pub applied: bool,
}

/// New (is_pro, status) for an event, `None` for events that do not touch the subscription
pub fn subscription_change(event: &str) -> Option<(bool, SubscriptionStatus)> {
    match event {
        "order.completed"
        | "subscription.created"
        | "subscription.activated"
        | "subscription.renewed"
        | "subscription.resumed" => Some((true, SubscriptionStatus::Active)),
        "order.refunded" => Some((false, SubscriptionStatus::Refunded)),
        "subscription.cancelled" => Some((false, SubscriptionStatus::Cancelled)),
        "subscription.expired" => Some((false, SubscriptionStatus::Expired)),
        "subscription.paused" => Some((false, SubscriptionStatus::Paused)),
        _ => None,
    }
}

/// Compare the shared secret without short-circuiting on the first differing byte
pub fn secret_matches(expected: &str, provided: &str) -> bool {
    let (a, b) = (expected.as_bytes(), provided.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
