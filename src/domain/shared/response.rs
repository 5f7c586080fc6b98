use serde::{Deserialize, Serialize};

/// Discriminator carried by every response body so clients can pick a toast style
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Success,
    Error,
}

/// `{type: "success", message, ...payload}` with the payload fields flattened in
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(rename = "type")]
    pub kind: ResponseType,
    pub message: String,
    #[serde(flatten)]
    pub payload: T,
}

impl<T> ApiEnvelope<T> {
    pub fn success(message: impl Into<String>, payload: T) -> Self {
        Self {
            kind: ResponseType::Success,
            message: message.into(),
            payload,
        }
    }
}

impl ApiEnvelope<Empty> {
    pub fn message(message: impl Into<String>) -> Self {
        Self::success(message, Empty {})
    }
}

/// Payload for envelopes that only carry a message
#[derive(Debug, Serialize, Deserialize)]
pub struct Empty {}

/// `{type: "error", message}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(rename = "type")]
    pub kind: ResponseType,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            kind: ResponseType::Error,
            message: message.into(),
        }
    }
}
