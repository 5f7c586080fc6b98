use crate::infrastructure::db::{check_connection, DbPool};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Readiness {
    pub status: &'static str,
    pub database: &'static str,
    pub latency_ms: u128,
}

/// GET /health - liveness, never touches the database
pub async fn health() -> &'static str {
    "OK"
}

/// GET /health/ready - 503 while the database cannot be reached
pub async fn health_ready(State(pool): State<Arc<DbPool>>) -> impl IntoResponse {
    let started = Instant::now();
    let probe = check_connection(&pool).await;
    let latency_ms = started.elapsed().as_millis();

    if let Err(e) = probe {
        tracing::warn!(error = %e, latency_ms, "Readiness probe failed");
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(Readiness {
                status: "not_ready",
                database: "disconnected",
                latency_ms,
            }),
        );
    }

    (
        StatusCode::OK,
        Json(Readiness {
            status: "ready",
            database: "connected",
            latency_ms,
        }),
    )
}
