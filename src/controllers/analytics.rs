use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::domain::analytics::{HoursByDayResponse, InvoiceSummary, MinutesByProjectResponse};
use crate::domain::shared::ApiEnvelope;
use crate::{domain::analytics::AnalyticsService, error::AppResult, infrastructure::auth::AuthUser};

pub struct AnalyticsController {
    analytics_service: Arc<AnalyticsService>,
}

impl AnalyticsController {
    pub fn new(analytics_service: Arc<AnalyticsService>) -> Self {
        Self { analytics_service }
    }

    /// GET /api/analytics/hours-by-day
    pub async fn hours_by_day(
        State(controller): State<Arc<AnalyticsController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Json<ApiEnvelope<HoursByDayResponse>>> {
        let data = controller
            .analytics_service
            .hours_by_day(auth_user.user_id)
            .await?;
        Ok(Json(ApiEnvelope::success("Hours by day", data)))
    }

    /// GET /api/analytics/minutes-by-project
    pub async fn minutes_by_project(
        State(controller): State<Arc<AnalyticsController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Json<ApiEnvelope<MinutesByProjectResponse>>> {
        let data = controller
            .analytics_service
            .minutes_by_project(auth_user.user_id)
            .await?;
        Ok(Json(ApiEnvelope::success("Minutes by project", data)))
    }

    /// GET /api/analytics/invoices
    pub async fn invoice_summary(
        State(controller): State<Arc<AnalyticsController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Json<ApiEnvelope<InvoiceSummary>>> {
        let data = controller
            .analytics_service
            .invoice_summary(auth_user.user_id)
            .await?;
        Ok(Json(ApiEnvelope::success("Invoice summary", data)))
    }
}
