use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use super::extract::AppJson;
use crate::domain::shared::ApiEnvelope;
use crate::domain::user::{CompanyDetails, MeResponse, UpdateMeRequest};
use crate::{domain::user::UserService, error::AppResult, infrastructure::auth::AuthUser};

pub struct UserController {
    user_service: Arc<UserService>,
}

impl UserController {
    pub fn new(user_service: Arc<UserService>) -> Self {
        Self { user_service }
    }

    /// GET /api/me - Current user profile
    pub async fn get_me(
        State(controller): State<Arc<UserController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Json<ApiEnvelope<MeResponse>>> {
        let user = controller
            .user_service
            .get_user_profile(auth_user.user_id)
            .await?;
        Ok(Json(ApiEnvelope::success("Profile loaded", MeResponse { user })))
    }

    /// PATCH /api/me - Update profile fields
    pub async fn update_me(
        State(controller): State<Arc<UserController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppJson(request): AppJson<UpdateMeRequest>,
    ) -> AppResult<Json<ApiEnvelope<MeResponse>>> {
        let user = controller
            .user_service
            .update_profile(auth_user.user_id, request)
            .await?;
        Ok(Json(ApiEnvelope::success("Profile updated", MeResponse { user })))
    }

    /// PUT /api/me/company - Replace company details used as invoice sender
    pub async fn update_company(
        State(controller): State<Arc<UserController>>,
        Extension(auth_user): Extension<AuthUser>,
        AppJson(details): AppJson<CompanyDetails>,
    ) -> AppResult<Json<ApiEnvelope<MeResponse>>> {
        let user = controller
            .user_service
            .update_company_details(auth_user.user_id, details)
            .await?;
        Ok(Json(ApiEnvelope::success(
            "Company details updated",
            MeResponse { user },
        )))
    }
}
