use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Serialize;
use std::sync::Arc;

use super::extract::AppJson;
use crate::domain::auth::{
    LoginRequest, RefreshTokenRequest, SessionResponse, SignupRequest, TokenResponse,
};
use crate::domain::shared::{ApiEnvelope, Empty};
use crate::domain::user::UserResponse;
use crate::{domain::auth::AuthService, error::AppResult, infrastructure::auth::AuthUser};

#[derive(Debug, Serialize)]
pub struct VerifyPayload {
    pub user: UserResponse,
}

pub struct AuthController {
    auth_service: Arc<AuthService>,
}

impl AuthController {
    pub fn new(auth_service: Arc<AuthService>) -> Self {
        Self { auth_service }
    }

    /// POST /api/auth/signup - Register and log in
    pub async fn signup(
        State(controller): State<Arc<AuthController>>,
        AppJson(request): AppJson<SignupRequest>,
    ) -> AppResult<(StatusCode, Json<ApiEnvelope<SessionResponse>>)> {
        let session = controller.auth_service.signup(request).await?;
        Ok((
            StatusCode::CREATED,
            Json(ApiEnvelope::success("Account created", session)),
        ))
    }

    /// POST /api/auth/login - Email + password login
    pub async fn login(
        State(controller): State<Arc<AuthController>>,
        AppJson(request): AppJson<LoginRequest>,
    ) -> AppResult<Json<ApiEnvelope<SessionResponse>>> {
        let session = controller.auth_service.login(request).await?;
        Ok(Json(ApiEnvelope::success("Login successful", session)))
    }

    /// GET /api/auth/verify - Resolve the user behind the bearer token
    pub async fn verify(
        State(controller): State<Arc<AuthController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Json<ApiEnvelope<VerifyPayload>>> {
        let user = controller.auth_service.verify(auth_user.user_id).await?;
        Ok(Json(ApiEnvelope::success("Token is valid", VerifyPayload { user })))
    }

    /// POST /api/auth/refresh - Rotate the refresh token
    pub async fn refresh(
        State(controller): State<Arc<AuthController>>,
        AppJson(request): AppJson<RefreshTokenRequest>,
    ) -> AppResult<Json<ApiEnvelope<TokenResponse>>> {
        let tokens = controller
            .auth_service
            .refresh_token(&request.refresh_token)
            .await?;
        Ok(Json(ApiEnvelope::success("Token refreshed", tokens)))
    }

    /// POST /api/auth/logout - Revoke one refresh token
    pub async fn logout(
        State(controller): State<Arc<AuthController>>,
        AppJson(request): AppJson<RefreshTokenRequest>,
    ) -> AppResult<Json<ApiEnvelope<Empty>>> {
        controller.auth_service.logout(&request.refresh_token).await?;
        Ok(Json(ApiEnvelope::message("Logged out")))
    }

    /// POST /api/auth/logout/all - Revoke every session of the caller
    pub async fn logout_all(
        State(controller): State<Arc<AuthController>>,
        Extension(auth_user): Extension<AuthUser>,
    ) -> AppResult<Json<ApiEnvelope<Empty>>> {
        controller.auth_service.logout_all(auth_user.user_id).await?;
        Ok(Json(ApiEnvelope::message("Logged out from all devices")))
    }
}
