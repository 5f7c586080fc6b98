use super::{
    hash_password, verify_password, JwtManager, LoginRequest, SessionResponse, SignupRequest,
    TokenResponse, TokenType,
};
use crate::domain::user::{User, UserResponse};
use crate::infrastructure::config::Config;
use crate::{
    error::{AppError, AppResult},
    infrastructure::repositories::{RefreshTokenRepository, UserRepository},
};
use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

const MIN_PASSWORD_LENGTH: usize = 6;

pub struct AuthService {
    user_repo: Arc<UserRepository>,
    refresh_token_repo: Arc<RefreshTokenRepository>,
    config: Arc<Config>,
}

impl AuthService {
    pub fn new(
        user_repo: Arc<UserRepository>,
        refresh_token_repo: Arc<RefreshTokenRepository>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            user_repo,
            refresh_token_repo,
            config,
        }
    }

    fn jwt_manager(&self) -> JwtManager {
        JwtManager::new(
            self.config.jwt_secret.clone(),
            self.config.jwt_expiration_hours,
        )
    }

    /// Register a new account and open a session for it
    pub async fn signup(&self, request: SignupRequest) -> AppResult<SessionResponse> {
        let email = normalize_email(&request.email);
        validate_signup(&request.name, &email, &request.password)?;

        if self.user_repo.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("Email already registered".to_string()));
        }

        let password_hash = hash_password(&request.password)?;
        let user = self
            .user_repo
            .create(
                request.name.trim(),
                &email,
                &password_hash,
                self.config.default_ai_limit,
            )
            .await?;

        tracing::info!(user_id = %user.id, "User signed up");

        self.open_session(user).await
    }

    /// Email + password login. Unknown email and wrong password fail differently.
    pub async fn login(&self, request: LoginRequest) -> AppResult<SessionResponse> {
        let email = normalize_email(&request.email);
        if email.is_empty() || request.password.is_empty() {
            return Err(AppError::BadRequest(
                "Email and password are required".to_string(),
            ));
        }

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        if !verify_password(&request.password, &user.password_hash)? {
            tracing::info!(user_id = %user.id, "Login rejected: wrong password");
            return Err(AppError::Unauthorized("Invalid password".to_string()));
        }

        tracing::info!(user_id = %user.id, "User logged in");

        self.open_session(user).await
    }

    /// Resolve the sanitized user behind an already validated access token
    pub async fn verify(&self, user_id: Uuid) -> AppResult<UserResponse> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

        Ok(UserResponse::from(user))
    }

    /// Exchange a refresh token for a new token pair; the old refresh token is revoked
    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<TokenResponse> {
        let jwt_manager = self.jwt_manager();

        let claims = jwt_manager
            .validate_token(refresh_token)
            .map_err(|_| AppError::InvalidRefreshToken)?;
        if claims.token_type != TokenType::Refresh {
            return Err(AppError::InvalidRefreshToken);
        }

        let record = self
            .refresh_token_repo
            .find(refresh_token)
            .await?
            .ok_or(AppError::InvalidRefreshToken)?;
        if !record.is_usable() {
            return Err(AppError::RefreshTokenExpired);
        }

        let user = self
            .user_repo
            .find_by_id(record.user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".to_string()))?;

        let access_token = jwt_manager.generate_token(user.id, &user.email)?;
        let new_refresh_token = jwt_manager.generate_refresh_token(
            user.id,
            &user.email,
            self.config.refresh_token_expiration_days,
        )?;

        self.refresh_token_repo
            .rotate(
                refresh_token,
                user.id,
                &new_refresh_token,
                self.refresh_expiry(),
            )
            .await?;

        Ok(TokenResponse {
            token: access_token,
            refresh_token: new_refresh_token,
            expires_in: self.config.jwt_expiration_hours * 3600,
        })
    }

    /// Logout user by revoking refresh token
    pub async fn logout(&self, refresh_token: &str) -> AppResult<()> {
        self.refresh_token_repo.revoke(refresh_token).await?;
        Ok(())
    }

    /// Logout user from all devices by revoking all refresh tokens
    pub async fn logout_all(&self, user_id: Uuid) -> AppResult<()> {
        let revoked = self.refresh_token_repo.revoke_all_for_user(user_id).await?;
        tracing::info!(user_id = %user_id, revoked, "Revoked all sessions");
        Ok(())
    }

    async fn open_session(&self, user: User) -> AppResult<SessionResponse> {
        let jwt_manager = self.jwt_manager();
        let access_token = jwt_manager.generate_token(user.id, &user.email)?;
        let refresh_token = jwt_manager.generate_refresh_token(
            user.id,
            &user.email,
            self.config.refresh_token_expiration_days,
        )?;

        self.refresh_token_repo
            .create(user.id, &refresh_token, self.refresh_expiry())
            .await?;

        Ok(SessionResponse {
            tokens: TokenResponse {
                token: access_token,
                refresh_token,
                expires_in: self.config.jwt_expiration_hours * 3600,
            },
            user: UserResponse::from(user),
        })
    }

    fn refresh_expiry(&self) -> chrono::DateTime<Utc> {
        Utc::now() + Duration::days(self.config.refresh_token_expiration_days)
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_signup(name: &str, email: &str, password: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    let valid_email = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    };
    if !valid_email {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}
