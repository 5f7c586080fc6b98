use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub email: String,
    pub token_type: TokenType,
    pub jti: String,
    pub exp: i64, // Expiration time
    pub iat: i64, // Issued at
}

pub struct JwtManager {
    secret: String,
    expiration_hours: i64,
}

impl JwtManager {
    pub fn new(secret: String, expiration_hours: i64) -> Self {
        Self {
            secret,
            expiration_hours,
        }
    }

    /// Generate a JWT access token for a user
    pub fn generate_token(&self, user_id: Uuid, email: &str) -> AppResult<String> {
        self.sign(user_id, email, TokenType::Access, Duration::hours(self.expiration_hours))
    }

    /// Generate a long-lived refresh token; it is also persisted so it can be revoked
    pub fn generate_refresh_token(
        &self,
        user_id: Uuid,
        email: &str,
        expiration_days: i64,
    ) -> AppResult<String> {
        self.sign(user_id, email, TokenType::Refresh, Duration::days(expiration_days))
    }

    fn sign(
        &self,
        user_id: Uuid,
        email: &str,
        token_type: TokenType,
        lifetime: Duration,
    ) -> AppResult<String> {
        let now = Utc::now();
        let exp = now + lifetime;

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            token_type,
            jti: Uuid::new_v4().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))
    }

    /// Validate a JWT token and extract claims
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }

    /// Validate a token presented on an API route
    pub fn validate_access_token(&self, token: &str) -> AppResult<Claims> {
        let claims = self.validate_token(token)?;
        if claims.token_type != TokenType::Access {
            return Err(AppError::Unauthorized(
                "Refresh tokens cannot be used for API access".to_string(),
            ));
        }
        Ok(claims)
    }

    /// Extract user ID from an access token
    pub fn extract_user_id(&self, token: &str) -> AppResult<Uuid> {
        let claims = self.validate_access_token(token)?;
        Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Unauthorized("Invalid user ID in token".to_string()))
    }
}
