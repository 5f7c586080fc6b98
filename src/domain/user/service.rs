use super::{CompanyDetails, UpdateMeRequest, UserResponse};
use crate::{
    error::{AppError, AppResult},
    infrastructure::repositories::UserRepository,
};
use std::sync::Arc;
use uuid::Uuid;

pub struct UserService {
    user_repo: Arc<UserRepository>,
}

impl UserService {
    pub fn new(user_repo: Arc<UserRepository>) -> Self {
        Self { user_repo }
    }

    /// Get the sanitized profile of a user
    pub async fn get_user_profile(&self, user_id: Uuid) -> AppResult<UserResponse> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(UserResponse::from(user))
    }

    /// Update profile fields; absent fields are left unchanged
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        request: UpdateMeRequest,
    ) -> AppResult<UserResponse> {
        let Some(name) = request.name else {
            return self.get_user_profile(user_id).await;
        };

        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::BadRequest("Name cannot be empty".to_string()));
        }

        let user = self.user_repo.update_name(user_id, name).await?;
        Ok(UserResponse::from(user))
    }

    /// Replace the company details printed on invoices.
    /// The logo itself is uploaded by the client; only its URL is stored.
    pub async fn update_company_details(
        &self,
        user_id: Uuid,
        details: CompanyDetails,
    ) -> AppResult<UserResponse> {
        let details = sanitize_company_details(details)?;
        let user = self
            .user_repo
            .update_company_details(user_id, &details)
            .await?;

        tracing::info!(user_id = %user_id, has_logo = details.logo_url.is_some(), "Company details updated");

        Ok(UserResponse::from(user))
    }
}

fn sanitize_company_details(details: CompanyDetails) -> AppResult<CompanyDetails> {
    let clean = |value: Option<String>| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let details = CompanyDetails {
        name: clean(details.name),
        email: clean(details.email),
        phone: clean(details.phone),
        address: clean(details.address),
        website: clean(details.website),
        logo_url: clean(details.logo_url),
    };

    if let Some(url) = &details.logo_url {
        if !is_http_url(url) {
            return Err(AppError::BadRequest("Invalid logo URL".to_string()));
        }
    }
    if let Some(email) = &details.email {
        if !email.contains('@') {
            return Err(AppError::BadRequest("Invalid company email".to_string()));
        }
    }

    Ok(details)
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}
