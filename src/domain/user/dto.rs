use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CompanyDetails, SubscriptionStatus, User};

/// User document without the password hash
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub ai_limit: i32,
    pub is_pro: bool,
    pub subscription_status: SubscriptionStatus,
    pub company_details: CompanyDetails,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            is_admin: user.is_admin,
            ai_limit: user.ai_limit,
            is_pro: user.is_pro,
            subscription_status: user.subscription_status,
            company_details: user.company_details.0,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserResponse,
}

/// PATCH /api/me
#[derive(Debug, Deserialize)]
pub struct UpdateMeRequest {
    pub name: Option<String>,
}
