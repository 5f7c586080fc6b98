pub mod dto;
pub mod model;
pub mod service;

pub use dto::{MeResponse, UpdateMeRequest, UserResponse};
pub use model::{CompanyDetails, SubscriptionStatus, User};
pub use service::UserService;
