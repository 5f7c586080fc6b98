pub mod dto;
pub mod jwt;
pub mod password;
pub mod service;

pub use dto::{LoginRequest, RefreshTokenRequest, SessionResponse, SignupRequest, TokenResponse};
pub use jwt::{Claims, JwtManager, TokenType};
pub use password::{hash_password, verify_password};
pub use service::AuthService;
