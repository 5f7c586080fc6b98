pub mod priority;
pub mod response;

pub use priority::{validate_title, Priority};
pub use response::{ApiEnvelope, Empty, ErrorEnvelope, ResponseType};
