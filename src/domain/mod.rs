pub mod ai;
pub mod analytics;
pub mod auth;
pub mod billing;
pub mod entry;
pub mod feedback;
pub mod invoice;
pub mod project;
pub mod shared;
pub mod task;
pub mod user;
