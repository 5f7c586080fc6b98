pub mod ai;
pub mod analytics;
pub mod auth;
pub mod entry;
pub mod extract;
pub mod feedback;
pub mod health;
pub mod invoice;
pub mod project;
pub mod task;
pub mod user;
pub mod webhook;
