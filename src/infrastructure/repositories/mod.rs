pub mod analytics_repository;
pub mod entry_repository;
pub mod feedback_repository;
pub mod invoice_repository;
pub mod openai_task_assistant;
pub mod project_repository;
pub mod refresh_token_repository;
pub mod task_assistant;
pub mod task_repository;
pub mod user_repository;

pub use analytics_repository::AnalyticsRepository;
pub use entry_repository::EntryRepository;
pub use feedback_repository::FeedbackRepository;
pub use invoice_repository::InvoiceRepository;
pub use openai_task_assistant::OpenAiTaskAssistant;
pub use project_repository::ProjectRepository;
pub use refresh_token_repository::{RefreshTokenRecord, RefreshTokenRepository};
pub use task_assistant::TaskAssistant;
pub use task_repository::TaskRepository;
pub use user_repository::UserRepository;
