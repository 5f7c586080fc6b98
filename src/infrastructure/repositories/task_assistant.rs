use async_trait::async_trait;

/// Language model used to rank and draft tasks.
/// Abstracts the provider so the AI service can be exercised with a canned model in tests.
#[async_trait]
pub trait TaskAssistant: Send + Sync {
    /// Send one prompt and return the raw text of the answer
    ///
    /// # Errors
    /// Returns error if the provider is unreachable or answers with no content
    async fn complete(&self, prompt: &str) -> Result<String, String>;
}
