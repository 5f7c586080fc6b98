use super::task_assistant::TaskAssistant;
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

const SYSTEM_PROMPT: &str = "You are a project planning assistant. \
Answer with raw JSON only, without commentary.";

/// Chat-completions backed assistant. Works with any OpenAI-compatible endpoint.
pub struct OpenAiTaskAssistant {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiTaskAssistant {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }
}

#[async_trait]
impl TaskAssistant for OpenAiTaskAssistant {
    async fn complete(&self, prompt: &str) -> Result<String, String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(0.2)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(SYSTEM_PROMPT)
                    .build()
                    .map_err(|e| format!("Failed to build system message: {}", e))?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()
                    .map_err(|e| format!("Failed to build user message: {}", e))?
                    .into(),
            ])
            .build()
            .map_err(|e| format!("Failed to build chat request: {}", e))?;

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "Calling chat completion");

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| format!("OpenAI chat error: {}", e))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| "OpenAI returned an empty answer".to_string())
    }
}
