pub mod error;
pub mod parse;
pub mod prompt;
pub mod service;

pub use error::AiServiceError;
pub use parse::{parse_generated_tasks, parse_priorities, strip_code_fences, GeneratedTask};
pub use prompt::{build_generate_prompt, build_prioritize_prompt};
pub use service::{AiService, AiServiceApi};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::task::TaskResponse;

pub const DEFAULT_GENERATE_COUNT: usize = 5;
pub const MAX_GENERATE_COUNT: usize = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizeRequest {
    /// Limit ranking to one project; all open tasks otherwise
    pub project_id: Option<Uuid>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizeResponse {
    pub tasks: Vec<TaskResponse>,
    /// Credits left after this call
    pub ai_limit: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTasksRequest {
    pub project_id: Uuid,
    pub count: Option<usize>,
}

impl GenerateTasksRequest {
    pub fn effective_count(&self) -> usize {
        self.count
            .unwrap_or(DEFAULT_GENERATE_COUNT)
            .clamp(1, MAX_GENERATE_COUNT)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateTasksResponse {
    pub tasks: Vec<TaskResponse>,
    pub progress: i32,
    pub ai_limit: i32,
}
