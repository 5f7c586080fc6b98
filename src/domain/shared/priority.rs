use serde::{Deserialize, Serialize};

/// Priority shared by projects and tasks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "text")]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Lenient parse used for model output ("High", " low ")
    pub fn parse_loose(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trimmed title, rejected when empty or longer than `max` characters
pub fn validate_title(title: &str, max: usize) -> Result<String, String> {
    let title = title.trim();
    if title.is_empty() {
        return Err("Title is required".to_string());
    }
    if title.chars().count() > max {
        return Err(format!("Title must be {} characters or less", max));
    }
    Ok(title.to_string())
}
