use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::LazyLock;
use uuid::Uuid;

use crate::domain::shared::Priority;

#[derive(Debug, Deserialize)]
struct RawPriority {
    id: String,
    priority: String,
}

#[derive(Debug, Deserialize)]
struct RawTask {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    priority: String,
}

/// Task drafted by the model, already cleaned up
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedTask {
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)```").expect("fence pattern compiles")
});

/// Return the body of the first fenced code block, or the trimmed input when there is none
pub fn strip_code_fences(raw: &str) -> String {
    let body = FENCE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(raw);
    body.trim().to_string()
}

/// Parse a JSON array out of a model answer, tolerating fences and chatter around it
fn parse_json_array<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, String> {
    let cleaned = strip_code_fences(raw);
    if let Ok(items) = serde_json::from_str::<Vec<T>>(&cleaned) {
        return Ok(items);
    }

    match (cleaned.find('['), cleaned.rfind(']')) {
        (Some(start), Some(end)) if start < end => {
            serde_json::from_str::<Vec<T>>(&cleaned[start..=end]).map_err(|e| e.to_string())
        }
        _ => Err("no JSON array in model answer".to_string()),
    }
}

/// Priority updates from a ranking answer. Entries for ids outside `known`
/// or with unrecognised priorities are dropped.
pub fn parse_priorities(
    raw: &str,
    known: &HashSet<Uuid>,
) -> Result<Vec<(Uuid, Priority)>, String> {
    let entries: Vec<RawPriority> = parse_json_array(raw)?;

    let mut seen = HashSet::new();
    let updates = entries
        .into_iter()
        .filter_map(|entry| {
            let id = Uuid::parse_str(entry.id.trim()).ok()?;
            let priority = Priority::parse_loose(&entry.priority)?;
            (known.contains(&id) && seen.insert(id)).then_some((id, priority))
        })
        .collect();

    Ok(updates)
}

/// Drafted tasks from a generation answer, at most `limit`, blank titles skipped
pub fn parse_generated_tasks(
    raw: &str,
    limit: usize,
    max_title_len: usize,
) -> Result<Vec<GeneratedTask>, String> {
    let entries: Vec<RawTask> = parse_json_array(raw)?;

    let tasks = entries
        .into_iter()
        .filter_map(|entry| {
            let title: String = entry.title.trim().chars().take(max_title_len).collect();
            if title.is_empty() {
                return None;
            }
            Some(GeneratedTask {
                title,
                description: entry.description.trim().to_string(),
                priority: Priority::parse_loose(&entry.priority).unwrap_or_default(),
            })
        })
        .take(limit)
        .collect();

    Ok(tasks)
}
