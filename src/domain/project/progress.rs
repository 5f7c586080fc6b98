use crate::error::AppResult;
use crate::infrastructure::repositories::{ProjectRepository, TaskRepository};
use uuid::Uuid;

/// Percentage of completed tasks, rounded to the nearest integer.
/// A project without tasks has no progress.
pub fn calculate_progress(completed: i64, total: i64) -> i32 {
    if total <= 0 {
        return 0;
    }
    let completed = completed.clamp(0, total);
    ((completed as f64 / total as f64) * 100.0).round() as i32
}

/// Recount a project's tasks and store the new progress.
/// Runs after the task write that triggered it, not in the same transaction.
pub async fn recompute_progress(
    task_repo: &TaskRepository,
    project_repo: &ProjectRepository,
    project_id: Uuid,
) -> AppResult<i32> {
    let (completed, total) = task_repo.count_completion(project_id).await?;
    let progress = calculate_progress(completed, total);
    project_repo.set_progress(project_id, progress).await?;

    tracing::debug!(project_id = %project_id, completed, total, progress, "Project progress recomputed");

    Ok(progress)
}
