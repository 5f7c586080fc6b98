use crate::domain::project::Project;
use crate::domain::task::Task;

/// Prompt asking the model to re-rank open tasks
pub fn build_prioritize_prompt(tasks: &[Task]) -> String {
    let mut prompt = String::from(
        "Prioritize the following tasks. Consider due dates, the current priority, \
status and how much each task likely blocks others.\n\nTasks:\n",
    );

    for task in tasks {
        prompt.push_str(&format!(
            "- id: {}\n  title: {}\n  description: {}\n  due date: {}\n  priority: {}\n  status: {}\n",
            task.id,
            task.title,
            if task.description.is_empty() { "none" } else { task.description.as_str() },
            task.due_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "none".to_string()),
            task.priority,
            task.status.as_str(),
        ));
    }

    prompt.push_str(
        "\nRespond with a JSON array only, one object per task, using exactly the ids above:\n\
[{\"id\": \"<task id>\", \"priority\": \"high|medium|low\"}]",
    );
    prompt
}

/// Prompt asking the model to draft `count` new tasks for a project
pub fn build_generate_prompt(project: &Project, existing: &[Task], count: usize) -> String {
    let mut prompt = format!(
        "Suggest {} new, concrete tasks for this project.\n\nProject: {}\nDescription: {}\nDue date: {}\nTags: {}\n",
        count,
        project.title,
        if project.description.is_empty() { "none" } else { project.description.as_str() },
        project
            .due_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "none".to_string()),
        if project.tags.is_empty() {
            "none".to_string()
        } else {
            project.tags.join(", ")
        },
    );

    if !existing.is_empty() {
        prompt.push_str("\nTasks that already exist (do not repeat them):\n");
        for task in existing {
            prompt.push_str(&format!("- {}\n", task.title));
        }
    }

    prompt.push_str(
        "\nRespond with a JSON array only:\n\
[{\"title\": \"...\", \"description\": \"...\", \"priority\": \"high|medium|low\"}]",
    );
    prompt
}
