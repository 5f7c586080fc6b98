use crate::e2e::helpers;

use helpers::{assertions::assert_task_response, TestContext};
use hyper::StatusCode;
use planwisr_backend::domain::task::TaskStatus;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_create_task_and_report_progress(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    let project = ctx.fixtures.create_project(user.id, "Launch").await.unwrap();
    ctx.fixtures
        .create_task(user.id, project.id, "Done already", TaskStatus::Completed)
        .await
        .unwrap();

    let response = ctx
        .client
        .post_with_auth(
            "/api/tasks",
            &json!({
                "title": "Write copy",
                "projectId": project.id,
                "priority": "high"
            }),
            &ctx.token_for(&user.id),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);

    let body = response.body.as_ref().unwrap();
    assert_task_response(&body["task"], "Write copy");
    assert_eq!(body["task"]["status"], "not-started");
    assert_eq!(body["task"]["priority"], "high");
    assert_eq!(body["progress"], 50);
    assert_eq!(ctx.fixtures.get_project_progress(project.id).await.unwrap(), 50);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_task_for_unknown_project(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();

    let response = ctx
        .client
        .post_with_auth(
            "/api/tasks",
            &json!({ "title": "Lost", "projectId": uuid::Uuid::new_v4() }),
            &ctx.token_for(&user.id),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::NOT_FOUND);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_task_in_other_users_project(ctx: &TestContext) {
    let owner = ctx.fixtures.create_user("owner@example.com").await.unwrap();
    let intruder = ctx.fixtures.create_user("intruder@example.com").await.unwrap();
    let project = ctx.fixtures.create_project(owner.id, "Private").await.unwrap();

    let response = ctx
        .client
        .post_with_auth(
            "/api/tasks",
            &json!({ "title": "Sneaky", "projectId": project.id }),
            &ctx.token_for(&intruder.id),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(ctx.fixtures.get_task_count(project.id).await.unwrap(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_move_task_between_columns(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    let project = ctx.fixtures.create_project(user.id, "Kanban").await.unwrap();
    let task = ctx
        .fixtures
        .create_task(user.id, project.id, "Move me", TaskStatus::NotStarted)
        .await
        .unwrap();
    ctx.fixtures
        .create_task(user.id, project.id, "Stay", TaskStatus::InProgress)
        .await
        .unwrap();

    let response = ctx
        .client
        .patch_with_auth(
            &format!("/api/tasks/{}/status", task.id),
            &json!({ "status": "completed" }),
            &ctx.token_for(&user.id),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["task"]["status"], "completed");
    assert_eq!(body["progress"], 50);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_tasks_filtered_by_project(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    let first = ctx.fixtures.create_project(user.id, "First").await.unwrap();
    let second = ctx.fixtures.create_project(user.id, "Second").await.unwrap();
    ctx.fixtures
        .create_task(user.id, first.id, "A", TaskStatus::NotStarted)
        .await
        .unwrap();
    ctx.fixtures
        .create_task(user.id, second.id, "B", TaskStatus::NotStarted)
        .await
        .unwrap();
    let token = ctx.token_for(&user.id);

    let response = ctx.client.get_with_auth("/api/tasks", &token).await.unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.body.as_ref().unwrap()["tasks"]
            .as_array()
            .unwrap()
            .len(),
        2
    );

    let response = ctx
        .client
        .get_with_auth(&format!("/api/tasks?projectId={}", first.id), &token)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    let tasks = response.body.as_ref().unwrap()["tasks"]
        .as_array()
        .unwrap()
        .clone();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "A");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_update_task_fields(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    let project = ctx.fixtures.create_project(user.id, "Edits").await.unwrap();
    let task = ctx
        .fixtures
        .create_task(user.id, project.id, "Old title", TaskStatus::NotStarted)
        .await
        .unwrap();

    let response = ctx
        .client
        .put_with_auth(
            &format!("/api/tasks/{}", task.id),
            &json!({ "title": "New title", "priority": "low", "dueDate": "2031-05-01" }),
            &ctx.token_for(&user.id),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let updated = &response.body.as_ref().unwrap()["task"];
    assert_task_response(updated, "New title");
    assert_eq!(updated["priority"], "low");
    assert_eq!(updated["dueDate"], "2031-05-01");
    assert_eq!(updated["status"], "not-started");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_delete_task_and_recompute_progress(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    let project = ctx.fixtures.create_project(user.id, "Cleanup").await.unwrap();
    let open = ctx
        .fixtures
        .create_task(user.id, project.id, "Open", TaskStatus::NotStarted)
        .await
        .unwrap();
    ctx.fixtures
        .create_task(user.id, project.id, "Done", TaskStatus::Completed)
        .await
        .unwrap();
    let token = ctx.token_for(&user.id);

    let response = ctx
        .client
        .delete_with_auth(&format!("/api/tasks/{}", open.id), &token)
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap()["progress"], 100);

    let response = ctx
        .client
        .get_with_auth(&format!("/api/tasks/{}", open.id), &token)
        .await
        .unwrap();
    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("Task not found");
}
