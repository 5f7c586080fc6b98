use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use planwisr_backend::domain::task::TaskStatus;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_prioritize_open_tasks_and_spend_one_credit(ctx: &TestContext) {
    let user = ctx.fixtures.create_user_with("user@example.com", 3, false).await.unwrap();
    let project = ctx.fixtures.create_project(user.id, "Launch").await.unwrap();
    let urgent = ctx
        .fixtures
        .create_task(user.id, project.id, "Fix checkout", TaskStatus::InProgress)
        .await
        .unwrap();
    let later = ctx
        .fixtures
        .create_task(user.id, project.id, "Polish footer", TaskStatus::NotStarted)
        .await
        .unwrap();
    ctx.fixtures
        .create_task(user.id, project.id, "Shipped", TaskStatus::Completed)
        .await
        .unwrap();

    ctx.assistant.push_reply(format!(
        "```json\n[{{\"id\": \"{}\", \"priority\": \"high\"}}, {{\"id\": \"{}\", \"priority\": \"low\"}}]\n```",
        urgent.id, later.id
    ));

    let response = ctx
        .client
        .post_with_auth(
            "/api/ai/prioritize",
            &json!({ "projectId": project.id }),
            &ctx.token_for(&user.id),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["aiLimit"], 2);
    let tasks = body["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    let priority_of = |id: uuid::Uuid| {
        tasks
            .iter()
            .find(|t| t["id"] == id.to_string())
            .map(|t| t["priority"].clone())
            .unwrap()
    };
    assert_eq!(priority_of(urgent.id), "high");
    assert_eq!(priority_of(later.id), "low");

    // Completed work is never sent to the model
    let prompt = ctx.assistant.last_prompt().unwrap();
    assert!(prompt.contains("Fix checkout"));
    assert!(!prompt.contains("Shipped"));

    let stored = ctx.fixtures.get_user_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.ai_limit, 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_block_ai_when_out_of_credits(ctx: &TestContext) {
    let user = ctx.fixtures.create_user_with("user@example.com", 0, false).await.unwrap();
    let project = ctx.fixtures.create_project(user.id, "Launch").await.unwrap();
    ctx.fixtures
        .create_task(user.id, project.id, "Anything", TaskStatus::NotStarted)
        .await
        .unwrap();
    let token = ctx.token_for(&user.id);

    let response = ctx
        .client
        .post_with_auth("/api/ai/prioritize", &json!({}), &token)
        .await
        .unwrap();
    response
        .assert_status(StatusCode::FORBIDDEN)
        .assert_error_message("AI limit reached");

    let response = ctx
        .client
        .post_with_auth(
            "/api/ai/generate-tasks",
            &json!({ "projectId": project.id }),
            &token,
        )
        .await
        .unwrap();
    response
        .assert_status(StatusCode::FORBIDDEN)
        .assert_error_message("AI limit reached");

    assert_eq!(ctx.assistant.call_count(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_credit_when_assistant_fails(ctx: &TestContext) {
    let user = ctx.fixtures.create_user_with("user@example.com", 2, false).await.unwrap();
    let project = ctx.fixtures.create_project(user.id, "Launch").await.unwrap();
    ctx.fixtures
        .create_task(user.id, project.id, "Anything", TaskStatus::NotStarted)
        .await
        .unwrap();
    ctx.assistant.push_failure("upstream timeout");

    let response = ctx
        .client
        .post_with_auth("/api/ai/prioritize", &json!({}), &ctx.token_for(&user.id))
        .await
        .unwrap();

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    // Provider details stay in the logs
    assert!(!String::from_utf8_lossy(&response.body_bytes).contains("upstream timeout"));

    let stored = ctx.fixtures.get_user_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.ai_limit, 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_generate_tasks_for_project(ctx: &TestContext) {
    let user = ctx.fixtures.create_user_with("user@example.com", 1, false).await.unwrap();
    let project = ctx.fixtures.create_project(user.id, "Mobile app").await.unwrap();
    ctx.fixtures
        .create_task(user.id, project.id, "Sketch screens", TaskStatus::Completed)
        .await
        .unwrap();

    ctx.assistant.push_reply(
        r#"Here are some ideas:
        [
          {"title": "Set up CI", "description": "Build on every push", "priority": "high"},
          {"title": "Write onboarding", "priority": "medium"},
          {"title": "   ", "priority": "low"}
        ]"#,
    );

    let response = ctx
        .client
        .post_with_auth(
            "/api/ai/generate-tasks",
            &json!({ "projectId": project.id, "count": 3 }),
            &ctx.token_for(&user.id),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    let tasks = body["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["title"], "Set up CI");
    assert_eq!(tasks[0]["status"], "not-started");
    assert_eq!(tasks[0]["projectId"], project.id.to_string());
    // One of three tasks is done
    assert_eq!(body["progress"], 33);
    assert_eq!(body["aiLimit"], 0);

    assert_eq!(ctx.fixtures.get_task_count(project.id).await.unwrap(), 3);
    assert!(ctx.assistant.last_prompt().unwrap().contains("Mobile app"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_generate_tasks_for_other_users_project(ctx: &TestContext) {
    let owner = ctx.fixtures.create_user("owner@example.com").await.unwrap();
    let intruder = ctx.fixtures.create_user("intruder@example.com").await.unwrap();
    let project = ctx.fixtures.create_project(owner.id, "Private").await.unwrap();

    let response = ctx
        .client
        .post_with_auth(
            "/api/ai/generate-tasks",
            &json!({ "projectId": project.id }),
            &ctx.token_for(&intruder.id),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(ctx.assistant.call_count(), 0);
}
