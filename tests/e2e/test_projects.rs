use crate::e2e::helpers;

use helpers::{
    assertions::{assert_error_envelope, assert_success_envelope},
    TestContext,
};
use hyper::StatusCode;
use planwisr_backend::domain::task::TaskStatus;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_create_project_with_defaults(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    let token = ctx.token_for(&user.id);

    let response = ctx
        .client
        .post_with_auth(
            "/api/projects",
            &json!({
                "title": "  Website redesign ",
                "tags": ["design", " Design ", "", "web"]
            }),
            &token,
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);

    let body = response.body.as_ref().unwrap();
    assert_success_envelope(body);

    let project = &body["project"];
    assert_eq!(project["title"], "Website redesign");
    assert_eq!(project["status"], "not-started");
    assert_eq!(project["priority"], "medium");
    assert_eq!(project["progress"], 0);
    assert_eq!(project["tags"], json!(["design", "web"]));
    assert_eq!(project["createdBy"], user.id.to_string());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_project_without_title(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    let token = ctx.token_for(&user.id);

    let response = ctx
        .client
        .post_with_auth("/api/projects", &json!({ "title": "   " }), &token)
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Title is required");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_wrap_undecodable_requests_in_error_envelope(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    let token = ctx.token_for(&user.id);

    // Status outside the allowed set
    let response = ctx
        .client
        .post_with_auth(
            "/api/projects",
            &json!({ "title": "Site", "status": "archived" }),
            &token,
        )
        .await
        .unwrap();
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error_envelope(response.body.as_ref().unwrap(), "unknown variant");

    // Wrong JSON type for a field
    let response = ctx
        .client
        .post_with_auth("/api/projects", &json!({ "title": 42 }), &token)
        .await
        .unwrap();
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.body.as_ref().unwrap()["type"], "error");

    // Path id that is not a UUID
    let response = ctx
        .client
        .get_with_auth("/api/projects/not-a-uuid", &token)
        .await
        .unwrap();
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_error_envelope(response.body.as_ref().unwrap(), "Invalid URL");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_only_own_projects(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    let other = ctx.fixtures.create_user("other@example.com").await.unwrap();
    ctx.fixtures.create_project(user.id, "Mine A").await.unwrap();
    ctx.fixtures.create_project(user.id, "Mine B").await.unwrap();
    ctx.fixtures.create_project(other.id, "Theirs").await.unwrap();

    let response = ctx
        .client
        .get_with_auth("/api/projects", &ctx.token_for(&user.id))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let projects = response.body.as_ref().unwrap()["projects"]
        .as_array()
        .unwrap()
        .clone();
    assert_eq!(projects.len(), 2);
    assert!(projects.iter().all(|p| p["createdBy"] == user.id.to_string()));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_update_project_partially(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    let project = ctx.fixtures.create_project(user.id, "Draft").await.unwrap();

    let response = ctx
        .client
        .put_with_auth(
            &format!("/api/projects/{}", project.id),
            &json!({ "status": "on-hold", "dueDate": "2030-01-31" }),
            &ctx.token_for(&user.id),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let updated = &response.body.as_ref().unwrap()["project"];
    assert_eq!(updated["title"], "Draft");
    assert_eq!(updated["status"], "on-hold");
    assert_eq!(updated["dueDate"], "2030-01-31");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_missing_project(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();

    let response = ctx
        .client
        .get_with_auth(
            &format!("/api/projects/{}", uuid::Uuid::new_v4()),
            &ctx.token_for(&user.id),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("Project not found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_forbid_access_to_other_users_project(ctx: &TestContext) {
    let owner = ctx.fixtures.create_user("owner@example.com").await.unwrap();
    let intruder = ctx.fixtures.create_user("intruder@example.com").await.unwrap();
    let project = ctx.fixtures.create_project(owner.id, "Private").await.unwrap();
    let token = ctx.token_for(&intruder.id);

    let response = ctx
        .client
        .get_with_auth(&format!("/api/projects/{}", project.id), &token)
        .await
        .unwrap();
    response.assert_status(StatusCode::FORBIDDEN);

    let response = ctx
        .client
        .delete_with_auth(&format!("/api/projects/{}", project.id), &token)
        .await
        .unwrap();
    response.assert_status(StatusCode::FORBIDDEN);

    // Still there for the owner
    let response = ctx
        .client
        .get_with_auth(
            &format!("/api/projects/{}", project.id),
            &ctx.token_for(&owner.id),
        )
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_delete_project_but_keep_its_tasks(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    let project = ctx.fixtures.create_project(user.id, "Short lived").await.unwrap();
    ctx.fixtures
        .create_task(user.id, project.id, "Orphan", TaskStatus::NotStarted)
        .await
        .unwrap();
    let token = ctx.token_for(&user.id);

    let response = ctx
        .client
        .delete_with_auth(&format!("/api/projects/{}", project.id), &token)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let response = ctx
        .client
        .get_with_auth(&format!("/api/projects/{}", project.id), &token)
        .await
        .unwrap();
    response.assert_status(StatusCode::NOT_FOUND);

    assert_eq!(ctx.fixtures.get_task_count(project.id).await.unwrap(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_group_board_by_status(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    let project = ctx.fixtures.create_project(user.id, "Board").await.unwrap();
    for (title, status) in [
        ("Todo 1", TaskStatus::NotStarted),
        ("Todo 2", TaskStatus::NotStarted),
        ("Doing", TaskStatus::InProgress),
        ("Done", TaskStatus::Completed),
    ] {
        ctx.fixtures
            .create_task(user.id, project.id, title, status)
            .await
            .unwrap();
    }

    let response = ctx
        .client
        .get_with_auth(
            &format!("/api/projects/{}/board", project.id),
            &ctx.token_for(&user.id),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["project"]["id"], project.id.to_string());
    let columns = &body["columns"];
    assert_eq!(columns["notStarted"].as_array().unwrap().len(), 2);
    assert_eq!(columns["inProgress"].as_array().unwrap().len(), 1);
    assert_eq!(columns["completed"].as_array().unwrap().len(), 1);
    assert_eq!(columns["completed"][0]["title"], "Done");
}
