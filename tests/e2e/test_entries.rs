use crate::e2e::helpers;

use chrono::{Duration, Utc};
use helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_record_time_entry(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    let project = ctx.fixtures.create_project(user.id, "Tracked").await.unwrap();
    let end = Utc::now();
    let start = end - Duration::hours(1);

    let response = ctx
        .client
        .post_with_auth(
            "/api/entries",
            &json!({
                "description": "Pairing session",
                "duration": 1800,
                "startTime": start,
                "endTime": end,
                "mode": "countdown",
                "projectId": project.id
            }),
            &ctx.token_for(&user.id),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);

    let entry = &response.body.as_ref().unwrap()["entry"];
    assert_eq!(entry["duration"], 1800);
    assert_eq!(entry["mode"], "countdown");
    assert_eq!(entry["projectId"], project.id.to_string());
    assert_eq!(entry["userId"], user.id.to_string());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_impossible_sessions(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    let project = ctx.fixtures.create_project(user.id, "Tracked").await.unwrap();
    let token = ctx.token_for(&user.id);
    let end = Utc::now();
    let start = end - Duration::minutes(10);

    // More tracked time than elapsed
    let response = ctx
        .client
        .post_with_auth(
            "/api/entries",
            &json!({
                "duration": 3600,
                "startTime": start,
                "endTime": end,
                "projectId": project.id
            }),
            &token,
        )
        .await
        .unwrap();
    response.assert_status(StatusCode::BAD_REQUEST);

    // Zero duration
    let response = ctx
        .client
        .post_with_auth(
            "/api/entries",
            &json!({
                "duration": 0,
                "startTime": start,
                "endTime": end,
                "projectId": project.id
            }),
            &token,
        )
        .await
        .unwrap();
    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Duration must be greater than zero");

    // End before start
    let response = ctx
        .client
        .post_with_auth(
            "/api/entries",
            &json!({
                "duration": 60,
                "startTime": end,
                "endTime": start,
                "projectId": project.id
            }),
            &token,
        )
        .await
        .unwrap();
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_not_track_time_on_other_users_project(ctx: &TestContext) {
    let owner = ctx.fixtures.create_user("owner@example.com").await.unwrap();
    let intruder = ctx.fixtures.create_user("intruder@example.com").await.unwrap();
    let project = ctx.fixtures.create_project(owner.id, "Private").await.unwrap();
    let end = Utc::now();

    let response = ctx
        .client
        .post_with_auth(
            "/api/entries",
            &json!({
                "duration": 60,
                "startTime": end - Duration::minutes(5),
                "endTime": end,
                "projectId": project.id
            }),
            &ctx.token_for(&intruder.id),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::FORBIDDEN);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_and_delete_own_entries(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    let other = ctx.fixtures.create_user("other@example.com").await.unwrap();
    let project = ctx.fixtures.create_project(user.id, "Tracked").await.unwrap();
    let other_project = ctx.fixtures.create_project(other.id, "Theirs").await.unwrap();
    let start = Utc::now() - Duration::hours(3);
    let entry = ctx
        .fixtures
        .create_entry(user.id, project.id, start, 600)
        .await
        .unwrap();
    ctx.fixtures
        .create_entry(user.id, project.id, start + Duration::hours(1), 900)
        .await
        .unwrap();
    let foreign = ctx
        .fixtures
        .create_entry(other.id, other_project.id, start, 300)
        .await
        .unwrap();
    let token = ctx.token_for(&user.id);

    let response = ctx.client.get_with_auth("/api/entries", &token).await.unwrap();
    response.assert_status(StatusCode::OK);
    let entries = response.body.as_ref().unwrap()["entries"]
        .as_array()
        .unwrap()
        .clone();
    assert_eq!(entries.len(), 2);
    // Latest session first
    assert_eq!(entries[0]["duration"], 900);

    let response = ctx
        .client
        .delete_with_auth(&format!("/api/entries/{}", foreign.id), &token)
        .await
        .unwrap();
    response.assert_status(StatusCode::FORBIDDEN);

    let response = ctx
        .client
        .delete_with_auth(&format!("/api/entries/{}", entry.id), &token)
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let response = ctx
        .client
        .delete_with_auth(&format!("/api/entries/{}", entry.id), &token)
        .await
        .unwrap();
    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("Entry not found");
}
