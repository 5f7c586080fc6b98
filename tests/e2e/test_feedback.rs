use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_accept_anonymous_feedback(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/feedback",
            &json!({ "type": "issue", "name": " Sam ", "message": "  Timer resets on reload " }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);

    let feedback = &response.body.as_ref().unwrap()["feedback"];
    assert_eq!(feedback["type"], "issue");
    assert_eq!(feedback["name"], "Sam");
    assert_eq!(feedback["message"], "Timer resets on reload");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_empty_or_oversized_feedback(ctx: &TestContext) {
    ctx.client
        .post("/api/feedback", &json!({ "message": "   " }))
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Message is required");

    ctx.client
        .post("/api/feedback", &json!({ "message": "x".repeat(5001) }))
        .await
        .unwrap()
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("5000 characters or less");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_feedback_for_admins_only(ctx: &TestContext) {
    let admin = ctx.fixtures.create_admin("admin@example.com").await.unwrap();
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();

    for message in ["First", "Second"] {
        ctx.client
            .post("/api/feedback", &json!({ "type": "suggestion", "message": message }))
            .await
            .unwrap()
            .assert_status(StatusCode::CREATED);
    }

    ctx.client
        .get_with_auth("/api/feedback", &ctx.token_for(&user.id))
        .await
        .unwrap()
        .assert_status(StatusCode::FORBIDDEN)
        .assert_error_message("Admin access required");

    ctx.client
        .get("/api/feedback")
        .await
        .unwrap()
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = ctx
        .client
        .get_with_auth("/api/feedback", &ctx.token_for(&admin.id))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let feedback = response.body.as_ref().unwrap()["feedback"]
        .as_array()
        .unwrap()
        .clone();
    assert_eq!(feedback.len(), 2);
    assert!(feedback.iter().all(|f| f["type"] == "suggestion"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_default_feedback_type_to_other(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/feedback", &json!({ "message": "Love the kanban board" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);
    let feedback = &response.body.as_ref().unwrap()["feedback"];
    assert_eq!(feedback["type"], "other");
    assert_eq!(feedback["name"], "");
}
