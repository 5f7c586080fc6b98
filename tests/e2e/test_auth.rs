use crate::e2e::helpers;

use helpers::{
    assertions::{assert_error_envelope, assert_success_envelope, assert_token_response, assert_user_response},
    fixtures::TEST_PASSWORD,
    generate_test_jwt_with_type, TestContext,
};
use hyper::StatusCode;
use serde_json::{json, Value};
use test_context::test_context;

async fn login(ctx: &TestContext, email: &str) -> Value {
    let response = ctx
        .client
        .post(
            "/api/auth/login",
            &json!({ "email": email, "password": TEST_PASSWORD }),
        )
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);
    response.body.clone().unwrap()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_sign_up_and_return_session(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/auth/signup",
            &json!({
                "name": "Ana",
                "email": "  Ana@Example.com ",
                "password": "secret123"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::CREATED);

    let body = response.body.as_ref().unwrap();
    assert_success_envelope(body);
    assert_token_response(body);

    let user = body.get("user").expect("Missing user");
    assert_user_response(user);
    assert_eq!(user["email"], "ana@example.com");
    assert_eq!(user["aiLimit"], ctx.config.default_ai_limit);
    assert_eq!(user["isPro"], false);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_duplicate_signup(ctx: &TestContext) {
    ctx.fixtures.create_user("taken@example.com").await.unwrap();

    let response = ctx
        .client
        .post(
            "/api/auth/signup",
            &json!({
                "name": "Someone",
                "email": "taken@example.com",
                "password": "secret123"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::CONFLICT);
    assert_error_envelope(response.body.as_ref().unwrap(), "Email already registered");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_short_password_on_signup(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/auth/signup",
            &json!({ "name": "Ana", "email": "ana@example.com", "password": "123" }),
        )
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Password must be at least");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_login_with_valid_credentials(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();

    let body = login(ctx, "user@example.com").await;

    assert_success_envelope(&body);
    assert_token_response(&body);
    assert_eq!(body["user"]["id"], user.id.to_string());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_distinguish_unknown_email_from_wrong_password(ctx: &TestContext) {
    ctx.fixtures.create_user("user@example.com").await.unwrap();

    let response = ctx
        .client
        .post(
            "/api/auth/login",
            &json!({ "email": "nobody@example.com", "password": TEST_PASSWORD }),
        )
        .await
        .unwrap();
    response
        .assert_status(StatusCode::NOT_FOUND)
        .assert_error_message("User not found");

    let response = ctx
        .client
        .post(
            "/api/auth/login",
            &json!({ "email": "user@example.com", "password": "wrong-password" }),
        )
        .await
        .unwrap();
    response
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_error_message("Invalid password");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_verify_access_token(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    let token = ctx.token_for(&user.id);

    let response = ctx
        .client
        .get_with_auth("/api/auth/verify", &token)
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_success_envelope(body);
    assert_user_response(&body["user"]);
    assert_eq!(body["user"]["email"], "user@example.com");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_invalid_tokens_on_verify(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();

    let response = ctx
        .client
        .get_with_auth("/api/auth/verify", "not-a-jwt")
        .await
        .unwrap();
    response.assert_status(StatusCode::UNAUTHORIZED);

    // Signed with another secret
    let forged = generate_test_jwt_with_type(&user.id, &user.email, "access", "other-secret");
    let response = ctx
        .client
        .get_with_auth("/api/auth/verify", &forged)
        .await
        .unwrap();
    response.assert_status(StatusCode::UNAUTHORIZED);

    // Refresh tokens are not access tokens
    let refresh = generate_test_jwt_with_type(
        &user.id,
        &user.email,
        "refresh",
        &ctx.config.jwt_secret,
    );
    let response = ctx
        .client
        .get_with_auth("/api/auth/verify", &refresh)
        .await
        .unwrap();
    response
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_error_message("Refresh tokens cannot be used");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_token_of_deleted_user(ctx: &TestContext) {
    let token = ctx.token_for(&uuid::Uuid::new_v4());

    let response = ctx
        .client
        .get_with_auth("/api/auth/verify", &token)
        .await
        .unwrap();

    response
        .assert_status(StatusCode::UNAUTHORIZED)
        .assert_error_message("User not found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_rotate_refresh_token(ctx: &TestContext) {
    ctx.fixtures.create_user("user@example.com").await.unwrap();
    let session = login(ctx, "user@example.com").await;
    let refresh_token = session["refreshToken"].as_str().unwrap().to_string();

    let response = ctx
        .client
        .post("/api/auth/refresh", &json!({ "refreshToken": refresh_token }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_token_response(body);
    assert_ne!(body["refreshToken"].as_str().unwrap(), refresh_token);

    // The old refresh token is spent
    let response = ctx
        .client
        .post("/api/auth/refresh", &json!({ "refreshToken": refresh_token }))
        .await
        .unwrap();
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_garbage_refresh_token(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/auth/refresh", &json!({ "refreshToken": "garbage" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_error_envelope(response.body.as_ref().unwrap(), "");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_logout_and_revoke_refresh_token(ctx: &TestContext) {
    ctx.fixtures.create_user("user@example.com").await.unwrap();
    let session = login(ctx, "user@example.com").await;
    let refresh_token = session["refreshToken"].as_str().unwrap();

    let response = ctx
        .client
        .post("/api/auth/logout", &json!({ "refreshToken": refresh_token }))
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let response = ctx
        .client
        .post("/api/auth/refresh", &json!({ "refreshToken": refresh_token }))
        .await
        .unwrap();
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_logout_from_all_devices(ctx: &TestContext) {
    let user = ctx.fixtures.create_user("user@example.com").await.unwrap();
    login(ctx, "user@example.com").await;
    login(ctx, "user@example.com").await;
    assert_eq!(
        ctx.fixtures.count_active_refresh_tokens(user.id).await.unwrap(),
        2
    );

    let token = ctx.token_for(&user.id);
    let response = ctx
        .client
        .post_with_auth("/api/auth/logout/all", &json!({}), &token)
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        ctx.fixtures.count_active_refresh_tokens(user.id).await.unwrap(),
        0
    );
}
