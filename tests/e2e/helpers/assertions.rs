use pretty_assertions::assert_eq;
use serde_json::Value;

/// `{type: "success", message, ...}`
pub fn assert_success_envelope(body: &Value) {
    assert_eq!(
        body.get("type").and_then(|v| v.as_str()),
        Some("success"),
        "Expected success envelope, got {}",
        body
    );
    assert!(
        body.get("message").and_then(|v| v.as_str()).is_some(),
        "Missing message field"
    );
}

/// `{type: "error", message}` with nothing else leaking out
pub fn assert_error_envelope(body: &Value, expected_message: &str) {
    assert_eq!(
        body.get("type").and_then(|v| v.as_str()),
        Some("error"),
        "Expected error envelope, got {}",
        body
    );
    let message = body
        .get("message")
        .and_then(|v| v.as_str())
        .expect("Missing message field");
    assert!(
        message.contains(expected_message),
        "Expected error message to contain '{}', but got '{}'",
        expected_message,
        message
    );
}

pub fn assert_user_response(user: &Value) {
    assert!(user.get("id").and_then(|v| v.as_str()).is_some());
    assert!(user.get("email").and_then(|v| v.as_str()).is_some());
    assert!(user.get("name").and_then(|v| v.as_str()).is_some());
    assert!(user.get("aiLimit").and_then(|v| v.as_i64()).is_some());
    assert!(user.get("isPro").and_then(|v| v.as_bool()).is_some());
    assert!(user.get("isAdmin").and_then(|v| v.as_bool()).is_some());
    assert!(user.get("subscriptionStatus").is_some());
    assert!(user.get("companyDetails").is_some());

    // Credentials never leave the server
    assert!(user.get("password").is_none());
    assert!(user.get("passwordHash").is_none());
    assert!(user.get("password_hash").is_none());
}

pub fn assert_token_response(response: &Value) {
    assert!(
        response.get("token").and_then(|v| v.as_str()).is_some(),
        "Missing token field"
    );
    assert!(
        response
            .get("refreshToken")
            .and_then(|v| v.as_str())
            .is_some(),
        "Missing refreshToken field"
    );
    assert!(
        response.get("expiresIn").and_then(|v| v.as_i64()).is_some(),
        "Missing expiresIn field"
    );
}

pub fn assert_task_response(task: &Value, expected_title: &str) {
    assert!(task.get("id").and_then(|v| v.as_str()).is_some());
    assert_eq!(
        task.get("title").and_then(|v| v.as_str()),
        Some(expected_title)
    );
    assert!(task.get("status").is_some());
    assert!(task.get("priority").is_some());
    assert!(task.get("projectId").and_then(|v| v.as_str()).is_some());
}
