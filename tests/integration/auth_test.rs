//! Integration tests for the authentication flow.

mod helpers;

use http::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn test_register_then_login() {
    let app = helpers::TestApp::new().await;

    let body = app.register("Ana", "a@x.com", "secret1").await;
    assert!(!body["accessToken"].as_str().unwrap().is_empty());
    assert!(!body["refreshToken"].as_str().unwrap().is_empty());
    assert_eq!(body["email"].as_str().unwrap(), "a@x.com");
    assert_eq!(body["name"].as_str().unwrap(), "Ana");

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({
                "email": "a@x.com",
                "password": "secret1",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(!response.body["accessToken"].as_str().unwrap().is_empty());
    assert!(!response.body["refreshToken"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_email_creates_no_second_user() {
    let app = helpers::TestApp::new().await;
    app.register("Ana", "dup@x.com", "secret1").await;

    let response = app
        .request(
            "POST",
            "/auth/register",
            Some(serde_json::json!({
                "name": "Impostor",
                "email": "dup@x.com",
                "password": "secret2",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = 'dup@x.com'")
        .fetch_one(&app.db_pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_are_indistinguishable() {
    let app = helpers::TestApp::new().await;
    app.register("Ana", "a@x.com", "secret1").await;

    let wrong_password = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({
                "email": "a@x.com",
                "password": "wrong",
            })),
            None,
        )
        .await;

    let unknown_email = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({
                "email": "nobody@x.com",
                "password": "secret1",
            })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_email.body);
}

#[tokio::test]
async fn test_refresh_rotation() {
    let app = helpers::TestApp::new().await;
    let body = app.register("Ana", "rotate@x.com", "secret1").await;
    let original = body["refreshToken"].as_str().unwrap().to_string();

    // First rotation succeeds and yields a different token.
    let first = app
        .request(
            "POST",
            "/auth/refresh-token",
            Some(serde_json::json!({ "refreshToken": original })),
            None,
        )
        .await;
    assert_eq!(first.status, StatusCode::OK);
    let successor = first.body["refreshToken"].as_str().unwrap().to_string();
    assert_ne!(successor, original);

    // Re-presenting the consumed token fails.
    let replay = app
        .request(
            "POST",
            "/auth/refresh-token",
            Some(serde_json::json!({ "refreshToken": original })),
            None,
        )
        .await;
    assert_eq!(replay.status, StatusCode::BAD_REQUEST);

    // The successor still works.
    let second = app
        .request(
            "POST",
            "/auth/refresh-token",
            Some(serde_json::json!({ "refreshToken": successor })),
            None,
        )
        .await;
    assert_eq!(second.status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_refresh_token_is_rejected() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/auth/refresh-token",
            Some(serde_json::json!({ "refreshToken": "no-such-token" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_logout_revokes_all_refresh_tokens() {
    let app = helpers::TestApp::new().await;
    let body = app.register("Ana", "logout@x.com", "secret1").await;
    let user_id = body["userId"].as_str().unwrap().to_string();
    let refresh_token = body["refreshToken"].as_str().unwrap().to_string();

    // A second live token from a fresh login.
    let login = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({
                "email": "logout@x.com",
                "password": "secret1",
            })),
            None,
        )
        .await;
    let second_token = login.body["refreshToken"].as_str().unwrap().to_string();

    let logout = app
        .request("POST", &format!("/auth/logout/{user_id}"), None, None)
        .await;
    assert_eq!(logout.status, StatusCode::NO_CONTENT);

    for token in [refresh_token, second_token] {
        let response = app
            .request(
                "POST",
                "/auth/refresh-token",
                Some(serde_json::json!({ "refreshToken": token })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }

    // Logout is idempotent.
    let again = app
        .request("POST", &format!("/auth/logout/{user_id}"), None, None)
        .await;
    assert_eq!(again.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_registration_validation_failures_are_field_mapped() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/auth/register",
            Some(serde_json::json!({
                "name": "Al",
                "email": "not-an-email",
                "password": "x",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let details = response.body["details"].as_object().unwrap();
    assert!(details.contains_key("name"));
    assert!(details.contains_key("email"));
    assert!(details.contains_key("password"));
}

#[tokio::test]
async fn test_protected_route_requires_bearer_token() {
    let app = helpers::TestApp::new().await;

    let no_token = app.request("GET", "/medications", None, None).await;
    assert_eq!(no_token.status, StatusCode::UNAUTHORIZED);

    let bad_token = app
        .request("GET", "/medications", None, Some("not-a-jwt"))
        .await;
    assert_eq!(bad_token.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_the_token_subject() {
    let app = helpers::TestApp::new().await;
    let token = app.register_and_token("Ana", "me@x.com", "secret1").await;

    let response = app.request("GET", "/users/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["email"].as_str().unwrap(), "me@x.com");
    assert!(response.body.get("passwordHash").is_none());
    assert_eq!(response.body.get("password"), None::<&Value>);
}
