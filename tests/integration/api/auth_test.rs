//! Authentication API integration tests
//!
//! Signup, login and the user directory.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use yourplaces::backend::auth::{AuthResponse, UsersResponse};

use crate::common::{assert_error, signup_user, TestApp};

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/api/users/signup")
        .json(&json!({
            "name": "Max",
            "email": "Max@Example.com",
            "password": "secret1"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: serde_json::Value = response.json();
    assert_eq!(body["email"], "max@example.com");
    assert!(body["userId"].is_string());
    assert!(body["token"].is_string());

    let token = body["token"].as_str().unwrap();
    let identity = crate::assert_ok!(app.state.tokens.verify(token));
    assert_eq!(identity.email, "max@example.com");
}

#[tokio::test]
async fn test_signup_duplicate_email_is_unprocessable() {
    let app = TestApp::new();
    signup_user(&app.server, "Max", "max@example.com", "secret1").await;

    let response = app
        .server
        .post("/api/users/signup")
        .json(&json!({
            "name": "Other",
            "email": " MAX@example.com",
            "password": "secret2"
        }))
        .await;

    assert_error(&response, StatusCode::UNPROCESSABLE_ENTITY, "Could not create user, email already exists.");
    assert_eq!(app.store.snapshot().await.0.len(), 1);
}

#[tokio::test]
async fn test_signup_validation() {
    let app = TestApp::new();

    for body in [
        json!({ "name": "", "email": "max@example.com", "password": "secret1" }),
        json!({ "name": "Max", "email": "max.example.com", "password": "secret1" }),
        json!({ "name": "Max", "email": "max@example.com", "password": "12345" }),
    ] {
        let response = app.server.post("/api/users/signup").json(&body).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    assert!(app.store.snapshot().await.0.is_empty());
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    let user = signup_user(&app.server, "Max", "max@example.com", "secret1").await;

    let response = app
        .server
        .post("/api/users/login")
        .json(&json!({ "email": "max@example.com", "password": "secret1" }))
        .await;

    response.assert_status_ok();
    let body: AuthResponse = response.json();
    assert_eq!(body.user_id, user.id);
    assert_eq!(body.email, user.email);
    assert!(!body.token.is_empty());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    signup_user(&app.server, "Max", "max@example.com", "secret1").await;

    let wrong_password = app
        .server
        .post("/api/users/login")
        .json(&json!({ "email": "max@example.com", "password": "wrong-password" }))
        .await;
    let unknown_email = app
        .server
        .post("/api/users/login")
        .json(&json!({ "email": "nobody@example.com", "password": "secret1" }))
        .await;

    for response in [&wrong_password, &unknown_email] {
        assert_error(response, StatusCode::UNAUTHORIZED, "Invalid credentials, could not log you in.");
    }
}

#[tokio::test]
async fn test_get_users_hides_password_hash() {
    let app = TestApp::new();
    let first = signup_user(&app.server, "First", "first@example.com", "secret1").await;
    let second = signup_user(&app.server, "Second", "second@example.com", "secret2").await;

    let response = app.server.get("/api/users").await;
    response.assert_status_ok();

    let text = response.text();
    assert!(!text.contains("password"));
    crate::assert_contains!(text, "first@example.com");

    let body: UsersResponse = response.json();
    let ids: Vec<_> = body.users.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
    assert!(body.users.iter().all(|u| u.places.is_empty()));
}
