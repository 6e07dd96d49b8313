//! Places API integration tests
//!
//! Covers the public lookups, the authenticated mutations, owner-only
//! checks and the user/place back-references as seen over HTTP.

use axum::http::{header, HeaderValue, Method, StatusCode};
use chrono::{Duration, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;
use yourplaces::backend::places::handlers::types::{MessageResponse, PlaceResponse, PlacesResponse};
use yourplaces::backend::store::ownership_violations;
use yourplaces::shared::Place;

use crate::common::{assert_error, signup_unique_user, token_issued_at, TestApp, TestUser};

fn place_body(title: &str) -> serde_json::Value {
    json!({
        "title": title,
        "description": "One of the most famous sky scrapers in the world",
        "address": "20 W 34th St, New York, NY 10001",
        "image": format!("uploads/images/{title}.png"),
    })
}

async fn create_place(app: &TestApp, user: &TestUser, title: &str) -> Place {
    let response = app
        .server
        .post("/api/places")
        .authorization_bearer(&user.token)
        .json(&place_body(title))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json::<PlaceResponse>().place
}

async fn assert_consistent(app: &TestApp) {
    let (users, places) = app.store.snapshot().await;
    assert_eq!(ownership_violations(&users, &places), Vec::<String>::new());
}

#[tokio::test]
async fn test_create_place_links_creator() {
    let app = TestApp::new();
    let user = signup_unique_user(&app.server).await;

    let place = create_place(&app, &user, "Empire").await;

    assert_eq!(place.creator, user.id);
    assert_eq!(place.location.lat, 40.7484474);
    let owner = app.store.snapshot().await.0.remove(0);
    assert_eq!(owner.places, vec![place.id]);
    assert_consistent(&app).await;
}

#[tokio::test]
async fn test_create_place_requires_token() {
    let app = TestApp::new();

    let response = app.server.post("/api/places").json(&place_body("Anon")).await;

    assert_error(&response, StatusCode::UNAUTHORIZED, "Authentication failed.");
    assert!(app.store.snapshot().await.1.is_empty());
}

#[tokio::test]
async fn test_malformed_and_expired_tokens_are_rejected() {
    let app = TestApp::new();
    let user = signup_unique_user(&app.server).await;
    let expired = token_issued_at(user.id, &user.email, Utc::now() - Duration::hours(1));

    let malformed = app
        .server
        .post("/api/places")
        .authorization(format!("Token {}", user.token))
        .json(&place_body("Bad"))
        .await;
    let stale = app
        .server
        .post("/api/places")
        .authorization_bearer(&expired)
        .json(&place_body("Late"))
        .await;

    malformed.assert_status(StatusCode::UNAUTHORIZED);
    stale.assert_status(StatusCode::UNAUTHORIZED);
    assert!(app.store.snapshot().await.1.is_empty());
}

#[tokio::test]
async fn test_create_place_validation() {
    let app = TestApp::new();
    let user = signup_unique_user(&app.server).await;

    let mut short = place_body("Short");
    short["description"] = json!("tiny");
    let mut blank = place_body("Blank");
    blank["address"] = json!("   ");

    for body in [short, blank] {
        let response = app
            .server
            .post("/api/places")
            .authorization_bearer(&user.token)
            .json(&body)
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
    assert!(app.store.snapshot().await.1.is_empty());
}

#[tokio::test]
async fn test_get_place_by_id() {
    let app = TestApp::new();
    let user = signup_unique_user(&app.server).await;
    let place = create_place(&app, &user, "Empire").await;

    let response = app.server.get(&format!("/api/places/{}", place.id)).await;
    response.assert_status_ok();
    assert_eq!(response.json::<PlaceResponse>().place, place);

    let missing = app.server.get(&format!("/api/places/{}", Uuid::new_v4())).await;
    assert_error(&missing, StatusCode::NOT_FOUND, "Could not find a place for the provided id.");

    let malformed = app.server.get("/api/places/p1").await;
    malformed.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_get_places_by_user_id() {
    let app = TestApp::new();
    let user = signup_unique_user(&app.server).await;
    let idle = signup_unique_user(&app.server).await;
    let first = create_place(&app, &user, "First").await;
    let second = create_place(&app, &user, "Second").await;

    let response = app.server.get(&format!("/api/places/user/{}", user.id)).await;
    response.assert_status_ok();
    assert_eq!(response.json::<PlacesResponse>().places, vec![first, second]);

    for uid in [idle.id.to_string(), Uuid::new_v4().to_string(), "u1".to_string()] {
        let response = app.server.get(&format!("/api/places/user/{uid}")).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_update_place_is_owner_only() {
    let app = TestApp::new();
    let owner = signup_unique_user(&app.server).await;
    let other = signup_unique_user(&app.server).await;
    let place = create_place(&app, &owner, "Empire").await;
    let path = format!("/api/places/{}", place.id);
    let update = json!({ "title": "Renamed", "description": "Still very tall" });

    let denied = app
        .server
        .patch(&path)
        .authorization_bearer(&other.token)
        .json(&update)
        .await;
    assert_error(&denied, StatusCode::UNAUTHORIZED, "You are not allowed to edit this place.");

    let response = app
        .server
        .patch(&path)
        .authorization_bearer(&owner.token)
        .json(&update)
        .await;
    response.assert_status_ok();
    let updated = response.json::<PlaceResponse>().place;
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.description, "Still very tall");
    assert_eq!(updated.address, place.address);
    assert_eq!(updated.creator, owner.id);
}

#[tokio::test]
async fn test_update_requires_token_but_get_does_not() {
    let app = TestApp::new();
    let owner = signup_unique_user(&app.server).await;
    let place = create_place(&app, &owner, "Empire").await;
    let path = format!("/api/places/{}", place.id);

    let response = app
        .server
        .patch(&path)
        .json(&json!({ "title": "Renamed", "description": "Still very tall" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    app.server.get(&path).await.assert_status_ok();
}

#[tokio::test]
async fn test_delete_place_between_two_users() {
    let app = TestApp::new();
    let u1 = signup_unique_user(&app.server).await;
    let u2 = signup_unique_user(&app.server).await;
    let p1 = create_place(&app, &u1, "p1").await;
    let path = format!("/api/places/{}", p1.id);

    let denied = app.server.delete(&path).authorization_bearer(&u2.token).await;
    assert_error(&denied, StatusCode::UNAUTHORIZED, "You are not allowed to delete this place.");
    app.server.get(&path).await.assert_status_ok();

    let response = app.server.delete(&path).authorization_bearer(&u1.token).await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<MessageResponse>(),
        MessageResponse { message: "Place deleted.".to_string() }
    );

    app.server.get(&path).await.assert_status(StatusCode::NOT_FOUND);
    let (users, places) = app.store.snapshot().await;
    assert!(places.is_empty());
    assert!(users.iter().all(|u| u.places.is_empty()));
    assert_consistent(&app).await;
}

#[tokio::test]
async fn test_delete_missing_place_is_not_found() {
    let app = TestApp::new();
    let user = signup_unique_user(&app.server).await;

    let response = app
        .server
        .delete(&format!("/api/places/{}", Uuid::new_v4()))
        .authorization_bearer(&user.token)
        .await;

    assert_error(&response, StatusCode::NOT_FOUND, "Could not find place to delete.");
}

#[tokio::test]
async fn test_delete_removes_image_file() {
    let app = TestApp::with_disk_images();
    let user = signup_unique_user(&app.server).await;
    let place = create_place(&app, &user, "Photo").await;
    let file = app.upload_dir.join("Photo.png");
    std::fs::write(&file, b"png").unwrap();

    let served = app.server.get("/uploads/images/Photo.png").await;
    served.assert_status_ok();
    assert_eq!(served.as_bytes().to_vec(), b"png".to_vec());

    app.server
        .delete(&format!("/api/places/{}", place.id))
        .authorization_bearer(&user.token)
        .await
        .assert_status_ok();

    assert!(!file.exists());
}

#[tokio::test]
async fn test_deleting_place_that_borrows_an_image_keeps_the_file() {
    let app = TestApp::with_disk_images();
    let owner = signup_unique_user(&app.server).await;
    let other = signup_unique_user(&app.server).await;
    let original = create_place(&app, &owner, "Landmark").await;
    let file = app.upload_dir.join("Landmark.png");
    std::fs::write(&file, b"png").unwrap();

    let mut body = place_body("Borrowed");
    body["image"] = json!("uploads/images/Landmark.png");
    let response = app
        .server
        .post("/api/places")
        .authorization_bearer(&other.token)
        .json(&body)
        .await;
    response.assert_status(StatusCode::CREATED);
    let borrowed = response.json::<PlaceResponse>().place;

    app.server
        .delete(&format!("/api/places/{}", borrowed.id))
        .authorization_bearer(&other.token)
        .await
        .assert_status_ok();

    assert!(file.exists());
    app.server.get("/uploads/images/Landmark.png").await.assert_status_ok();

    app.server
        .delete(&format!("/api/places/{}", original.id))
        .authorization_bearer(&owner.token)
        .await
        .assert_status_ok();

    assert!(!file.exists());
    assert_consistent(&app).await;
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let app = TestApp::new();

    let response = app.server.get("/api/nothing-here").await;

    assert_error(&response, StatusCode::NOT_FOUND, "Could not find this route.");
}

#[tokio::test]
async fn test_cors_preflight_bypasses_auth() {
    let app = TestApp::new();

    let response = app
        .server
        .method(Method::OPTIONS, "/api/places")
        .add_header(header::ORIGIN, HeaderValue::from_static("http://localhost:3000"))
        .add_header(
            header::ACCESS_CONTROL_REQUEST_METHOD,
            HeaderValue::from_static("POST"),
        )
        .add_header(
            header::ACCESS_CONTROL_REQUEST_HEADERS,
            HeaderValue::from_static("authorization,content-type"),
        )
        .await;

    response.assert_status_ok();
    assert_eq!(response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
    let allowed = response.header(header::ACCESS_CONTROL_ALLOW_METHODS);
    let allowed = allowed.to_str().unwrap();
    for method in ["GET", "POST", "PATCH", "DELETE"] {
        crate::assert_contains!(allowed, method);
    }
}
