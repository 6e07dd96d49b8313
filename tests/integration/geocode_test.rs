//! Google geocoder against a wiremock server
//!
//! Also drives place creation over HTTP with the real geocoder so the
//! `ZERO_RESULTS` mapping is visible at the boundary.

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};
use yourplaces::backend::places::{GeocodeError, Geocoder, GoogleGeocoder};
use yourplaces::shared::Location;

use crate::common::{assert_error, signup_unique_user, TestApp};

fn geocoder_for(server: &MockServer) -> GoogleGeocoder {
    GoogleGeocoder::with_endpoint("test-api-key", format!("{}/geocode/json", server.uri()))
}

#[tokio::test]
async fn test_locate_returns_first_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .and(query_param("address", "20 W 34th St"))
        .and(query_param("key", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [
                { "geometry": { "location": { "lat": 40.7484405, "lng": -73.9878584 } } },
                { "geometry": { "location": { "lat": 0.0, "lng": 0.0 } } }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let location = geocoder_for(&server).locate("20 W 34th St").await.unwrap();

    assert_eq!(location, Location::new(40.7484405, -73.9878584));
}

#[tokio::test]
async fn test_zero_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/geocode/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ZERO_RESULTS",
            "results": []
        })))
        .mount(&server)
        .await;

    let result = geocoder_for(&server).locate("nowhere at all").await;

    assert_eq!(result, Err(GeocodeError::NoResults));
}

#[tokio::test]
async fn test_server_error_is_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = geocoder_for(&server).locate("20 W 34th St").await;

    assert!(matches!(result, Err(GeocodeError::Transport(_))));
}

#[tokio::test]
async fn test_transport_failures_never_carry_the_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("address", "500"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("address", "garbage"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    let geocoder = geocoder_for(&server);

    for address in ["500", "garbage"] {
        let Err(GeocodeError::Transport(detail)) = geocoder.locate(address).await else {
            panic!("expected a transport failure for {address:?}");
        };
        assert!(!detail.contains("test-api-key"), "{detail}");
        assert!(!detail.contains("key="), "{detail}");
    }

    let unreachable = GoogleGeocoder::with_endpoint("test-api-key", "http://127.0.0.1:1/geocode/json");
    let Err(GeocodeError::Transport(detail)) = unreachable.locate("20 W 34th St").await else {
        panic!("expected a transport failure for an unreachable endpoint");
    };
    assert!(!detail.contains("test-api-key"), "{detail}");
}

#[tokio::test]
async fn test_denied_request_is_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        })))
        .mount(&server)
        .await;

    let result = geocoder_for(&server).locate("20 W 34th St").await;

    assert!(matches!(result, Err(GeocodeError::Transport(_))));
}

#[tokio::test]
async fn test_unknown_address_rejects_place_creation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ZERO_RESULTS" })))
        .mount(&server)
        .await;
    let app = TestApp::with_geocoder(Arc::new(geocoder_for(&server)));
    let user = signup_unique_user(&app.server).await;

    let response = app
        .server
        .post("/api/places")
        .authorization_bearer(&user.token)
        .json(&json!({
            "title": "Atlantis",
            "description": "Lost somewhere at sea",
            "address": "Bottom of the ocean",
            "image": "uploads/images/atlantis.png"
        }))
        .await;

    assert_error(
        &response,
        StatusCode::UNPROCESSABLE_ENTITY,
        "Could not find location for the specified address.",
    );
    assert!(app.store.snapshot().await.1.is_empty());
}
