//! CBOR request/response encoding alongside the default JSON.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_bytes, body_json, send};
use serde::Deserialize;
use workshop_db::models::movie::{Actor, CreateMovie, Movie};
use workshop_db::models::user::User;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[tokio::test]
async fn cbor_body_and_cbor_response_round_trip() {
    let app = common::build_test_app();
    let input = CreateMovie {
        name: "Solaris".into(),
        producer: "Mosfilm".into(),
        release_date: chrono::NaiveDate::from_ymd_opt(1972, 3, 20).unwrap(),
        actors: vec![Actor {
            name: "Donatas Banionis".into(),
            age: Some(48),
        }],
    };

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/movies")
        .header("content-type", "application/cbor")
        .header("accept", "application/cbor")
        .body(Body::from(serde_cbor::to_vec(&input).unwrap()))
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()["content-type"], "application/cbor");

    let envelope: Envelope<Movie> = serde_cbor::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(envelope.data.name, input.name);
    assert_eq!(envelope.data.producer, input.producer);
    assert_eq!(envelope.data.release_date, input.release_date);
    assert_eq!(envelope.data.actors, input.actors);
}

#[tokio::test]
async fn cbor_request_with_json_response() {
    let app = common::build_test_app();
    let body = serde_cbor::to_vec(&serde_json::json!({"name": "Ada", "age": 36})).unwrap();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/users")
        .header("content-type", "application/cbor")
        .body(Body::from(body))
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Ada");
}

#[tokio::test]
async fn list_can_be_served_as_cbor() {
    let app = common::build_test_app();
    common::post_json(&app, "/api/v1/users", serde_json::json!({"name": "Grace", "age": 85})).await;

    let request = Request::builder()
        .uri("/api/v1/users")
        .header("accept", "application/cbor")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let envelope: Envelope<Vec<User>> = serde_cbor::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(envelope.data.len(), 1);
    assert_eq!(envelope.data[0].name, "Grace");
}

#[tokio::test]
async fn malformed_cbor_returns_400() {
    let app = common::build_test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/users")
        .header("content-type", "application/cbor")
        .body(Body::from(vec![0xff, 0x00, 0x13]))
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn errors_stay_json_when_cbor_is_accepted() {
    let app = common::build_test_app();
    let request = Request::builder()
        .uri("/api/v1/users/12345")
        .header("accept", "application/cbor")
        .body(Body::empty())
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}
