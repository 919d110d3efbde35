//! Stream API integration tests
//!
//! Tests for the real-time relay endpoints: subscription validation,
//! publish fan-out, acknowledgement, and subscriber lifecycle.

mod common;

use axum::http::StatusCode;
use common::{create_test_server, sample_envelope};
use serde_json::json;

#[tokio::test]
async fn test_subscribe_without_chat_id_is_rejected() {
    let (server, state) = create_test_server();

    let response = server.get("/stream").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    // Nothing was registered
    assert_eq!(state.stream_registry.subscriber_count(""), 0);
}

#[tokio::test]
async fn test_subscribe_with_empty_chat_id_is_rejected() {
    let (server, _state) = create_test_server();

    let response = server.get("/stream").add_query_param("chatId", "").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn test_publish_without_chat_id_is_rejected() {
    let (server, _state) = create_test_server();

    let response = server
        .put("/stream")
        .json(&json!({ "message": sample_envelope() }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Missing"));
}

#[tokio::test]
async fn test_publish_without_message_is_rejected() {
    let (server, _state) = create_test_server();

    let response = server
        .put("/stream")
        .json(&json!({ "chatId": "u1-u2" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_publish_with_no_subscribers_acks_success() {
    let (server, _state) = create_test_server();

    let response = server
        .put("/stream")
        .json(&json!({ "chatId": "u1-u2", "message": sample_envelope() }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_publish_reaches_live_subscriber_with_exact_frame() {
    let (server, state) = create_test_server();

    let mut subscriber = state.stream_registry.subscribe("u1-u2");

    let response = server
        .put("/stream")
        .json(&json!({ "chatId": "u1-u2", "message": sample_envelope() }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let frame = subscriber.recv().await.unwrap();
    assert_eq!(
        &frame[..],
        b"data: {\"id\":\"m1\",\"message\":\"hi\"}\n\n" as &[u8]
    );
}

#[tokio::test]
async fn test_two_tabs_both_receive_and_other_chat_does_not() {
    let (server, state) = create_test_server();

    let mut tab_one = state.stream_registry.subscribe("u1-u2");
    let mut tab_two = state.stream_registry.subscribe("u1-u2");
    let mut other_chat = state.stream_registry.subscribe("u1-u3");

    server
        .put("/stream")
        .json(&json!({ "chatId": "u1-u2", "message": sample_envelope() }))
        .await;

    assert!(tab_one.recv().await.is_some());
    assert!(tab_two.recv().await.is_some());

    let nothing =
        tokio::time::timeout(std::time::Duration::from_millis(50), other_chat.recv()).await;
    assert!(nothing.is_err(), "unrelated conversation received a frame");
}

#[tokio::test]
async fn test_disconnect_then_publish_delivers_to_no_one() {
    let (server, state) = create_test_server();

    let subscriber = state.stream_registry.subscribe("u1-u2");
    drop(subscriber);
    assert_eq!(state.stream_registry.subscriber_count("u1-u2"), 0);

    // Second publish still succeeds, with zero deliveries
    let response = server
        .put("/stream")
        .json(&json!({ "chatId": "u1-u2", "message": sample_envelope() }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_unknown_route_falls_back_to_404() {
    let (server, _state) = create_test_server();

    let response = server.get("/nope").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
