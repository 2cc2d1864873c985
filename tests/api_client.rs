//! Request plumbing: bearer headers, error extraction, deadlines

mod common;

use std::time::Duration;

use assert_matches::assert_matches;
use notekeeper::egui_app::{ApiError, CallOptions, CancelToken};
use notekeeper::shared::Note;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{alice, client_for, unreachable_client};

async fn notes_server(template: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .respond_with(template)
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn test_bearer_header_only_with_session() {
    let server = notes_server(ResponseTemplate::new(200).set_body_json(json!([]))).await;
    let api = client_for(&server);

    let _: Vec<Note> = api.get("/notes", Some(&alice()), &CallOptions::new()).await.unwrap();
    let _: Vec<Note> = api.get("/notes", None, &CallOptions::new()).await.unwrap();

    let requests = server.received_requests().await.expect("recording is enabled");
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[0].headers.get("authorization").and_then(|v| v.to_str().ok()),
        Some("Bearer abc123")
    );
    assert!(requests[1].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_error_field_becomes_http_message() {
    let server = notes_server(
        ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid token: Signature verification failed"})),
    )
    .await;

    let err = client_for(&server)
        .get::<Vec<Note>>("/notes", Some(&alice()), &CallOptions::new())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ApiError::Http {
            status: 401,
            message: Some("Invalid token: Signature verification failed".to_string()),
        }
    );
}

#[tokio::test]
async fn test_unexpected_body_is_decode_error() {
    let server = notes_server(ResponseTemplate::new(200).set_body_json(json!({"notes": []}))).await;

    let err = client_for(&server)
        .get::<Vec<Note>>("/notes", Some(&alice()), &CallOptions::new())
        .await
        .unwrap_err();

    assert_matches!(err, ApiError::Decode(_));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let err = unreachable_client()
        .get::<Vec<Note>>("/notes", Some(&alice()), &CallOptions::new())
        .await
        .unwrap_err();

    assert_matches!(err, ApiError::Transport(_));
}

#[tokio::test]
async fn test_deadline_applies() {
    let server = notes_server(
        ResponseTemplate::new(200)
            .set_body_json(json!([]))
            .set_delay(Duration::from_secs(2)),
    )
    .await;

    let options = CallOptions::new().with_timeout(Duration::from_millis(100));
    let err = client_for(&server)
        .get::<Vec<Note>>("/notes", Some(&alice()), &options)
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::Timeout(Duration::from_millis(100)));
}

#[tokio::test]
async fn test_pre_cancelled_token_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let token = CancelToken::new();
    token.cancel();
    let err = client_for(&server)
        .get::<Vec<Note>>("/notes", Some(&alice()), &CallOptions::new().with_cancel(token))
        .await
        .unwrap_err();

    assert_eq!(err, ApiError::Cancelled);
}
