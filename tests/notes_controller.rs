//! Notes collection controller against a mock backend

mod common;

use std::time::Duration;

use assert_matches::assert_matches;
use notekeeper::egui_app::{ApiError, CallOptions, CancelToken, LoadState, NotesController, NotesError};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{any, body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{alice, client_for, note};

async fn mount_list(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .and(header("Authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn loaded_controller(server: &MockServer) -> NotesController {
    let mut controller = NotesController::new();
    controller
        .refresh(&client_for(server), &alice(), &CallOptions::new())
        .await
        .unwrap();
    controller
}

#[tokio::test]
async fn test_refresh_keeps_server_order() {
    let server = MockServer::start().await;
    mount_list(
        &server,
        json!([
            {"id": 3, "title": "Newest", "content": "c"},
            {"id": 1, "title": "Oldest", "content": "a"}
        ]),
    )
    .await;

    let controller = loaded_controller(&server).await;

    assert_eq!(controller.state(), &LoadState::Loaded);
    assert_eq!(
        controller.notes(),
        &[note(3, "Newest", "c"), note(1, "Oldest", "a")]
    );
}

#[tokio::test]
async fn test_refresh_twice_is_idempotent() {
    let server = MockServer::start().await;
    mount_list(&server, json!([{"id": 1, "title": "a", "content": "b"}])).await;

    let api = client_for(&server);
    let mut controller = NotesController::new();
    controller.refresh(&api, &alice(), &CallOptions::new()).await.unwrap();
    let first = controller.notes().to_vec();
    controller.refresh(&api, &alice(), &CallOptions::new()).await.unwrap();

    assert_eq!(controller.notes(), first.as_slice());
}

#[tokio::test]
async fn test_refresh_failure_sets_error_and_keeps_notes() {
    let server = MockServer::start().await;
    mount_list(&server, json!([{"id": 1, "title": "a", "content": "b"}])).await;
    let mut controller = loaded_controller(&server).await;

    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Token expired"})))
        .mount(&server)
        .await;

    let err = controller
        .refresh(&client_for(&server), &alice(), &CallOptions::new())
        .await
        .unwrap_err();

    assert_matches!(err, NotesError::Load(ApiError::Http { status: 401, .. }));
    assert_matches!(controller.state(), LoadState::Error(message) if message.contains("Token expired"));
    assert_eq!(controller.notes(), &[note(1, "a", "b")]);
}

#[tokio::test]
async fn test_create_appends_with_server_id() {
    let server = MockServer::start().await;
    mount_list(&server, json!([{"id": 7, "title": "Existing", "content": "x"}])).await;
    Mock::given(method("POST"))
        .and(path("/api/notes"))
        .and(header("Authorization", "Bearer abc123"))
        .and(body_json(json!({"title": "Groceries", "content": "Milk, eggs"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"message": "note added", "id": 42})))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = loaded_controller(&server).await;
    let created = controller
        .create(&client_for(&server), &alice(), "Groceries", "Milk, eggs", &CallOptions::new())
        .await
        .unwrap();

    assert_eq!(created, note(42, "Groceries", "Milk, eggs"));
    assert_eq!(
        controller.notes(),
        &[note(7, "Existing", "x"), note(42, "Groceries", "Milk, eggs")]
    );
}

#[tokio::test]
async fn test_create_with_blank_field_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let api = client_for(&server);
    let mut controller = NotesController::new();
    let err = controller
        .create(&api, &alice(), "Groceries", "   ", &CallOptions::new())
        .await
        .unwrap_err();

    assert_matches!(err, NotesError::Validation(_));
    assert!(controller.is_empty());
}

#[tokio::test]
async fn test_create_rejected_by_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/notes"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "title and content required"})))
        .mount(&server)
        .await;

    let mut controller = NotesController::new();
    let err = controller
        .create(&client_for(&server), &alice(), "t", "c", &CallOptions::new())
        .await
        .unwrap_err();

    assert_matches!(err, NotesError::Persistence(ApiError::Http { status: 400, .. }));
    assert!(controller.is_empty());
}

#[tokio::test]
async fn test_delete_removes_only_matching_note() {
    let server = MockServer::start().await;
    mount_list(
        &server,
        json!([
            {"id": 1, "title": "a", "content": "a"},
            {"id": 2, "title": "b", "content": "b"},
            {"id": 3, "title": "c", "content": "c"}
        ]),
    )
    .await;
    Mock::given(method("DELETE"))
        .and(path("/api/notes/2"))
        .and(header("Authorization", "Bearer abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = loaded_controller(&server).await;
    let removed = controller
        .delete(&client_for(&server), &alice(), 2, &CallOptions::new())
        .await
        .unwrap();

    assert_eq!(removed, Some(note(2, "b", "b")));
    assert_eq!(controller.notes(), &[note(1, "a", "a"), note(3, "c", "c")]);
}

#[tokio::test]
async fn test_delete_of_unknown_note_reports_persistence_error() {
    let server = MockServer::start().await;
    mount_list(&server, json!([{"id": 1, "title": "a", "content": "a"}])).await;
    Mock::given(method("DELETE"))
        .and(path("/api/notes/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "note not found"})))
        .mount(&server)
        .await;

    let mut controller = loaded_controller(&server).await;
    let err = controller
        .delete(&client_for(&server), &alice(), 99, &CallOptions::new())
        .await
        .unwrap_err();

    assert_matches!(err, NotesError::Persistence(ApiError::Http { status: 404, .. }));
    assert_eq!(controller.notes(), &[note(1, "a", "a")]);
}

#[tokio::test]
async fn test_update_replaces_after_confirmation() {
    let server = MockServer::start().await;
    mount_list(
        &server,
        json!([
            {"id": 1, "title": "a", "content": "a"},
            {"id": 2, "title": "b", "content": "b"}
        ]),
    )
    .await;
    Mock::given(method("PUT"))
        .and(path("/api/notes/1"))
        .and(body_json(json!({"title": "Groceries", "content": "Bread"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "updated"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = loaded_controller(&server).await;
    controller
        .update(&client_for(&server), &alice(), 1, "Groceries", "Bread", &CallOptions::new())
        .await
        .unwrap();

    assert_eq!(
        controller.notes(),
        &[note(1, "Groceries", "Bread"), note(2, "b", "b")]
    );
}

#[tokio::test]
async fn test_update_failure_leaves_note() {
    let server = MockServer::start().await;
    mount_list(&server, json!([{"id": 1, "title": "a", "content": "a"}])).await;
    Mock::given(method("PUT"))
        .and(path("/api/notes/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut controller = loaded_controller(&server).await;
    let result = controller
        .update(&client_for(&server), &alice(), 1, "new", "text", &CallOptions::new())
        .await;

    assert_matches!(result, Err(NotesError::Persistence(_)));
    assert_eq!(controller.notes(), &[note(1, "a", "a")]);
}

#[tokio::test]
async fn test_refresh_past_deadline_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let mut controller = NotesController::new();
    let options = CallOptions::new().with_timeout(Duration::from_millis(100));
    let err = controller
        .refresh(&client_for(&server), &alice(), &options)
        .await
        .unwrap_err();

    assert_matches!(err, NotesError::Load(ApiError::Timeout(_)));
    assert_matches!(controller.state(), LoadState::Error(_));
}

#[tokio::test]
async fn test_cancelled_delete_keeps_note() {
    let server = MockServer::start().await;
    mount_list(&server, json!([{"id": 1, "title": "a", "content": "a"}])).await;
    Mock::given(method("DELETE"))
        .and(path("/api/notes/1"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let mut controller = loaded_controller(&server).await;
    let token = CancelToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let err = controller
        .delete(&client_for(&server), &alice(), 1, &CallOptions::new().with_cancel(token))
        .await
        .unwrap_err();

    assert_matches!(err, NotesError::Persistence(ApiError::Cancelled));
    assert_eq!(controller.notes(), &[note(1, "a", "a")]);
}
