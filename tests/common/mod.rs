//! Common test utilities and helpers
//!
//! Builds API clients pointed at a `wiremock` backend and a few fixtures
//! shared by the integration tests.
#![allow(dead_code)]

use std::time::Duration;

use notekeeper::egui_app::{ApiClient, AppState, Config, Session};
use notekeeper::shared::config::AppConfig;
use notekeeper::shared::Note;
use wiremock::MockServer;

/// Config whose base URL is the mock server's `/api` prefix
pub fn config_for(server: &MockServer) -> Config {
    Config::with_builder(AppConfig::builder().server_url(format!("{}/api", server.uri())))
        .expect("mock server URL is valid")
}

pub fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(config_for(server))
}

/// A client pointed at a port nothing listens on
pub fn unreachable_client() -> ApiClient {
    let config = Config::with_builder(
        AppConfig::builder()
            .server_url("http://127.0.0.1:9/api")
            .request_timeout(Duration::from_secs(5)),
    )
    .expect("static URL is valid");
    ApiClient::new(config)
}

pub fn alice() -> Session {
    Session::new("abc123", "alice")
}

pub fn note(id: i64, title: &str, content: &str) -> Note {
    Note {
        id,
        title: title.to_string(),
        content: content.to_string(),
    }
}

/// Poll `state` until every background request has been applied
pub async fn settle(state: &mut AppState) {
    for _ in 0..300 {
        state.poll_results();
        if !state.has_pending_requests() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("background requests did not finish in time");
}
