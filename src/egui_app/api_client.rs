//! API Client
//!
//! Thin wrapper over `reqwest` for the notes backend. Every call takes the
//! [`Session`] explicitly when it needs authorization and attaches it as a
//! bearer token; nothing is read from ambient state. Failures are folded into
//! one [`ApiError`] type so callers can treat all endpoints the same way.

use std::time::Duration;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::egui_app::cancel::CallOptions;
use crate::egui_app::config::Config;
use crate::egui_app::types::Session;
use crate::shared::notes::ApiMessage;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// No response reached the client
    #[error("Network error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status. `message` is the text the
    /// backend put in its `error` (or `message`) field, if any.
    #[error("Request failed ({status}): {}", http_message(.status, .message))]
    Http { status: u16, message: Option<String> },

    /// A 2xx body did not have the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    /// Build an `Http` error from a failed response body, preferring the
    /// backend's `error` field, then `message`.
    pub fn from_failure(status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ApiMessage>(body)
            .ok()
            .and_then(|parsed| parsed.text().map(str::to_string));
        Self::Http { status, message }
    }

    /// The server-provided message for `Http` errors, `None` otherwise
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Http { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn http_message(status: &u16, message: &Option<String>) -> String {
    match message {
        Some(message) => message.clone(),
        None => format!("request failed with status {}", status),
    }
}

/// HTTP client for the notes backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: Config,
    client: Client,
}

impl ApiClient {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        session: Option<&Session>,
        options: &CallOptions,
    ) -> Result<T, ApiError> {
        self.request(Method::GET, path, None::<&()>, session, options).await
    }

    pub async fn post<B, T>(
        &self,
        path: &str,
        body: &B,
        session: Option<&Session>,
        options: &CallOptions,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(body), session, options).await
    }

    pub async fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        session: Option<&Session>,
        options: &CallOptions,
    ) -> Result<(), ApiError> {
        self.request_empty(Method::PUT, path, Some(body), session, options).await
    }

    pub async fn delete(
        &self,
        path: &str,
        session: Option<&Session>,
        options: &CallOptions,
    ) -> Result<(), ApiError> {
        self.request_empty(Method::DELETE, path, None::<&()>, session, options).await
    }

    /// Send a request and decode the JSON response body into `T`
    pub async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        session: Option<&Session>,
        options: &CallOptions,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let bytes = self.send(method, path, body, session, options).await?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send a request whose success body is ignored
    pub async fn request_empty<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        session: Option<&Session>,
        options: &CallOptions,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.send(method, path, body, session, options).await.map(|_| ())
    }

    async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        session: Option<&Session>,
        options: &CallOptions,
    ) -> Result<Vec<u8>, ApiError>
    where
        B: Serialize + ?Sized,
    {
        if options.cancel.as_ref().is_some_and(|token| token.is_cancelled()) {
            return Err(ApiError::Cancelled);
        }

        let url = self.config.api_url(path);
        let timeout = options.timeout.unwrap_or_else(|| self.config.request_timeout());
        debug!(%method, path, authorized = session.is_some(), "sending request");

        let mut builder = self.client.request(method, &url);
        if let Some(session) = session {
            builder = builder.header(AUTHORIZATION, session.bearer());
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let exchange = async move {
            let response = builder
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            let status = response.status();
            let bytes = response
                .bytes()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;

            if !status.is_success() {
                return Err(ApiError::from_failure(status.as_u16(), &bytes));
            }
            Ok(bytes.to_vec())
        };
        let timed = async move {
            tokio::time::timeout(timeout, exchange)
                .await
                .unwrap_or_else(|_| Err(ApiError::Timeout(timeout)))
        };

        match &options.cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(ApiError::Cancelled),
                result = timed => result,
            },
            None => timed.await,
        }
    }
}
