/**
 * Authentication Module
 *
 * Login and registration against the notes backend. Login writes the new
 * session to the Session Store; registration only reports a confirmation and
 * sends the user back to the login screen.
 */

use thiserror::Error;
use tracing::{info, warn};

use crate::egui_app::api_client::{ApiClient, ApiError};
use crate::egui_app::cancel::CallOptions;
use crate::egui_app::session_store::SessionStore;
use crate::egui_app::types::{AppView, Session};
use crate::shared::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};

const LOGIN_FAILED: &str = "Login failed";
const REGISTER_FAILED: &str = "Register failed";
const CREDENTIALS_REQUIRED: &str = "Username and password are required";

/// Login or registration was rejected. `message` is shown to the user as-is.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct AuthError {
    pub message: String,
}

impl AuthError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Use the backend's own text when it sent one, else `fallback`
    fn from_api(err: &ApiError, fallback: &str) -> Self {
        Self::new(err.server_message().unwrap_or(fallback))
    }
}

/// Result of a successful login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub session: Session,
    pub message: String,
    pub next: AppView,
}

/// Result of a successful registration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterOutcome {
    pub message: String,
    pub next: AppView,
}

/// Authentication UI state
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub error: Option<String>,
    /// Success text shown above the form (e.g. after registering)
    pub notice: Option<String>,
    pub loading: bool,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn set_error(&mut self, error: String) {
        self.notice = None;
        self.error = Some(error);
    }

    pub fn set_notice(&mut self, notice: String) {
        self.error = None;
        self.notice = Some(notice);
    }
}

fn check_credentials(username: &str, password: &str) -> Result<(), AuthError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(AuthError::new(CREDENTIALS_REQUIRED));
    }
    Ok(())
}

/// Exchange credentials for a session without touching the store
pub async fn request_login(
    api: &ApiClient,
    username: &str,
    password: &str,
    options: &CallOptions,
) -> Result<Session, AuthError> {
    check_credentials(username, password)?;
    let username = username.trim();

    let request = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };

    let response: LoginResponse = api
        .post("/login", &request, None, options)
        .await
        .map_err(|e| {
            warn!(username, status = ?e.status(), error = %e, "login rejected");
            AuthError::from_api(&e, LOGIN_FAILED)
        })?;

    if response.token.is_empty() {
        warn!(username, "login response carried an empty token");
        return Err(AuthError::new(LOGIN_FAILED));
    }

    let resolved = response
        .username
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| username.to_string());

    Ok(Session::new(response.token, resolved))
}

/// Persist a session obtained from [`request_login`]
pub fn complete_login(store: &mut SessionStore, session: Session) -> Result<LoginOutcome, AuthError> {
    store.save(&session).map_err(|e| {
        warn!(error = %e, "could not persist session");
        AuthError::new(format!("{}: could not save session", LOGIN_FAILED))
    })?;

    info!(username = session.username(), "logged in");
    Ok(LoginOutcome {
        session,
        message: "Logged in".to_string(),
        next: AppView::Notes,
    })
}

/// Log in and save the resulting session. On failure the store is untouched.
pub async fn login(
    api: &ApiClient,
    store: &mut SessionStore,
    username: &str,
    password: &str,
    options: &CallOptions,
) -> Result<LoginOutcome, AuthError> {
    let session = request_login(api, username, password, options).await?;
    complete_login(store, session)
}

/// Register a new account. An empty email is sent as absent.
pub async fn register(
    api: &ApiClient,
    username: &str,
    email: Option<&str>,
    password: &str,
    options: &CallOptions,
) -> Result<RegisterOutcome, AuthError> {
    check_credentials(username, password)?;
    let username = username.trim();

    let request = RegisterRequest {
        username: username.to_string(),
        email: email
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .map(str::to_string),
        password: password.to_string(),
    };

    let response: RegisterResponse = api
        .post("/register", &request, None, options)
        .await
        .map_err(|e| {
            warn!(username, status = ?e.status(), error = %e, "registration rejected");
            AuthError::from_api(&e, REGISTER_FAILED)
        })?;

    info!(username, "registered");
    Ok(RegisterOutcome {
        message: response
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| "Registered successfully".to_string()),
        next: AppView::Login,
    })
}
