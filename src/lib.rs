//! Notekeeper - Personal Notes Client
//!
//! A desktop client for a small notes REST backend: register, log in, then
//! create, list, edit and delete free-text notes. The session token, username
//! and theme preference are kept in a local state file between runs.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types exchanged with the backend
//!   - Note records and drafts, login/register bodies
//!   - Shared validation errors and configuration
//!
//! - **`egui_app`** - The client
//!   - Session store, API client, auth flow, notes controller
//!   - `AppState` and the egui views (binary: `egui_app`)
//!
//! # Usage
//!
//! ```rust,no_run
//! use notekeeper::egui_app::{ApiClient, CallOptions, Config, NotesController, SessionStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! let api = ApiClient::new(config.clone());
//! let mut store = SessionStore::open_file(config.state_file());
//!
//! let outcome = notekeeper::egui_app::login(&api, &mut store, "alice", "secret", &CallOptions::new()).await?;
//!
//! let mut notes = NotesController::new();
//! notes.refresh(&api, &outcome.session, &CallOptions::new()).await?;
//! notes.create(&api, &outcome.session, "Groceries", "Milk, eggs", &CallOptions::new()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Threading
//!
//! `AppState` lives on the UI thread. Each network request runs on its own
//! worker thread with a current-thread tokio runtime and reports back over a
//! channel, which the UI drains once per frame.

/// Shared types and data structures
pub mod shared;

/// Notes client and egui desktop app
pub mod egui_app;
