//! egui Notes App Module
//!
//! The notes client: session persistence, the HTTP client for the notes
//! backend, login/registration, the notes collection controller and the
//! egui views that tie them together.
//!
//! # Module Structure
//!
//! ```text
//! egui_app/
//! ├── mod.rs           - Module exports and documentation
//! ├── main.rs          - Desktop entry point (binary)
//! ├── config.rs        - Server URL, timeouts, state file location
//! ├── types.rs         - AppView, Session, ThemePreference
//! ├── session_store.rs - Persistent token/username/theme slots
//! ├── cancel.rs        - Per-call deadlines and cancellation
//! ├── api_client.rs    - reqwest wrapper and ApiError
//! ├── auth.rs          - Login and registration
//! ├── notes.rs         - Notes collection controller
//! ├── state/           - AppState driving the views
//! ├── theme/           - Light/dark palettes
//! └── views/           - egui screens
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! // Run the desktop app:
//! // cargo run --bin egui_app
//! ```

pub mod config;
pub mod types;
pub mod session_store;
pub mod cancel;
pub mod api_client;
pub mod auth;
pub mod notes;
pub mod state;
pub mod theme;
pub mod views;

// Re-export commonly used types
pub use config::Config;
pub use types::{AppView, Session, ThemePreference};
pub use session_store::{FileStore, KeyValueStore, MemoryStore, SessionStore, StoreError};
pub use cancel::{CallOptions, CancelToken};
pub use api_client::{ApiClient, ApiError};
pub use auth::{login, register, AuthError, AuthState, LoginOutcome, RegisterOutcome};
pub use notes::{LoadState, NotesController, NotesError, RefreshOutcome, RefreshTicket};
pub use state::AppState;
