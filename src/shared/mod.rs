//! Shared Module
//!
//! Types that cross the wire between the notes client and the backend REST
//! API. Everything here is plain data: serde request/response bodies, the
//! note record itself, shared validation errors and configuration.

/// Note records and note request/response bodies
pub mod notes;

/// Login and registration request/response bodies
pub mod auth;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use notes::{Note, NoteDraft, NoteId, CreateNoteResponse, ApiMessage};
pub use auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
