//! Shared Error Types
//!
//! Errors raised while building wire types, before any request is sent.
//! Decoding failures on responses belong to the API client instead.
//!
//! # Usage
//!
//! ```rust
//! use notekeeper::shared::error::SharedError;
//!
//! let error = SharedError::validation("title", "Title cannot be empty");
//! ```
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }
}
