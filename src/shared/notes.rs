//! Note Data Structures
//!
//! A note is a server-owned record; the client only ever holds a cached copy.
//! The backend assigns ids, so `NoteDraft` is what the client builds and
//! `Note` is what it gets back.

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Server-assigned note identifier
pub type NoteId = i64;

/// A note as stored by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
}

impl Note {
    /// Build the local record for a draft the server accepted under `id`
    pub fn from_draft(id: NoteId, draft: NoteDraft) -> Self {
        Self {
            id,
            title: draft.title,
            content: draft.content,
        }
    }
}

/// Title and content for a note that is about to be created or updated.
///
/// Constructing one through [`NoteDraft::new`] guarantees both fields are
/// non-empty after trimming. The original text is kept as typed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Result<Self, SharedError> {
        let title = title.into();
        let content = content.into();

        if title.trim().is_empty() {
            return Err(SharedError::validation("title", "Title cannot be empty"));
        }
        if content.trim().is_empty() {
            return Err(SharedError::validation("content", "Content cannot be empty"));
        }

        Ok(Self { title, content })
    }
}

/// Body returned by `POST /notes`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNoteResponse {
    pub id: NoteId,
    #[serde(default)]
    pub message: Option<String>,
}

/// Generic `{message}` / `{error}` body used by the backend for acks and failures
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiMessage {
    /// The most specific human-readable text in the body, preferring `error`
    pub fn text(&self) -> Option<&str> {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .filter(|text| !text.trim().is_empty())
    }
}
