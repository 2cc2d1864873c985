//! Notes Collection Controller
//!
//! Holds the client's ordered copy of the user's notes and keeps it in step
//! with the backend. Local state only changes after the server confirms an
//! operation; there are no optimistic inserts, edits or removals.
//!
//! Every network operation is available in two shapes:
//!
//! - a single async method (`refresh`, `create`, `update`, `delete`) that
//!   talks to the backend and applies the outcome
//! - a `begin`/`prepare` + `finish_*` pair, so the UI can run the request on a
//!   worker thread and apply the result on its own thread
//!
//! # Invariants
//! - Local order is server order, followed by notes created since the last
//!   refresh in creation order.
//! - A failed operation never changes the local sequence.
//! - A refresh that started before a confirmed create, update or delete is
//!   discarded instead of applied, since its list predates that change.
//! - The sequence is only meaningful while a session exists; `reset` empties it.

use thiserror::Error;
use tracing::{info, warn};

use crate::egui_app::api_client::{ApiClient, ApiError};
use crate::egui_app::cancel::CallOptions;
use crate::egui_app::types::Session;
use crate::shared::error::SharedError;
use crate::shared::notes::{CreateNoteResponse, Note, NoteDraft, NoteId};

/// Where the controller is in its fetch lifecycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Unloaded,
    Loading,
    Loaded,
    Error(String),
}

/// Issued by [`NotesController::begin_refresh`] and handed back to
/// [`NotesController::finish_refresh`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct RefreshTicket(u64);

/// What `finish_refresh` did with a successful fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Applied,
    /// The list changed locally while the fetch was in flight. Nothing was
    /// applied and the controller stays `Loading`; start another refresh.
    Stale,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotesError {
    /// A required field was empty; nothing was sent
    #[error("{0}")]
    Validation(#[from] SharedError),

    /// Listing notes failed
    #[error("Could not load notes: {0}")]
    Load(ApiError),

    /// Create, update or delete failed after validation passed
    #[error("Could not save changes: {0}")]
    Persistence(ApiError),
}

pub async fn fetch_notes(
    api: &ApiClient,
    session: &Session,
    options: &CallOptions,
) -> Result<Vec<Note>, ApiError> {
    api.get("/notes", Some(session), options).await
}

pub async fn create_note(
    api: &ApiClient,
    session: &Session,
    draft: &NoteDraft,
    options: &CallOptions,
) -> Result<CreateNoteResponse, ApiError> {
    api.post("/notes", draft, Some(session), options).await
}

pub async fn update_note(
    api: &ApiClient,
    session: &Session,
    id: NoteId,
    draft: &NoteDraft,
    options: &CallOptions,
) -> Result<(), ApiError> {
    api.put(&format!("/notes/{}", id), draft, Some(session), options).await
}

pub async fn delete_note(
    api: &ApiClient,
    session: &Session,
    id: NoteId,
    options: &CallOptions,
) -> Result<(), ApiError> {
    api.delete(&format!("/notes/{}", id), Some(session), options).await
}

#[derive(Debug, Clone, Default)]
pub struct NotesController {
    notes: Vec<Note>,
    state: LoadState,
    /// Bumped on every confirmed local change
    generation: u64,
}

impl NotesController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    /// Drop every cached note and return to `Unloaded`
    pub fn reset(&mut self) {
        self.notes.clear();
        self.state = LoadState::Unloaded;
        self.generation += 1;
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.state = LoadState::Loading;
        RefreshTicket(self.generation)
    }

    pub fn finish_refresh(
        &mut self,
        ticket: RefreshTicket,
        result: Result<Vec<Note>, ApiError>,
    ) -> Result<RefreshOutcome, NotesError> {
        match result {
            Ok(notes) if ticket.0 != self.generation => {
                info!(count = notes.len(), "discarding notes fetched before a local change");
                Ok(RefreshOutcome::Stale)
            }
            Ok(notes) => {
                info!(count = notes.len(), "notes loaded");
                self.notes = notes;
                self.state = LoadState::Loaded;
                Ok(RefreshOutcome::Applied)
            }
            Err(e) => {
                warn!(error = %e, "failed to load notes");
                self.state = LoadState::Error(e.to_string());
                Err(NotesError::Load(e))
            }
        }
    }

    /// Validate a title/content pair before anything is sent
    pub fn prepare(title: &str, content: &str) -> Result<NoteDraft, NotesError> {
        Ok(NoteDraft::new(title, content)?)
    }

    /// Append the created note once the server has assigned its id
    pub fn finish_create(
        &mut self,
        draft: NoteDraft,
        result: Result<CreateNoteResponse, ApiError>,
    ) -> Result<Note, NotesError> {
        let response = result.map_err(|e| {
            warn!(error = %e, "failed to create note");
            NotesError::Persistence(e)
        })?;

        let note = Note::from_draft(response.id, draft);
        info!(id = note.id, "note created");
        self.notes.push(note.clone());
        self.generation += 1;
        Ok(note)
    }

    /// Replace the local copy once the server accepted the edit
    pub fn finish_update(
        &mut self,
        id: NoteId,
        draft: NoteDraft,
        result: Result<(), ApiError>,
    ) -> Result<(), NotesError> {
        result.map_err(|e| {
            warn!(id, error = %e, "failed to update note");
            NotesError::Persistence(e)
        })?;

        match self.notes.iter_mut().find(|note| note.id == id) {
            Some(note) => {
                note.title = draft.title;
                note.content = draft.content;
                info!(id, "note updated");
            }
            None => warn!(id, "updated note is not in the local list"),
        }
        self.generation += 1;
        Ok(())
    }

    /// Remove the note once the server confirmed the delete.
    /// Returns the removed note, or `None` if it was not cached locally.
    pub fn finish_delete(
        &mut self,
        id: NoteId,
        result: Result<(), ApiError>,
    ) -> Result<Option<Note>, NotesError> {
        result.map_err(|e| {
            warn!(id, error = %e, "failed to delete note");
            NotesError::Persistence(e)
        })?;

        let removed = self
            .notes
            .iter()
            .position(|note| note.id == id)
            .map(|index| self.notes.remove(index));
        info!(id, found = removed.is_some(), "note deleted");
        self.generation += 1;
        Ok(removed)
    }

    /// Replace the local list with the server's
    pub async fn refresh(
        &mut self,
        api: &ApiClient,
        session: &Session,
        options: &CallOptions,
    ) -> Result<(), NotesError> {
        let ticket = self.begin_refresh();
        let result = fetch_notes(api, session, options).await;
        self.finish_refresh(ticket, result).map(|_| ())
    }

    pub async fn create(
        &mut self,
        api: &ApiClient,
        session: &Session,
        title: &str,
        content: &str,
        options: &CallOptions,
    ) -> Result<Note, NotesError> {
        let draft = Self::prepare(title, content)?;
        let result = create_note(api, session, &draft, options).await;
        self.finish_create(draft, result)
    }

    pub async fn update(
        &mut self,
        api: &ApiClient,
        session: &Session,
        id: NoteId,
        title: &str,
        content: &str,
        options: &CallOptions,
    ) -> Result<(), NotesError> {
        let draft = Self::prepare(title, content)?;
        let result = update_note(api, session, id, &draft, options).await;
        self.finish_update(id, draft, result)
    }

    pub async fn delete(
        &mut self,
        api: &ApiClient,
        session: &Session,
        id: NoteId,
        options: &CallOptions,
    ) -> Result<Option<Note>, NotesError> {
        let result = delete_note(api, session, id, options).await;
        self.finish_delete(id, result)
    }
}
