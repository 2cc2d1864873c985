use std::future::Future;
use std::sync::mpsc::{channel, Receiver, TryRecvError};

use tracing::{error, info, warn};

use crate::egui_app::api_client::{ApiClient, ApiError};
use crate::egui_app::auth::{self, AuthError, AuthState, RegisterOutcome};
use crate::egui_app::cancel::{CallOptions, CancelToken};
use crate::egui_app::config::Config;
use crate::egui_app::notes::{self, NotesController, RefreshOutcome, RefreshTicket};
use crate::egui_app::session_store::SessionStore;
use crate::egui_app::types::{AppView, Session, ThemePreference};
use crate::shared::notes::{CreateNoteResponse, Note, NoteDraft, NoteId};

type Pending<T, E> = Receiver<Result<T, E>>;

enum AuthResult {
    Login(Result<Session, AuthError>),
    Register(Result<RegisterOutcome, AuthError>),
}

/// Which auth exchange a pending worker is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthRequest {
    Login,
    Register,
}

impl AuthRequest {
    fn failed(self, message: impl Into<String>) -> AuthResult {
        let error = AuthError::new(message);
        match self {
            AuthRequest::Login => AuthResult::Login(Err(error)),
            AuthRequest::Register => AuthResult::Register(Err(error)),
        }
    }

    fn worker_lost(self) -> AuthResult {
        match self {
            AuthRequest::Login => self.failed("Login stopped unexpectedly"),
            AuthRequest::Register => self.failed("Registration stopped unexpectedly"),
        }
    }
}

/// In-progress edit of an existing note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub id: NoteId,
    pub title: String,
    pub content: String,
}

/// Run `task` on its own thread with a single-threaded tokio runtime and
/// hand the result back over a channel.
fn run_in_background<T, F, Fut, G>(task: F, on_runtime_error: G) -> Receiver<T>
where
    F: FnOnce() -> Fut + Send + 'static,
    G: FnOnce(String) -> T + Send + 'static,
    Fut: Future<Output = T>,
    T: Send + 'static,
{
    let (tx, rx) = channel();
    std::thread::spawn(move || {
        let result = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
            Ok(rt) => rt.block_on(task()),
            Err(e) => on_runtime_error(format!("Failed to create runtime: {}", e)),
        };
        let _ = tx.send(result);
    });
    rx
}

/// Check a pending channel. `Some` once the worker has answered or died.
fn poll_pending<T, E>(
    pending: &Pending<T, E>,
    on_disconnect: impl FnOnce() -> E,
) -> Option<Result<T, E>> {
    match pending.try_recv() {
        Ok(result) => Some(result),
        Err(TryRecvError::Empty) => None,
        Err(TryRecvError::Disconnected) => Some(Err(on_disconnect())),
    }
}

fn worker_lost() -> ApiError {
    ApiError::Transport("background request stopped unexpectedly".to_string())
}

/// Central application state shared across egui views.
///
/// Owns the session, the notes cache and every form input. Network work is
/// started here, runs on worker threads, and is folded back in by
/// [`AppState::poll_results`] once per frame.
pub struct AppState {
    pub config: Config,
    api: ApiClient,
    store: SessionStore,
    session: Option<Session>,
    pub theme: ThemePreference,
    pub current_view: AppView,
    pub auth_state: AuthState,
    pub notes: NotesController,
    /// Last user-visible message from a notes operation
    pub notes_error: Option<String>,

    pub username_input: String,
    pub email_input: String,
    pub password_input: String,
    pub title_input: String,
    pub content_input: String,
    pub editing: Option<EditDraft>,

    auth_result: Option<(AuthRequest, Receiver<AuthResult>)>,
    refresh_result: Option<(RefreshTicket, Pending<Vec<Note>, ApiError>)>,
    create_result: Option<(NoteDraft, Pending<CreateNoteResponse, ApiError>)>,
    update_result: Option<(NoteId, NoteDraft, Pending<(), ApiError>)>,
    delete_result: Option<(NoteId, Pending<(), ApiError>)>,
    notes_cancel: CancelToken,
}

impl AppState {
    /// Build from the on-disk config and state file
    pub fn new() -> Self {
        let config = Config::load_or_default();
        let store = SessionStore::open_file(config.state_file());
        Self::with_parts(config, store)
    }

    /// Build from explicit parts. A persisted session goes straight to the
    /// notes screen and starts a refresh.
    pub fn with_parts(config: Config, store: SessionStore) -> Self {
        let session = store.load().unwrap_or_else(|e| {
            warn!(error = %e, "could not read stored session");
            None
        });
        let theme = store.load_theme().unwrap_or_else(|e| {
            warn!(error = %e, "could not read stored theme");
            ThemePreference::default()
        });

        let mut state = Self {
            api: ApiClient::new(config.clone()),
            config,
            store,
            current_view: if session.is_some() { AppView::Notes } else { AppView::Login },
            session,
            theme,
            auth_state: AuthState::new(),
            notes: NotesController::new(),
            notes_error: None,
            username_input: String::new(),
            email_input: String::new(),
            password_input: String::new(),
            title_input: String::new(),
            content_input: String::new(),
            editing: None,
            auth_result: None,
            refresh_result: None,
            create_result: None,
            update_result: None,
            delete_result: None,
            notes_cancel: CancelToken::new(),
        };

        info!(server = state.config.server_url(), restored = state.session.is_some(), "AppState initialized");
        if state.session.is_some() {
            state.refresh_notes();
        }
        state
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn has_pending_requests(&self) -> bool {
        self.auth_result.is_some()
            || self.refresh_result.is_some()
            || self.create_result.is_some()
            || self.update_result.is_some()
            || self.delete_result.is_some()
    }

    pub fn is_creating(&self) -> bool {
        self.create_result.is_some()
    }

    pub fn is_saving_edit(&self) -> bool {
        self.update_result.is_some()
    }

    pub fn deleting_id(&self) -> Option<NoteId> {
        self.delete_result.as_ref().map(|(id, _)| *id)
    }

    fn notes_options(&self) -> CallOptions {
        CallOptions::new().with_cancel(self.notes_cancel.clone())
    }

    /// Apply every finished background request. Call once per frame.
    pub fn poll_results(&mut self) {
        self.poll_auth();
        self.poll_refresh();
        self.poll_create();
        self.poll_update();
        self.poll_delete();
    }

    fn poll_auth(&mut self) {
        let Some((request, rx)) = &self.auth_result else { return };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => request.worker_lost(),
        };
        self.auth_result = None;
        self.auth_state.loading = false;

        match result {
            AuthResult::Login(Ok(session)) => match auth::complete_login(&mut self.store, session) {
                Ok(outcome) => {
                    self.session = Some(outcome.session);
                    self.current_view = outcome.next;
                    self.auth_state.set_notice(outcome.message);
                    self.password_input.clear();
                    self.email_input.clear();
                    self.refresh_notes();
                }
                Err(e) => self.auth_state.set_error(e.message),
            },
            AuthResult::Register(Ok(outcome)) => {
                self.auth_state.set_notice(outcome.message);
                self.current_view = outcome.next;
                self.password_input.clear();
            }
            AuthResult::Login(Err(e)) | AuthResult::Register(Err(e)) => {
                self.auth_state.set_error(e.message);
            }
        }
    }

    fn poll_refresh(&mut self) {
        let Some((_, rx)) = &self.refresh_result else { return };
        let Some(result) = poll_pending(rx, worker_lost) else { return };
        let Some((ticket, _)) = self.refresh_result.take() else { return };

        // Fetch failures are logged by the controller and shown via its state.
        if let Ok(RefreshOutcome::Stale) = self.notes.finish_refresh(ticket, result) {
            self.refresh_notes();
        }
    }

    fn poll_create(&mut self) {
        let Some((_, rx)) = &self.create_result else { return };
        let Some(result) = poll_pending(rx, worker_lost) else { return };
        let Some((draft, _)) = self.create_result.take() else { return };

        match self.notes.finish_create(draft, result) {
            Ok(_) => {
                self.title_input.clear();
                self.content_input.clear();
                self.notes_error = None;
            }
            Err(e) => self.notes_error = Some(e.to_string()),
        }
    }

    fn poll_update(&mut self) {
        let Some((_, _, rx)) = &self.update_result else { return };
        let Some(result) = poll_pending(rx, worker_lost) else { return };
        let Some((id, draft, _)) = self.update_result.take() else { return };

        match self.notes.finish_update(id, draft, result) {
            Ok(()) => {
                self.editing = None;
                self.notes_error = None;
            }
            Err(e) => self.notes_error = Some(e.to_string()),
        }
    }

    fn poll_delete(&mut self) {
        let Some((_, rx)) = &self.delete_result else { return };
        let Some(result) = poll_pending(rx, worker_lost) else { return };
        let Some((id, _)) = self.delete_result.take() else { return };

        match self.notes.finish_delete(id, result) {
            Ok(_) => {
                if self.editing.as_ref().is_some_and(|edit| edit.id == id) {
                    self.editing = None;
                }
                self.notes_error = None;
            }
            Err(e) => self.notes_error = Some(e.to_string()),
        }
    }

    pub fn handle_login(&mut self) {
        if self.auth_result.is_some() {
            return;
        }
        self.auth_state.loading = true;
        self.auth_state.clear_error();

        let api = self.api.clone();
        let username = self.username_input.clone();
        let password = self.password_input.clone();

        let rx = run_in_background(
            move || async move {
                AuthResult::Login(
                    auth::request_login(&api, &username, &password, &CallOptions::new()).await,
                )
            },
            |msg| AuthRequest::Login.failed(msg),
        );
        self.auth_result = Some((AuthRequest::Login, rx));
    }

    pub fn handle_register(&mut self) {
        if self.auth_result.is_some() {
            return;
        }
        self.auth_state.loading = true;
        self.auth_state.clear_error();

        let api = self.api.clone();
        let username = self.username_input.clone();
        let email = self.email_input.clone();
        let password = self.password_input.clone();

        let rx = run_in_background(
            move || async move {
                AuthResult::Register(
                    auth::register(&api, &username, Some(&email), &password, &CallOptions::new())
                        .await,
                )
            },
            |msg| AuthRequest::Register.failed(msg),
        );
        self.auth_result = Some((AuthRequest::Register, rx));
    }

    pub fn show_register(&mut self) {
        self.switch_auth_view(AppView::Register);
    }

    pub fn show_login(&mut self) {
        self.switch_auth_view(AppView::Login);
    }

    fn switch_auth_view(&mut self, view: AppView) {
        if self.is_authenticated() || view.requires_session() {
            return;
        }
        self.current_view = view;
        self.auth_state.clear_error();
        self.password_input.clear();
    }

    /// Start a refresh unless one is already running
    pub fn refresh_notes(&mut self) {
        let Some(session) = self.session.clone() else { return };
        if self.refresh_result.is_some() {
            return;
        }
        let ticket = self.notes.begin_refresh();

        let api = self.api.clone();
        let options = self.notes_options();
        let rx = run_in_background(
            move || async move { notes::fetch_notes(&api, &session, &options).await },
            |msg| Err(ApiError::Transport(msg)),
        );
        self.refresh_result = Some((ticket, rx));
    }

    pub fn handle_create(&mut self) {
        let Some(session) = self.session.clone() else { return };
        if self.create_result.is_some() {
            return;
        }
        let draft = match NotesController::prepare(&self.title_input, &self.content_input) {
            Ok(draft) => draft,
            Err(e) => {
                self.notes_error = Some(e.to_string());
                return;
            }
        };
        self.notes_error = None;

        let api = self.api.clone();
        let options = self.notes_options();
        let body = draft.clone();
        let rx = run_in_background(
            move || async move { notes::create_note(&api, &session, &body, &options).await },
            |msg| Err(ApiError::Transport(msg)),
        );
        self.create_result = Some((draft, rx));
    }

    pub fn start_edit(&mut self, id: NoteId) {
        if let Some(note) = self.notes.get(id) {
            self.editing = Some(EditDraft {
                id,
                title: note.title.clone(),
                content: note.content.clone(),
            });
        }
    }

    pub fn cancel_edit(&mut self) {
        if self.update_result.is_none() {
            self.editing = None;
        }
    }

    pub fn handle_update(&mut self) {
        let Some(session) = self.session.clone() else { return };
        let Some(edit) = self.editing.clone() else { return };
        if self.update_result.is_some() {
            return;
        }
        let draft = match NotesController::prepare(&edit.title, &edit.content) {
            Ok(draft) => draft,
            Err(e) => {
                self.notes_error = Some(e.to_string());
                return;
            }
        };
        self.notes_error = None;

        let api = self.api.clone();
        let options = self.notes_options();
        let body = draft.clone();
        let id = edit.id;
        let rx = run_in_background(
            move || async move { notes::update_note(&api, &session, id, &body, &options).await },
            |msg| Err(ApiError::Transport(msg)),
        );
        self.update_result = Some((id, draft, rx));
    }

    pub fn handle_delete(&mut self, id: NoteId) {
        let Some(session) = self.session.clone() else { return };
        if self.delete_result.is_some() {
            return;
        }

        let api = self.api.clone();
        let options = self.notes_options();
        let rx = run_in_background(
            move || async move { notes::delete_note(&api, &session, id, &options).await },
            |msg| Err(ApiError::Transport(msg)),
        );
        self.delete_result = Some((id, rx));
    }

    /// Flip and persist the theme. The session is not touched.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        if let Err(e) = self.store.save_theme(self.theme) {
            warn!(error = %e, "could not persist theme");
        }
    }

    pub fn logout(&mut self) {
        // In-flight notes requests must not land after the list is cleared.
        self.notes_cancel.cancel();
        self.notes_cancel = CancelToken::new();
        self.refresh_result = None;
        self.create_result = None;
        self.update_result = None;
        self.delete_result = None;
        self.auth_result = None;

        if let Err(e) = self.store.clear() {
            error!(error = %e, "could not clear stored session");
        }
        self.session = None;
        self.notes.reset();
        self.notes_error = None;
        self.editing = None;

        self.auth_state = AuthState::new();
        self.current_view = AppView::Login;
        self.username_input.clear();
        self.email_input.clear();
        self.password_input.clear();
        self.title_input.clear();
        self.content_input.clear();
        info!("logged out");
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::egui_app::session_store::MemoryStore;

    fn offline_state(backend: MemoryStore) -> AppState {
        AppState::with_parts(Config::new(), SessionStore::new(backend))
    }

    #[test]
    fn test_starts_on_login_without_session() {
        let state = offline_state(MemoryStore::new());
        assert_eq!(state.current_view, AppView::Login);
        assert!(!state.is_authenticated());
        assert_eq!(state.theme, ThemePreference::Light);
    }

    #[test]
    fn test_switch_between_login_and_register() {
        let mut state = offline_state(MemoryStore::new());
        state.password_input = "secret".to_string();
        state.show_register();
        assert_eq!(state.current_view, AppView::Register);
        assert!(state.password_input.is_empty());
        state.show_login();
        assert_eq!(state.current_view, AppView::Login);
    }

    #[test]
    fn test_toggle_theme_persists_without_session() {
        let backend = MemoryStore::new();
        let mut state = offline_state(backend.clone());
        state.toggle_theme();

        assert_eq!(state.theme, ThemePreference::Dark);
        let stored = backend.snapshot();
        assert_eq!(stored.get("theme").map(String::as_str), Some("dark"));
        assert!(!stored.contains_key("token"));
        assert!(!state.is_authenticated());
    }

    #[test]
    fn test_create_without_session_is_ignored() {
        let mut state = offline_state(MemoryStore::new());
        state.title_input = "t".into();
        state.content_input = "c".into();
        state.handle_create();
        assert!(!state.has_pending_requests());
    }

    #[test]
    fn test_lost_register_worker_reports_on_register_screen() {
        let mut state = offline_state(MemoryStore::new());
        state.show_register();
        let (tx, rx) = channel::<AuthResult>();
        drop(tx);
        state.auth_result = Some((AuthRequest::Register, rx));
        state.auth_state.loading = true;

        state.poll_results();

        assert_eq!(state.current_view, AppView::Register);
        assert!(!state.auth_state.loading);
        assert_eq!(state.auth_state.error.as_deref(), Some("Registration stopped unexpectedly"));
    }

    #[test]
    fn test_lost_login_worker_reports_login_failure() {
        let mut state = offline_state(MemoryStore::new());
        let (tx, rx) = channel::<AuthResult>();
        drop(tx);
        state.auth_result = Some((AuthRequest::Login, rx));

        state.poll_results();

        assert_eq!(state.current_view, AppView::Login);
        assert_eq!(state.auth_state.error.as_deref(), Some("Login stopped unexpectedly"));
    }

    #[test]
    fn test_start_edit_unknown_id() {
        let mut state = offline_state(MemoryStore::new());
        state.start_edit(7);
        assert!(state.editing.is_none());
    }
}
