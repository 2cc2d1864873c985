//! Session Store
//!
//! Persists the session (`token` + `username`) and the theme preference in a
//! small key-value store. The session slots are always written or removed
//! together in a single backend write, so a reader never sees one without
//! the other.
//!
//! Two backends are provided:
//!
//! - [`FileStore`] - one JSON object on disk, replaced atomically via a
//!   temporary file and rename
//! - [`MemoryStore`] - process-local, shared through clones (tests, ephemeral runs)

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::egui_app::types::{Session, ThemePreference};

pub const TOKEN_KEY: &str = "token";
pub const USERNAME_KEY: &str = "username";
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("stored state is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("store lock poisoned")]
    Poisoned,
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// A tiny persistent string map
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Apply every change as one unit. `None` removes the key.
    fn apply(&mut self, changes: &[(&str, Option<&str>)]) -> Result<(), StoreError>;
}

fn apply_to_map(map: &mut BTreeMap<String, String>, changes: &[(&str, Option<&str>)]) {
    for (key, value) in changes {
        match value {
            Some(value) => {
                map.insert((*key).to_string(), (*value).to_string());
            }
            None => {
                map.remove(*key);
            }
        }
    }
}

/// JSON-file backed store
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(StoreError::io(&path, e)),
        };
        debug!(path = %path.display(), keys = entries.len(), "opened state file");
        Ok(Self { path, entries })
    }

    /// A store at `path` that ignores whatever is currently on disk.
    /// The next write replaces the file.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: BTreeMap::new(),
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;
        }

        let json = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        {
            let mut file = fs::File::create(&tmp).map_err(|e| StoreError::io(&tmp, e))?;
            file.write_all(&json).map_err(|e| StoreError::io(&tmp, e))?;
            file.sync_all().map_err(|e| StoreError::io(&tmp, e))?;
        }
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::io(&self.path, e))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn apply(&mut self, changes: &[(&str, Option<&str>)]) -> Result<(), StoreError> {
        let mut next = self.entries.clone();
        apply_to_map(&mut next, changes);
        self.persist(&next)?;
        self.entries = next;
        Ok(())
    }
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn apply(&mut self, changes: &[(&str, Option<&str>)]) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        apply_to_map(&mut entries, changes);
        Ok(())
    }
}

/// Session and theme persistence on top of a [`KeyValueStore`]
pub struct SessionStore {
    backend: Box<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Open the file-backed store. An unreadable file is logged and replaced
    /// by an empty store so startup never fails on stale local state.
    pub fn open_file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match FileStore::open(&path) {
            Ok(store) => Self::new(store),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "discarding unreadable state file");
                Self::new(FileStore::empty(path))
            }
        }
    }

    /// The persisted session, present only when both slots are set
    pub fn load(&self) -> Result<Option<Session>, StoreError> {
        let token = self.backend.get(TOKEN_KEY)?.filter(|t| !t.is_empty());
        let username = self.backend.get(USERNAME_KEY)?;

        Ok(match (token, username) {
            (Some(token), Some(username)) => Some(Session::new(token, username)),
            _ => None,
        })
    }

    pub fn save(&mut self, session: &Session) -> Result<(), StoreError> {
        self.backend.apply(&[
            (TOKEN_KEY, Some(session.token())),
            (USERNAME_KEY, Some(session.username())),
        ])?;
        info!(username = session.username(), "session saved");
        Ok(())
    }

    /// Remove both session slots. The theme is left alone.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.backend.apply(&[(TOKEN_KEY, None), (USERNAME_KEY, None)])?;
        info!("session cleared");
        Ok(())
    }

    pub fn load_theme(&self) -> Result<ThemePreference, StoreError> {
        let stored = self.backend.get(THEME_KEY)?;
        Ok(ThemePreference::from_stored(stored.as_deref()))
    }

    pub fn save_theme(&mut self, theme: ThemePreference) -> Result<(), StoreError> {
        self.backend.apply(&[(THEME_KEY, Some(theme.as_str()))])
    }
}
