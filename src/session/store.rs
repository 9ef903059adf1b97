//! Session persistence gateway.
//!
//! One serialized ledger under one fixed key. Every failure is logged and
//! swallowed: a broken or missing blob behaves like "no saved session".

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::warn;

use super::ledger::SessionLedger;
use crate::core::PersistenceError;

/// Key the ledger is stored under.
pub const SESSION_STORAGE_KEY: &str = "pokemon-memory-game-session";

/// Durable storage for the session ledger.
///
/// Implementations never fail outward; `load` returns `None` for a
/// missing or unreadable blob.
pub trait SessionStore {
    /// Persist the ledger, replacing any previous blob.
    fn save(&self, ledger: &SessionLedger);

    /// Read the persisted ledger, with timestamps restored as instants.
    fn load(&self) -> Option<SessionLedger>;

    /// Remove the persisted blob.
    fn clear(&self);

    /// Check whether a blob is present.
    fn exists(&self) -> bool;
}

fn encode(ledger: &SessionLedger) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(ledger)?)
}

fn decode(blob: &str) -> Result<SessionLedger, PersistenceError> {
    Ok(serde_json::from_str(blob)?)
}

/// Ledger stored as `<dir>/pokemon-memory-game-session.json`.
#[derive(Clone, Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store under the fixed key inside `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{SESSION_STORAGE_KEY}.json")),
        }
    }

    /// File backing this store.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn try_save(&self, ledger: &SessionLedger) -> Result<(), PersistenceError> {
        let blob = encode(ledger)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, blob)?;
        Ok(())
    }

    fn try_load(&self) -> Result<Option<SessionLedger>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => decode(&blob).map(Some),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn try_clear(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, ledger: &SessionLedger) {
        if let Err(err) = self.try_save(ledger) {
            warn!(path = %self.path.display(), %err, "failed to save session");
        }
    }

    fn load(&self) -> Option<SessionLedger> {
        self.try_load().unwrap_or_else(|err| {
            warn!(path = %self.path.display(), %err, "failed to load session");
            None
        })
    }

    fn clear(&self) {
        if let Err(err) = self.try_clear() {
            warn!(path = %self.path.display(), %err, "failed to clear session");
        }
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }
}

/// In-process store holding the serialized blob, as a browser's local
/// storage would.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    blob: Mutex<Option<String>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with a raw blob.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }

    /// Raw stored blob.
    #[must_use]
    pub fn blob(&self) -> Option<String> {
        self.blob.lock().clone()
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, ledger: &SessionLedger) {
        match encode(ledger) {
            Ok(blob) => *self.blob.lock() = Some(blob),
            Err(err) => warn!(%err, "failed to save session"),
        }
    }

    fn load(&self) -> Option<SessionLedger> {
        let blob = self.blob.lock().clone()?;
        decode(&blob)
            .map_err(|err| warn!(%err, "failed to load session"))
            .ok()
    }

    fn clear(&self) {
        *self.blob.lock() = None;
    }

    fn exists(&self) -> bool {
        self.blob.lock().is_some()
    }
}

impl<S: SessionStore + ?Sized> SessionStore for std::sync::Arc<S> {
    fn save(&self, ledger: &SessionLedger) {
        (**self).save(ledger);
    }

    fn load(&self) -> Option<SessionLedger> {
        (**self).load()
    }

    fn clear(&self) {
        (**self).clear();
    }

    fn exists(&self) -> bool {
        (**self).exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Winner;

    #[test]
    fn test_memory_round_trip() {
        let store = MemorySessionStore::new();
        assert!(!store.exists());
        assert!(store.load().is_none());

        let mut ledger = SessionLedger::new("Ash", "Misty");
        ledger.wins.record(Winner::Player2);
        store.save(&ledger);

        assert!(store.exists());
        assert_eq!(store.load(), Some(ledger));
    }

    #[test]
    fn test_memory_corrupt_blob_is_absent() {
        let store = MemorySessionStore::with_blob("{not json");
        assert!(store.exists());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_memory_clear() {
        let store = MemorySessionStore::new();
        store.save(&SessionLedger::new("a", "b"));
        store.clear();
        assert!(!store.exists());
    }

    #[test]
    fn test_file_store_path() {
        let store = FileSessionStore::new("/tmp/sessions");
        assert_eq!(store.path(), Path::new("/tmp/sessions/pokemon-memory-game-session.json"));
    }
}
