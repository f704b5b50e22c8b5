//! Persisted session token
//!
//! The token store is the single source of truth for the session token.
//! The HTTP adapters read it on every request and the session manager reads
//! it on every check; nothing caches the token elsewhere.

use crate::{ClientError, ClientResult};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Durable storage for one string token
pub trait TokenStore: Send + Sync + fmt::Debug {
    /// Current token, if any
    fn load(&self) -> Option<String>;

    /// Persist `token`, replacing any previous one
    fn save(&self, token: &str) -> ClientResult<()>;

    /// Remove the token; returns whether one was present
    ///
    /// Clearing an empty store is a no-op, so repeated calls are safe.
    fn clear(&self) -> ClientResult<bool>;
}

/// Token kept in process memory only
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a token (a restored session)
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().clone()
    }

    fn save(&self, token: &str) -> ClientResult<()> {
        *self.token.lock() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> ClientResult<bool> {
        Ok(self.token.lock().take().is_some())
    }
}

/// Token kept in a small JSON key/value file
///
/// The file holds an object such as `{"admin_token": "..."}`; other keys are
/// preserved on write. Each operation reads the file fresh and writes it
/// back under a lock.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    key: String,
    lock: Mutex<()>,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_dir(&self) -> ClientResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ClientError::Storage(e.to_string()))?;
        }
        Ok(())
    }

    /// Stored object; a missing or unreadable file is an empty object
    fn read_entries(&self) -> Map<String, Value> {
        let Ok(text) = fs::read_to_string(&self.path) else {
            return Map::new();
        };
        match serde_json::from_str::<Value>(&text) {
            Ok(Value::Object(map)) => map,
            _ => {
                tracing::warn!(path = %self.path.display(), "token file is not a JSON object, ignoring");
                Map::new()
            }
        }
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> ClientResult<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json).map_err(|e| ClientError::Storage(e.to_string()))
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let _guard = self.lock.lock();
        self.read_entries()
            .get(&self.key)
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(String::from)
    }

    fn save(&self, token: &str) -> ClientResult<()> {
        let _guard = self.lock.lock();
        let mut entries = self.read_entries();
        entries.insert(self.key.clone(), Value::String(token.to_string()));
        self.write_entries(&entries)
    }

    fn clear(&self) -> ClientResult<bool> {
        let _guard = self.lock.lock();
        let mut entries = self.read_entries();
        if entries.remove(&self.key).is_none() {
            return Ok(false);
        }
        self.write_entries(&entries)?;
        Ok(true)
    }
}
