//! Draft persistence: saves prompt text across sessions.
//!
//! DESIGN
//! ======
//! The session never touches storage directly; it goes through
//! [`DraftStore`]. Writes are fire-and-forget: a store that cannot write logs
//! a warning and carries on, and a store that cannot read behaves as empty.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use crate::error::ErrorCode;

pub const SYSTEM_PROMPT_KEY: &str = "systemPrompt";
pub const USER_PROMPT_KEY: &str = "userPrompt";

/// Key-value store for prompt drafts.
pub trait DraftStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// Best-effort write. Never fails from the caller's point of view.
    fn set(&self, key: &str, value: &str);
}

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("no config directory available")]
    NoConfigDir,
    #[error("draft file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("draft file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ErrorCode for DraftError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoConfigDir => "E_NO_CONFIG_DIR",
            Self::Io(_) => "E_DRAFT_IO",
            Self::Json(_) => "E_DRAFT_JSON",
        }
    }
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// In-process store. Drafts vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryDraftStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftStore for MemoryDraftStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// Drafts kept as a flat JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    path: PathBuf,
}

impl FileDraftStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<config_dir>/promptdiff/drafts.json`.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::NoConfigDir`] if the platform has no config directory.
    pub fn in_config_dir() -> Result<Self, DraftError> {
        let dir = dirs::config_dir().ok_or(DraftError::NoConfigDir)?;
        Ok(Self::new(dir.join("promptdiff").join("drafts.json")))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, DraftError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), DraftError> {
        // A corrupt file is replaced rather than blocking every later save.
        let mut entries = self.load().unwrap_or_default();
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}

impl DraftStore for FileDraftStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(mut entries) => entries.remove(key),
            Err(e) => {
                warn!(path = %self.path.display(), code = e.error_code(), error = %e, "drafts: read failed");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(e) = self.write(key, value) {
            warn!(path = %self.path.display(), key, code = e.error_code(), error = %e, "drafts: write failed");
        }
    }
}

// =============================================================================
// OPENING
// =============================================================================

/// Open the store drafts are restored from: `path` when given, else the
/// default file in the config directory. Drafts are read from here even
/// when the caller will not save; `read_only` only allows falling back to
/// an empty in-memory store when there is no config directory.
///
/// # Errors
///
/// Returns [`DraftError::NoConfigDir`] when no path is given, the platform
/// has no config directory, and the caller intends to save.
pub fn open_store(path: Option<PathBuf>, read_only: bool) -> Result<Box<dyn DraftStore>, DraftError> {
    let store = match path {
        Some(path) => FileDraftStore::new(path),
        None => match FileDraftStore::in_config_dir() {
            Ok(store) => store,
            Err(DraftError::NoConfigDir) if read_only => {
                warn!("drafts: no config directory; starting from empty drafts");
                return Ok(Box::new(MemoryDraftStore::new()));
            }
            Err(e) => return Err(e),
        },
    };
    debug!(path = %store.path().display(), read_only, "drafts: using file");
    Ok(Box::new(store))
}

#[cfg(test)]
#[path = "drafts_test.rs"]
mod tests;
