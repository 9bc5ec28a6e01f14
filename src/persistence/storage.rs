//! Where save blobs live.

use std::path::PathBuf;

use super::errors::PersistenceError;
use crate::core::constants::SAVE_FILE_NAME;
use crate::utils::persistence::{read_optional, remove_if_exists, save_path, write_atomic};

/// Key-value style storage for the single save blob.
pub trait SaveStore {
    /// Returns `None` when nothing has been saved yet.
    fn load(&mut self) -> Result<Option<String>, PersistenceError>;
    fn save(&mut self, blob: &str) -> Result<(), PersistenceError>;
    fn delete(&mut self) -> Result<(), PersistenceError>;
}

/// In-memory store for tests and headless runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    blob: Option<String>,
    fail_writes: bool,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `blob`.
    pub fn with_blob(blob: &str) -> Self {
        Self {
            blob: Some(blob.to_string()),
            ..Self::default()
        }
    }

    /// A store whose writes always fail.
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl SaveStore for MemoryStore {
    fn load(&mut self) -> Result<Option<String>, PersistenceError> {
        Ok(self.blob.clone())
    }

    fn save(&mut self, blob: &str) -> Result<(), PersistenceError> {
        if self.fail_writes {
            return Err(PersistenceError::Store("memory store is read-only".to_string()));
        }
        self.blob = Some(blob.to_string());
        self.saves += 1;
        Ok(())
    }

    fn delete(&mut self) -> Result<(), PersistenceError> {
        self.blob = None;
        Ok(())
    }
}

/// JSON file on disk, by default `~/.idlescape/save.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new() -> Result<Self, PersistenceError> {
        Ok(Self {
            path: save_path(SAVE_FILE_NAME)?,
        })
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SaveStore for FileStore {
    fn load(&mut self) -> Result<Option<String>, PersistenceError> {
        Ok(read_optional(&self.path)?)
    }

    fn save(&mut self, blob: &str) -> Result<(), PersistenceError> {
        write_atomic(&self.path, blob)?;
        Ok(())
    }

    fn delete(&mut self) -> Result<(), PersistenceError> {
        remove_if_exists(&self.path)?;
        Ok(())
    }
}
