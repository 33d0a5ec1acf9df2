//! Persistence for the single catalog-service credential.
//!
//! The store is an injected capability rather than a process-wide global so
//! the pipeline and CLI can be exercised without touching the filesystem.
//! Exactly one value is persisted, in plain text, under a fixed path.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyStoreError {
    #[error("key store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read/write access to the stored catalog-service API key.
pub trait KeyStore {
    /// Returns the stored key, or `None` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStoreError::Io`] if the backing store cannot be read.
    fn load(&self) -> Result<Option<String>, KeyStoreError>;

    /// Persists `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStoreError::Io`] if the backing store cannot be written.
    fn save(&self, key: &str) -> Result<(), KeyStoreError>;
}

/// Plain-text file store at a fixed path, the desktop counterpart of the
/// original tool's browser-local `youtube_api_key` entry.
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> KeyStoreError {
        KeyStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl KeyStore for FileKeyStore {
    fn load(&self) -> Result<Option<String>, KeyStoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let key = contents.trim().to_string();
                Ok(if key.is_empty() { None } else { Some(key) })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_err(e)),
        }
    }

    fn save(&self, key: &str) -> Result<(), KeyStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        std::fs::write(&self.path, key).map_err(|e| self.io_err(e))
    }
}

/// In-memory store for tests and one-shot invocations.
#[derive(Default)]
pub struct MemoryKeyStore {
    key: Mutex<Option<String>>,
}

impl MemoryKeyStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_key(key: &str) -> Self {
        Self {
            key: Mutex::new(Some(key.to_string())),
        }
    }
}

impl KeyStore for MemoryKeyStore {
    fn load(&self) -> Result<Option<String>, KeyStoreError> {
        Ok(self.key.lock().expect("key store lock poisoned").clone())
    }

    fn save(&self, key: &str) -> Result<(), KeyStoreError> {
        *self.key.lock().expect("key store lock poisoned") = Some(key.to_string());
        Ok(())
    }
}
