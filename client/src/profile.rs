//! Persisted profile mirror.
//!
//! The web application keeps the signed-in user's snapshot in client-local
//! persistent storage so a page reload can attribute writes without a
//! refetch. This module is the Rust analogue: a small store trait with a
//! JSON-file implementation.

use crate::error::{ClientError, Result};
use crate::state::CurrentUser;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Store for the persisted current-user mirror.
///
/// Implementations are synchronous: the mirror is a single small record in
/// local storage, not a network resource.
pub trait ProfileStore: Send + Sync {
    /// Persist the snapshot, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ProfileStore`] if the record cannot be written.
    fn save(&self, user: &CurrentUser) -> Result<()>;

    /// Load the persisted snapshot, if one exists.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ProfileStore`] if the store cannot be read;
    /// an absent or unreadable *record* is `Ok(None)`, not an error.
    fn load(&self) -> Result<Option<CurrentUser>>;

    /// Remove the persisted snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::ProfileStore`] if the record exists but
    /// cannot be removed.
    fn clear(&self) -> Result<()>;
}

/// Profile store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileProfileStore {
    path: PathBuf,
}

impl JsonFileProfileStore {
    /// Create a store writing to `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file path this store writes to.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl ProfileStore for JsonFileProfileStore {
    fn save(&self, user: &CurrentUser) -> Result<()> {
        let json = serde_json::to_string(user)
            .map_err(|e| ClientError::ProfileStore(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| ClientError::ProfileStore(e.to_string()))
    }

    fn load(&self) -> Result<Option<CurrentUser>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ClientError::ProfileStore(e.to_string())),
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(error) => {
                // A corrupt snapshot is treated as signed-out, not fatal.
                tracing::warn!(%error, path = %self.path.display(), "discarding unreadable profile snapshot");
                Ok(None)
            }
        }
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::ProfileStore(e.to_string())),
        }
    }
}
