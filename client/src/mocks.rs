//! Mock profile store for testing.

use crate::error::{ClientError, Result};
use crate::profile::ProfileStore;
use crate::state::CurrentUser;
use std::sync::{Arc, Mutex};

/// In-memory profile store.
///
/// Clones share the stored snapshot, so a test can hold its own handle to
/// inspect what the session wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    inner: Arc<Mutex<Option<CurrentUser>>>,
}

impl MemoryProfileStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently stored snapshot (for assertions).
    ///
    /// # Errors
    ///
    /// Returns an error if the backing lock is poisoned.
    pub fn snapshot(&self) -> Result<Option<CurrentUser>> {
        Ok(self
            .inner
            .lock()
            .map_err(|_| ClientError::ProfileStore("lock poisoned".to_string()))?
            .clone())
    }
}

impl ProfileStore for MemoryProfileStore {
    fn save(&self, user: &CurrentUser) -> Result<()> {
        *self
            .inner
            .lock()
            .map_err(|_| ClientError::ProfileStore("lock poisoned".to_string()))? =
            Some(user.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<CurrentUser>> {
        self.snapshot()
    }

    fn clear(&self) -> Result<()> {
        *self
            .inner
            .lock()
            .map_err(|_| ClientError::ProfileStore("lock poisoned".to_string()))? = None;
        Ok(())
    }
}
