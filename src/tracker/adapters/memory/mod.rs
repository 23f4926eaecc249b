//! In-memory users store for tests and embedding.

use crate::tracker::{
    adapters::json::codec,
    domain::{IdAllocator, IdentitySet, User},
    ports::{StoreError, StoreResult, UserStore},
};
use std::sync::{Arc, RwLock};

/// Keeps the encoded users document in memory.
///
/// Saves and loads go through the same JSON codec as the file store, so a
/// round trip exercises the real projection and hydration paths. Clones
/// share the same document.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    document: Arc<RwLock<Option<String>>>,
}

impl InMemoryUserStore {
    /// Creates a store with no saved document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store preloaded with `document`.
    #[must_use]
    pub fn with_document(document: impl Into<String>) -> Self {
        Self {
            document: Arc::new(RwLock::new(Some(document.into()))),
        }
    }

    /// Returns a copy of the saved document, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Persistence`] when the lock is poisoned.
    pub fn document(&self) -> StoreResult<Option<String>> {
        let guard = self.document.read().map_err(|err| {
            StoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(guard.clone())
    }
}

impl UserStore for InMemoryUserStore {
    fn save(&self, users: &IdentitySet<User>) -> StoreResult<()> {
        let encoded = codec::encode(users)?;
        let mut guard = self.document.write().map_err(|err| {
            StoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        *guard = Some(encoded);
        Ok(())
    }

    fn load(&self, ids: &mut IdAllocator) -> StoreResult<IdentitySet<User>> {
        match self.document()? {
            Some(document) => codec::decode(&document, ids),
            None => Ok(IdentitySet::new()),
        }
    }
}
