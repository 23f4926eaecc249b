//! Store port for persisting and hydrating the users graph.

use crate::tracker::domain::{IdAllocator, IdentitySet, TrackerDomainError, User};
use camino::Utf8PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence contract for the users graph.
pub trait UserStore {
    /// Replaces the stored document with `users` and everything they own.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] when the target cannot be created or
    /// written, or [`StoreError::Encode`] when serialization fails.
    fn save(&self, users: &IdentitySet<User>) -> StoreResult<()>;

    /// Reads the stored document back into entities.
    ///
    /// Every loaded identifier is validated with `ids`. A missing document
    /// or one that is not valid JSON yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Domain`] when a record fails validation, for
    /// example a task with an unknown `_type`, [`StoreError::Decode`] when
    /// well-formed JSON holds values of the wrong shape, or
    /// [`StoreError::Io`] when an existing document cannot be read.
    fn load(&self, ids: &mut IdAllocator) -> StoreResult<IdentitySet<User>>;
}

/// Errors returned by store implementations.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Filesystem access failed.
    #[error("I/O failure on {path}: {source}")]
    Io {
        /// Path being accessed.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// The users graph could not be serialized.
    #[error("failed to encode users document: {0}")]
    Encode(Arc<serde_json::Error>),

    /// The stored document is well-formed JSON with values of the wrong
    /// shape, such as a negative or textual id.
    #[error("users document does not match the expected shape: {0}")]
    Decode(Arc<serde_json::Error>),

    /// A stored record failed domain validation.
    #[error(transparent)]
    Domain(#[from] TrackerDomainError),

    /// Persistence-layer failure outside the filesystem.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wraps an I/O error with the path it concerns.
    pub fn io(path: impl Into<Utf8PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source: Arc::new(err),
        }
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
