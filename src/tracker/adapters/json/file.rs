//! JSON file adapter for the users store.

use super::codec;
use crate::config::TrackerConfig;
use crate::tracker::{
    domain::{IdAllocator, IdentitySet, User},
    ports::{StoreError, StoreResult, UserStore},
};
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::io::ErrorKind;
use tracing::info;

/// Stores the users graph as a single JSON document on disk.
///
/// Saves replace the whole file. The document is first written to a hidden
/// sibling file and then renamed over the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    path: Utf8PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store backed by the configured data file.
    #[must_use]
    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(config.data_path())
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn split_path(&self) -> StoreResult<(&Utf8Path, &str)> {
        let file_name = self.path.file_name().ok_or_else(|| {
            StoreError::io(
                self.path.clone(),
                std::io::Error::new(ErrorKind::InvalidInput, "path must include a file name"),
            )
        })?;
        let parent = self
            .path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        Ok((parent, file_name))
    }
}

impl UserStore for JsonFileStore {
    fn save(&self, users: &IdentitySet<User>) -> StoreResult<()> {
        let document = codec::encode(users)?;
        let (parent, file_name) = self.split_path()?;

        Dir::create_ambient_dir_all(parent, ambient_authority())
            .map_err(|err| StoreError::io(parent, err))?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority())
            .map_err(|err| StoreError::io(parent, err))?;

        let staging = format!(".{file_name}.tmp");
        dir.write(&staging, document.as_bytes())
            .map_err(|err| StoreError::io(parent.join(&staging), err))?;
        dir.rename(&staging, &dir, file_name)
            .map_err(|err| StoreError::io(self.path.clone(), err))?;

        info!(path = %self.path, users = users.len(), "saved users document");
        Ok(())
    }

    fn load(&self, ids: &mut IdAllocator) -> StoreResult<IdentitySet<User>> {
        let (parent, file_name) = self.split_path()?;
        let dir = match Dir::open_ambient_dir(parent, ambient_authority()) {
            Ok(dir) => dir,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %self.path, "no users document, starting empty");
                return Ok(IdentitySet::new());
            }
            Err(err) => return Err(StoreError::io(parent, err)),
        };
        let document = match dir.read_to_string(file_name) {
            Ok(document) => document,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(path = %self.path, "no users document, starting empty");
                return Ok(IdentitySet::new());
            }
            Err(err) => return Err(StoreError::io(self.path.clone(), err)),
        };

        let users = codec::decode(&document, ids)?;
        info!(path = %self.path, users = users.len(), "loaded users document");
        Ok(users)
    }
}
