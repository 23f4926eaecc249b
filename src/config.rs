//! Runtime configuration for the tracker.

use camino::{Utf8Path, Utf8PathBuf};
use std::env;

/// Environment variable overriding the data file location.
pub const DATA_PATH_ENV: &str = "TASKBOARD_DATA_PATH";

/// Default location of the users document, relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/users.json";

/// Tracker configuration.
///
/// # Examples
///
/// ```
/// use taskboard::config::TrackerConfig;
///
/// let config = TrackerConfig::default();
/// assert_eq!(config.data_path().as_str(), "data/users.json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    data_path: Utf8PathBuf,
}

impl TrackerConfig {
    /// Creates a configuration pointing at `data_path`.
    #[must_use]
    pub fn new(data_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
        }
    }

    /// Reads the configuration from the process environment.
    ///
    /// Falls back to [`DEFAULT_DATA_PATH`] when [`DATA_PATH_ENV`] is unset,
    /// empty, or not valid Unicode.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        lookup(DATA_PATH_ENV)
            .filter(|value| !value.trim().is_empty())
            .map_or_else(Self::default, Self::new)
    }

    /// Returns the path of the users document.
    #[must_use]
    pub fn data_path(&self) -> &Utf8Path {
        &self.data_path
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_PATH)
    }
}
