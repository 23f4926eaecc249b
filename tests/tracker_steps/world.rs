//! Shared world state for tracker persistence BDD scenarios.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use mockable::DefaultClock;
use rstest::fixture;
use taskboard::tracker::{
    adapters::json::JsonFileStore,
    domain::{ProjectId, TaskId, UserId},
    services::{TrackerError, TrackerService},
};
use tempfile::TempDir;

/// Service type used by the BDD world.
pub type TestTrackerService = TrackerService<JsonFileStore, DefaultClock>;

/// Scenario world for tracker persistence behaviour tests.
pub struct TrackerWorld {
    /// Scratch directory removed when the world is dropped.
    _scratch: TempDir,
    /// Location of the users document inside the scratch directory.
    pub data_path: Utf8PathBuf,
    /// Session that creates and saves data.
    pub service: TestTrackerService,
    /// Session started after the restart.
    pub reloaded: Option<TestTrackerService>,
    /// Outcome of loading in the restarted session.
    pub load_result: Option<Result<(), TrackerError>>,
    /// Most recently created user.
    pub user: Option<UserId>,
    /// Most recently created project.
    pub project: Option<ProjectId>,
    /// Tasks created before the restart.
    pub tasks: Vec<TaskId>,
}

impl TrackerWorld {
    /// Creates a world backed by a fresh scratch directory.
    #[must_use]
    pub fn new() -> Self {
        let scratch = tempfile::tempdir().expect("create scratch directory");
        let data_path = Utf8PathBuf::from_path_buf(scratch.path().join("data").join("users.json"))
            .expect("scratch path is UTF-8");
        Self {
            service: new_session(&data_path),
            data_path,
            _scratch: scratch,
            reloaded: None,
            load_result: None,
            user: None,
            project: None,
            tasks: Vec::new(),
        }
    }
}

impl Default for TrackerWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Starts a session with an empty registry over the file at `data_path`.
#[must_use]
pub fn new_session(data_path: &Utf8Path) -> TestTrackerService {
    TrackerService::new(
        Arc::new(JsonFileStore::new(data_path.to_path_buf())),
        Arc::new(DefaultClock),
    )
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TrackerWorld {
    TrackerWorld::default()
}
