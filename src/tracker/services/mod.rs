//! Application services for tracker orchestration.

mod tracker;

pub use tracker::{
    CreateProjectRequest, CreateTaskRequest, CreateUserRequest, TaskGroups, TrackerError,
    TrackerResult, TrackerService,
};
