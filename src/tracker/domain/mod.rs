//! Domain model for users, projects and typed tasks.
//!
//! Entities carry their own validation and dictionary projections. The
//! set-identity rules that decide when two entities collide live in
//! [`Identity`] implementations next to each entity.

mod error;
mod ids;
mod project;
mod record;
mod registry;
mod set;
mod task;
mod user;

pub use error::TrackerDomainError;
pub use ids::{IdAllocator, IdKind, ProjectId, TaskId, UserId};
pub use project::{
    DEADLINE_FORMAT, DEFAULT_DEADLINE_DAYS, DeadlineInput, NewProject, PersistedProjectData,
    Project, ProjectUpdate, parse_deadline,
};
pub use record::{ProjectRecord, TaskRecord, UserRecord};
pub use registry::Registry;
pub use set::{Identity, IdentitySet};
pub use task::{NewTask, Priority, Task, TaskKind, TaskStatus, TaskUpdate};
pub use user::{NewUser, User, UserUpdate};
