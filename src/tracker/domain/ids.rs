//! Integer identifiers and the per-kind identifier allocator.

use super::TrackerDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity kinds that draw identifiers from the allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    /// Identifiers for [`super::User`] records.
    User,
    /// Identifiers for [`super::Project`] records.
    Project,
    /// Identifiers for [`super::Task`] records.
    Task,
}

impl IdKind {
    /// Returns the lower-case entity name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Project => "project",
            Self::Task => "task",
        }
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issues monotonically increasing identifiers per entity kind.
///
/// Each counter holds the last identifier issued or validated for its kind,
/// so every identifier returned by [`IdAllocator::next`] is strictly greater
/// than anything seen before.
///
/// # Examples
///
/// ```
/// use taskboard::tracker::domain::{IdAllocator, IdKind};
///
/// let mut ids = IdAllocator::new();
/// ids.validate(IdKind::Task, 41);
/// assert_eq!(ids.next(IdKind::Task), Ok(42));
/// assert_eq!(ids.next(IdKind::User), Ok(1));
///
/// ids.validate(IdKind::Project, u64::MAX);
/// assert!(ids.next(IdKind::Project).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdAllocator {
    last_user: u64,
    last_project: u64,
    last_task: u64,
}

impl IdAllocator {
    /// Creates an allocator with every counter at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_user: 0,
            last_project: 0,
            last_task: 0,
        }
    }

    /// Increments and returns the counter for `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::IdSpaceExhausted`] once the counter has
    /// reached `u64::MAX`; the counter is left unchanged.
    pub fn next(&mut self, kind: IdKind) -> Result<u64, TrackerDomainError> {
        let counter = self.counter_mut(kind);
        let issued = counter
            .checked_add(1)
            .ok_or(TrackerDomainError::IdSpaceExhausted(kind))?;
        *counter = issued;
        Ok(issued)
    }

    /// Raises the counter for `kind` to `candidate` when it is larger.
    ///
    /// Counters are never lowered.
    pub fn validate(&mut self, kind: IdKind, candidate: u64) {
        let counter = self.counter_mut(kind);
        if candidate > *counter {
            *counter = candidate;
        }
    }

    /// Returns the last identifier issued or validated for `kind`.
    #[must_use]
    pub const fn last(&self, kind: IdKind) -> u64 {
        match kind {
            IdKind::User => self.last_user,
            IdKind::Project => self.last_project,
            IdKind::Task => self.last_task,
        }
    }

    /// Returns `id` after validating it, or a freshly issued user identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::IdSpaceExhausted`] when a fresh
    /// identifier is needed and none is left.
    pub fn resolve_user(&mut self, id: Option<UserId>) -> Result<UserId, TrackerDomainError> {
        self.resolve(IdKind::User, id.map(UserId::value)).map(UserId::new)
    }

    /// Returns `id` after validating it, or a freshly issued project identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::IdSpaceExhausted`] when a fresh
    /// identifier is needed and none is left.
    pub fn resolve_project(&mut self, id: Option<ProjectId>) -> Result<ProjectId, TrackerDomainError> {
        self.resolve(IdKind::Project, id.map(ProjectId::value)).map(ProjectId::new)
    }

    /// Returns `id` after validating it, or a freshly issued task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::IdSpaceExhausted`] when a fresh
    /// identifier is needed and none is left.
    pub fn resolve_task(&mut self, id: Option<TaskId>) -> Result<TaskId, TrackerDomainError> {
        self.resolve(IdKind::Task, id.map(TaskId::value)).map(TaskId::new)
    }

    fn resolve(&mut self, kind: IdKind, id: Option<u64>) -> Result<u64, TrackerDomainError> {
        match id {
            Some(value) => {
                self.validate(kind, value);
                Ok(value)
            }
            None => self.next(kind),
        }
    }

    const fn counter_mut(&mut self, kind: IdKind) -> &mut u64 {
        match kind {
            IdKind::User => &mut self.last_user,
            IdKind::Project => &mut self.last_project,
            IdKind::Task => &mut self.last_task,
        }
    }
}

/// Identifier of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wraps a raw identifier value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(u64);

impl ProjectId {
    /// Wraps a raw identifier value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a task, unique within its owning project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Wraps a raw identifier value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
