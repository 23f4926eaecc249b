//! Error types for tracker domain validation and parsing.

use super::IdKind;
use thiserror::Error;

/// Errors returned while constructing or mutating tracker entities.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackerDomainError {
    /// The priority value does not name a known priority.
    #[error("invalid priority '{0}', expected one of Low, Medium, High, Critical")]
    InvalidPriority(String),

    /// The status value does not name a known status.
    #[error("invalid status '{0}', expected one of Not Started, In Progress, Completed")]
    InvalidStatus(String),

    /// The deadline is not an ISO-formatted date.
    #[error("invalid deadline '{0}', expected YYYY-MM-DD")]
    InvalidDeadline(String),

    /// The task discriminator tag is absent or unsupported.
    #[error("unknown task type: {}", .0.as_deref().unwrap_or("<missing>"))]
    UnknownTaskType(Option<String>),

    /// Every identifier of the kind has already been issued or validated.
    #[error("no {0} identifiers left to issue")]
    IdSpaceExhausted(IdKind),
}
