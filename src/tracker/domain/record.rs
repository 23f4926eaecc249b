//! Dictionary projections of tracker entities.
//!
//! Records mirror the persisted JSON layout field for field. Every field is
//! optional so partially specified documents still deserialize; defaults are
//! filled in when records are turned back into entities.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Projection of a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Task identifier.
    pub id: Option<u64>,
    /// Task name.
    pub name: Option<String>,
    /// Task description.
    pub description: Option<String>,
    /// Status display value, for example `"Not Started"`.
    pub status: Option<String>,
    /// Variant discriminator: `DevTask`, `QATask` or `DocTask`.
    #[serde(rename = "_type")]
    pub kind: Option<String>,
    /// Numeric priority code, 1 (Low) through 4 (Critical).
    ///
    /// Kept as a raw JSON value so an unexpected type degrades to the
    /// default priority instead of rejecting the document.
    pub priority: Option<Value>,
    /// Programming language of a `DevTask`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Test type of a `QATask`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_type: Option<String>,
    /// Document type of a `DocTask`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
}

/// Projection of a project and its tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Project identifier.
    pub id: Option<u64>,
    /// Project name.
    pub name: Option<String>,
    /// Project description.
    pub description: Option<String>,
    /// Task projections.
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
    /// Deadline as `YYYY-MM-DD`, or `null` when unset.
    pub deadline: Option<String>,
}

/// Projection of a user and the full graph beneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// User identifier.
    pub id: Option<u64>,
    /// Given name.
    pub name: Option<String>,
    /// Family name.
    pub surname: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Project projections.
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
}
