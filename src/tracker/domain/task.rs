//! Task entity, its variants and the priority/status enums.

use super::{IdAllocator, Identity, TaskId, TaskRecord, TrackerDomainError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Task urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Can wait.
    Low,
    /// Default urgency.
    Medium,
    /// Should be picked up soon.
    High,
    /// Blocks other work.
    Critical,
}

impl Priority {
    /// All priorities in ascending order of urgency.
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    /// Returns the display name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    /// Returns the numeric code used for persistence and sorting.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Critical => 4,
        }
    }

    /// Maps a numeric code back to a priority.
    ///
    /// Codes outside `1..=4` resolve to [`Priority::Medium`].
    #[must_use]
    pub const fn from_code(code: u64) -> Self {
        match code {
            1 => Self::Low,
            3 => Self::High,
            4 => Self::Critical,
            _ => Self::Medium,
        }
    }

    /// Maps a persisted priority value back to a priority.
    ///
    /// Anything that is not a non-negative integer, including a missing
    /// value, resolves to [`Priority::Medium`].
    #[must_use]
    pub fn from_code_value(value: Option<&Value>) -> Self {
        value
            .and_then(Value::as_u64)
            .map_or(Self::Medium, Self::from_code)
    }
}

impl TryFrom<&str> for Priority {
    type Error = TrackerDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match normalize(value).as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            "CRITICAL" => Ok(Self::Critical),
            _ => Err(TrackerDomainError::InvalidPriority(value.to_owned())),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Work has not begun.
    #[default]
    NotStarted,
    /// Work is under way.
    InProgress,
    /// Work is finished.
    Completed,
}

impl TaskStatus {
    /// Returns the display value written to storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = TrackerDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match normalize(value).as_str() {
            "NOT_STARTED" => Ok(Self::NotStarted),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(TrackerDomainError::InvalidStatus(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Upper-cases `value` and folds spaces and hyphens into underscores.
fn normalize(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            other => other.to_ascii_uppercase(),
        })
        .collect()
}

/// Variant-specific payload of a task.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Development work in a programming language.
    Dev {
        /// Programming language.
        language: String,
    },
    /// Quality assurance work.
    Qa {
        /// Kind of testing, for example `"regression"`.
        test_type: String,
    },
    /// Documentation work.
    Doc {
        /// Kind of document, for example `"README"`.
        document: String,
    },
}

impl TaskKind {
    /// Discriminator tag of development tasks.
    pub const DEV_TAG: &'static str = "DevTask";
    /// Discriminator tag of QA tasks.
    pub const QA_TAG: &'static str = "QATask";
    /// Discriminator tag of documentation tasks.
    pub const DOC_TAG: &'static str = "DocTask";

    /// Builds the variant named by `tag` around `detail`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::UnknownTaskType`] when `tag` is not one
    /// of `DevTask`, `QATask` or `DocTask`.
    pub fn from_tag(tag: &str, detail: impl Into<String>) -> Result<Self, TrackerDomainError> {
        let detail = detail.into();
        match tag {
            Self::DEV_TAG => Ok(Self::Dev { language: detail }),
            Self::QA_TAG => Ok(Self::Qa { test_type: detail }),
            Self::DOC_TAG => Ok(Self::Doc { document: detail }),
            _ => Err(TrackerDomainError::UnknownTaskType(Some(tag.to_owned()))),
        }
    }

    /// Returns the discriminator tag.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Dev { .. } => Self::DEV_TAG,
            Self::Qa { .. } => Self::QA_TAG,
            Self::Doc { .. } => Self::DOC_TAG,
        }
    }

    /// Returns the name of the variant-specific field.
    #[must_use]
    pub const fn detail_field(&self) -> &'static str {
        match self {
            Self::Dev { .. } => "language",
            Self::Qa { .. } => "test_type",
            Self::Doc { .. } => "document",
        }
    }

    /// Returns the variant-specific value.
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::Dev { language } => language,
            Self::Qa { test_type } => test_type,
            Self::Doc { document } => document,
        }
    }

    fn set_detail(&mut self, value: String) {
        match self {
            Self::Dev { language } => *language = value,
            Self::Qa { test_type } => *test_type = value,
            Self::Doc { document } => *document = value,
        }
    }
}

/// Parameter object for constructing a [`Task`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    id: Option<TaskId>,
    name: String,
    description: String,
    priority: Priority,
    status: TaskStatus,
    kind: TaskKind,
}

impl NewTask {
    /// Creates a parameter object with the default status.
    #[must_use]
    pub fn new(
        kind: TaskKind,
        name: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            priority,
            status: TaskStatus::default(),
            kind,
        }
    }

    /// Factory keyed on the variant tag, parsing the priority from text.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::UnknownTaskType`] for an unsupported
    /// tag or [`TrackerDomainError::InvalidPriority`] for an unknown
    /// priority name.
    pub fn from_tag(
        tag: &str,
        name: impl Into<String>,
        description: impl Into<String>,
        priority: &str,
        detail: impl Into<String>,
    ) -> Result<Self, TrackerDomainError> {
        let kind = TaskKind::from_tag(tag, detail)?;
        let parsed_priority = Priority::try_from(priority)?;
        Ok(Self::new(kind, name, description, parsed_priority))
    }

    /// Uses an explicit identifier instead of allocating one.
    #[must_use]
    pub const fn with_id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}

/// Partial replacement of task fields.
///
/// Every supplied value is applied, including empty strings; only absent
/// values leave a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskUpdate {
    name: Option<String>,
    description: Option<String>,
    priority: Option<Priority>,
    detail: Option<String>,
}

impl TaskUpdate {
    /// Creates an update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the variant-specific field (language, test type or document).
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// A unit of work owned by exactly one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    name: String,
    description: String,
    priority: Priority,
    status: TaskStatus,
    kind: TaskKind,
}

impl Task {
    /// Creates a task, allocating an identifier when none was supplied.
    ///
    /// An explicit identifier is validated against `ids` so it is never
    /// issued again.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::IdSpaceExhausted`] when no task
    /// identifier is left to allocate.
    pub fn new(new_task: NewTask, ids: &mut IdAllocator) -> Result<Self, TrackerDomainError> {
        Ok(Self {
            id: ids.resolve_task(new_task.id)?,
            name: new_task.name,
            description: new_task.description,
            priority: new_task.priority,
            status: new_task.status,
            kind: new_task.kind,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the variant payload.
    #[must_use]
    pub const fn kind(&self) -> &TaskKind {
        &self.kind
    }

    /// Applies a partial update.
    pub fn update(&mut self, update: TaskUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(detail) = update.detail {
            self.kind.set_detail(detail);
        }
    }

    /// Parses and applies a new status.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::InvalidStatus`] when `status` names no
    /// known status; the task is left unchanged.
    pub fn change_status(&mut self, status: &str) -> Result<(), TrackerDomainError> {
        self.status = TaskStatus::try_from(status)?;
        Ok(())
    }

    /// Applies an already validated status.
    pub const fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Projects the task into its persisted dictionary form.
    #[must_use]
    pub fn to_dict(&self) -> TaskRecord {
        let mut record = TaskRecord {
            id: Some(self.id.value()),
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            status: Some(self.status.as_str().to_owned()),
            kind: Some(self.kind.tag().to_owned()),
            priority: Some(Value::from(self.priority.code())),
            language: None,
            test_type: None,
            document: None,
        };
        let detail = Some(self.kind.detail().to_owned());
        match self.kind {
            TaskKind::Dev { .. } => record.language = detail,
            TaskKind::Qa { .. } => record.test_type = detail,
            TaskKind::Doc { .. } => record.document = detail,
        }
        record
    }
}

impl Identity for Task {
    fn same_identity(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} - {} ({}, {}, {}: {})",
            self.kind.tag(),
            self.name,
            self.description,
            self.priority,
            self.status,
            self.kind.detail_field(),
            self.kind.detail()
        )
    }
}
