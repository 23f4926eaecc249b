//! Project entity and deadline handling.

use super::{
    IdAllocator, Identity, IdentitySet, ProjectId, ProjectRecord, Task, TaskId,
    TrackerDomainError,
};
use chrono::{DateTime, Days, NaiveDate, NaiveDateTime};
use mockable::Clock;
use std::fmt;

/// Days between project creation and its default deadline.
pub const DEFAULT_DEADLINE_DAYS: u64 = 30;

/// Storage format of deadlines.
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d";

/// A deadline supplied either as a date or as ISO-formatted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeadlineInput {
    /// An already parsed date.
    Date(NaiveDate),
    /// ISO-formatted text, parsed when applied.
    Text(String),
}

impl DeadlineInput {
    /// Resolves the input to a date.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::InvalidDeadline`] when text input is
    /// not an ISO date or date-time.
    pub fn resolve(self) -> Result<NaiveDate, TrackerDomainError> {
        match self {
            Self::Date(date) => Ok(date),
            Self::Text(text) => parse_deadline(&text),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl From<NaiveDate> for DeadlineInput {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<&str> for DeadlineInput {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for DeadlineInput {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Parses an ISO date (`YYYY-MM-DD`) or ISO date-time, keeping the date.
///
/// # Errors
///
/// Returns [`TrackerDomainError::InvalidDeadline`] when no supported form
/// matches.
///
/// # Examples
///
/// ```
/// use taskboard::tracker::domain::parse_deadline;
///
/// let date = parse_deadline("2025-03-01T09:30:00").expect("ISO date-time");
/// assert_eq!(date.to_string(), "2025-03-01");
/// assert!(parse_deadline("next friday").is_err());
/// ```
pub fn parse_deadline(value: &str) -> Result<NaiveDate, TrackerDomainError> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DEADLINE_FORMAT) {
        return Ok(date);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(timestamp.date());
        }
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|_| TrackerDomainError::InvalidDeadline(value.to_owned()))
}

/// Parameter object for constructing a [`Project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    id: Option<ProjectId>,
    name: String,
    description: String,
    deadline: Option<DeadlineInput>,
}

impl NewProject {
    /// Creates a parameter object with no explicit id or deadline.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            deadline: None,
        }
    }

    /// Uses an explicit identifier instead of allocating one.
    #[must_use]
    pub const fn with_id(mut self, id: ProjectId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the deadline. Blank text counts as no deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: impl Into<DeadlineInput>) -> Self {
        self.deadline = Some(deadline.into()).filter(|input| !input.is_blank());
        self
    }
}

/// Parameter object for reconstructing a persisted project.
#[derive(Debug, Clone)]
pub struct PersistedProjectData {
    /// Resolved project identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Project description.
    pub description: String,
    /// Stored deadline; `None` stays unset.
    pub deadline: Option<NaiveDate>,
    /// Reconstructed tasks.
    pub tasks: IdentitySet<Task>,
}

/// Partial replacement of project fields.
///
/// Empty strings count as not provided.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectUpdate {
    name: Option<String>,
    description: Option<String>,
    deadline: Option<DeadlineInput>,
}

impl ProjectUpdate {
    /// Creates an update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the name when non-empty.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the description when non-empty.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the deadline when not blank.
    #[must_use]
    pub fn with_deadline(mut self, deadline: impl Into<DeadlineInput>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }
}

/// A project owned by one user, holding its tasks.
///
/// Inside a set, projects are identified by `(name, description)`; the id
/// does not take part.
#[derive(Debug, Clone)]
pub struct Project {
    id: ProjectId,
    name: String,
    description: String,
    deadline: Option<NaiveDate>,
    tasks: IdentitySet<Task>,
}

impl Project {
    /// Creates a project with no tasks.
    ///
    /// Without a deadline the project is due [`DEFAULT_DEADLINE_DAYS`] after
    /// the clock's current UTC date.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::InvalidDeadline`] when a text deadline
    /// cannot be parsed, or [`TrackerDomainError::IdSpaceExhausted`] when no
    /// project identifier is left to allocate.
    pub fn new(
        new_project: NewProject,
        ids: &mut IdAllocator,
        clock: &impl Clock,
    ) -> Result<Self, TrackerDomainError> {
        let deadline = match new_project.deadline {
            Some(input) => input.resolve()?,
            None => default_deadline(clock),
        };
        Ok(Self {
            id: ids.resolve_project(new_project.id)?,
            name: new_project.name,
            description: new_project.description,
            deadline: Some(deadline),
            tasks: IdentitySet::new(),
        })
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            deadline: data.deadline,
            tasks: data.tasks,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the project description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the deadline, if set.
    #[must_use]
    pub const fn deadline(&self) -> Option<NaiveDate> {
        self.deadline
    }

    /// Returns the owned tasks.
    #[must_use]
    pub const fn tasks(&self) -> &IdentitySet<Task> {
        &self.tasks
    }

    /// Adds a task; returns `false` when a task with the same id is present.
    pub fn add_task(&mut self, task: Task) -> bool {
        self.tasks.insert(task)
    }

    /// Discards a task. Discarding an absent task is a no-op.
    pub fn remove_task(&mut self, task: &Task) -> Option<Task> {
        self.tasks.remove(task)
    }

    /// Discards the task with `id`, if present.
    pub fn remove_task_by_id(&mut self, id: TaskId) -> Option<Task> {
        self.tasks.remove_where(|task| task.id() == id)
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn find_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.find(|task| task.id() == id)
    }

    /// Looks up a task by id for mutation.
    pub fn find_task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.find_mut(|task| task.id() == id)
    }

    /// Applies a partial update, skipping empty values.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::InvalidDeadline`] when a text deadline
    /// cannot be parsed; no field is changed in that case.
    pub fn update_project(&mut self, update: ProjectUpdate) -> Result<(), TrackerDomainError> {
        let deadline = update
            .deadline
            .filter(|input| !input.is_blank())
            .map(DeadlineInput::resolve)
            .transpose()?;
        if let Some(name) = update.name.filter(|name| !name.is_empty()) {
            self.name = name;
        }
        if let Some(description) = update.description.filter(|text| !text.is_empty()) {
            self.description = description;
        }
        if deadline.is_some() {
            self.deadline = deadline;
        }
        Ok(())
    }

    /// Sets the deadline from a date or an ISO-formatted string.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::InvalidDeadline`] when text input is
    /// not an ISO date or date-time.
    pub fn set_deadline(
        &mut self,
        deadline: impl Into<DeadlineInput>,
    ) -> Result<(), TrackerDomainError> {
        self.deadline = Some(deadline.into().resolve()?);
        Ok(())
    }

    /// Returns a one-line summary including deadline and task count.
    #[must_use]
    pub fn describe(&self) -> String {
        let deadline = self
            .deadline
            .map_or_else(|| "no deadline".to_owned(), |date| date.to_string());
        format!(
            "{} - {} - {} - {} task(s)",
            self.name,
            self.description,
            deadline,
            self.tasks.len()
        )
    }

    /// Projects the project and its tasks into dictionary form.
    #[must_use]
    pub fn to_dict(&self) -> ProjectRecord {
        ProjectRecord {
            id: Some(self.id.value()),
            name: Some(self.name.clone()),
            description: Some(self.description.clone()),
            tasks: self.tasks.iter().map(Task::to_dict).collect(),
            deadline: self
                .deadline
                .map(|date| date.format(DEADLINE_FORMAT).to_string()),
        }
    }
}

fn default_deadline(clock: &impl Clock) -> NaiveDate {
    let today = clock.utc().date_naive();
    today
        .checked_add_days(Days::new(DEFAULT_DEADLINE_DAYS))
        .unwrap_or(NaiveDate::MAX)
}

impl Identity for Project {
    fn same_identity(&self, other: &Self) -> bool {
        self.name == other.name && self.description == other.description
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.description)
    }
}
