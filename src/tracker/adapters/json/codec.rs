//! JSON encoding of the users graph and default-filling hydration.
//!
//! All best-effort defaulting for partially specified documents happens
//! here, at the deserialization boundary, rather than in the entity
//! constructors.

use crate::tracker::{
    domain::{
        IdAllocator, IdentitySet, NewTask, NewUser, PersistedProjectData, Priority, Project,
        ProjectId, ProjectRecord, Task, TaskId, TaskKind, TaskRecord, TaskStatus,
        TrackerDomainError, User, UserId, UserRecord, parse_deadline,
    },
    ports::{StoreError, StoreResult},
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Name given to stored projects that have none.
pub const UNTITLED_PROJECT: &str = "Untitled Project";

/// Name given to stored tasks that have none.
pub const UNTITLED_TASK: &str = "Untitled Task";

/// Serializes `users` as a pretty-printed JSON array of user objects.
///
/// # Errors
///
/// Returns [`StoreError::Encode`] when serialization fails.
pub fn encode(users: &IdentitySet<User>) -> StoreResult<String> {
    let records: Vec<UserRecord> = users.iter().map(User::to_dict).collect();
    serde_json::to_string_pretty(&records).map_err(|err| StoreError::Encode(Arc::new(err)))
}

/// Parses a users document and rebuilds the entity graph.
///
/// A document that is not syntactically valid JSON is logged and treated as
/// empty. Well-formed JSON whose values do not fit the record shapes is an
/// error, so one bad field never discards the rest of the document.
///
/// # Errors
///
/// Returns [`StoreError::Decode`] when well-formed JSON does not match the
/// document shape, or [`StoreError::Domain`] when a record fails validation,
/// such as a task with an absent or unknown `_type`.
pub fn decode(document: &str, ids: &mut IdAllocator) -> StoreResult<IdentitySet<User>> {
    let records: Vec<UserRecord> = match serde_json::from_str(document) {
        Ok(records) => records,
        Err(err) if err.is_data() => return Err(StoreError::Decode(Arc::new(err))),
        Err(err) => {
            warn!(error = %err, "users document is malformed, starting with no users");
            return Ok(IdentitySet::new());
        }
    };
    debug!(users = records.len(), "decoded users document");
    Ok(hydrate_users(records, ids)?)
}

/// Rebuilds users from their records, validating every id with `ids`.
///
/// # Errors
///
/// Returns [`TrackerDomainError`] when any nested record is invalid.
pub fn hydrate_users(
    records: Vec<UserRecord>,
    ids: &mut IdAllocator,
) -> Result<IdentitySet<User>, TrackerDomainError> {
    records
        .into_iter()
        .map(|record| hydrate_user(record, ids))
        .collect()
}

fn hydrate_user(record: UserRecord, ids: &mut IdAllocator) -> Result<User, TrackerDomainError> {
    let mut new_user = NewUser::new(
        record.name.unwrap_or_default(),
        record.surname.unwrap_or_default(),
        record.email.unwrap_or_default(),
    );
    if let Some(id) = record.id {
        new_user = new_user.with_id(UserId::new(id));
    }
    let mut user = User::new(new_user, ids)?;
    for project in record.projects {
        user.add_project(hydrate_project(project, ids)?);
    }
    Ok(user)
}

fn hydrate_project(
    record: ProjectRecord,
    ids: &mut IdAllocator,
) -> Result<Project, TrackerDomainError> {
    let id = ids.resolve_project(record.id.map(ProjectId::new))?;
    let deadline = record
        .deadline
        .filter(|text| !text.trim().is_empty())
        .map(|text| parse_deadline(&text))
        .transpose()?;
    let tasks = record
        .tasks
        .into_iter()
        .map(|task| hydrate_task(task, ids))
        .collect::<Result<IdentitySet<Task>, _>>()?;

    Ok(Project::from_persisted(PersistedProjectData {
        id,
        name: record.name.unwrap_or_else(|| UNTITLED_PROJECT.to_owned()),
        description: record.description.unwrap_or_default(),
        deadline,
        tasks,
    }))
}

fn hydrate_task(record: TaskRecord, ids: &mut IdAllocator) -> Result<Task, TrackerDomainError> {
    let tag = record
        .kind
        .ok_or(TrackerDomainError::UnknownTaskType(None))?;
    let detail = match tag.as_str() {
        TaskKind::DEV_TAG => record.language,
        TaskKind::QA_TAG => record.test_type,
        TaskKind::DOC_TAG => record.document,
        _ => None,
    };
    let kind = TaskKind::from_tag(&tag, detail.unwrap_or_default())?;
    let status = record
        .status
        .as_deref()
        .map(TaskStatus::try_from)
        .transpose()?
        .unwrap_or_default();

    let mut new_task = NewTask::new(
        kind,
        record.name.unwrap_or_else(|| UNTITLED_TASK.to_owned()),
        record.description.unwrap_or_default(),
        Priority::from_code_value(record.priority.as_ref()),
    )
    .with_status(status);
    if let Some(id) = record.id {
        new_task = new_task.with_id(TaskId::new(id));
    }
    Task::new(new_task, ids)
}
