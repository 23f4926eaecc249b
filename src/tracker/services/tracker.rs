//! Tracker service exposing user, project and task operations.

use crate::tracker::{
    domain::{
        Identity, IdentitySet, NewProject, NewTask, NewUser, Priority, Project, ProjectId,
        ProjectUpdate, Registry, Task, TaskId, TaskStatus, TaskUpdate, TrackerDomainError, User,
        UserId, UserUpdate,
    },
    ports::{StoreError, UserStore},
};
use mockable::Clock;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserRequest {
    id: Option<UserId>,
    name: String,
    surname: String,
    email: String,
}

impl CreateUserRequest {
    /// Creates a request with the required user fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        surname: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            surname: surname.into(),
            email: email.into(),
        }
    }

    /// Uses an explicit identifier.
    #[must_use]
    pub const fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Request payload for creating a project under a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    id: Option<ProjectId>,
    name: String,
    description: String,
    deadline: Option<String>,
}

impl CreateProjectRequest {
    /// Creates a request with the required project fields.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            deadline: None,
        }
    }

    /// Uses an explicit identifier.
    #[must_use]
    pub const fn with_id(mut self, id: ProjectId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets an ISO-formatted deadline. Blank text keeps the default.
    #[must_use]
    pub fn with_deadline(mut self, deadline: impl Into<String>) -> Self {
        self.deadline = Some(deadline.into());
        self
    }
}

/// Request payload for creating a task under a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    id: Option<TaskId>,
    task_type: String,
    name: String,
    description: String,
    priority: String,
    detail: String,
    status: Option<String>,
}

impl CreateTaskRequest {
    /// Creates a request from the variant tag, shared fields and the
    /// variant-specific value (language, test type or document).
    #[must_use]
    pub fn new(
        task_type: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        priority: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            task_type: task_type.into(),
            name: name.into(),
            description: description.into(),
            priority: priority.into(),
            detail: detail.into(),
            status: None,
        }
    }

    /// Uses an explicit identifier.
    #[must_use]
    pub const fn with_id(mut self, id: TaskId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the initial status by name.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    fn into_new_task(self) -> Result<NewTask, TrackerDomainError> {
        let mut new_task = NewTask::from_tag(
            &self.task_type,
            self.name,
            self.description,
            &self.priority,
            self.detail,
        )?;
        if let Some(status) = self.status {
            new_task = new_task.with_status(TaskStatus::try_from(status.as_str())?);
        }
        if let Some(id) = self.id {
            new_task = new_task.with_id(id);
        }
        Ok(new_task)
    }
}

/// Service-level errors for tracker operations.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TrackerDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// No user has the requested id.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// The user owns no project with the requested id.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The project owns no task with the requested id.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
}

/// Result type for tracker service operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Matching tasks grouped under `"<user name> - <project name>"` labels.
pub type TaskGroups = BTreeMap<String, Vec<Task>>;

/// Tracker orchestration service.
///
/// Owns the session's [`Registry`]; every operation runs synchronously
/// against it.
#[derive(Debug)]
pub struct TrackerService<S, C>
where
    S: UserStore,
    C: Clock,
{
    registry: Registry,
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> TrackerService<S, C>
where
    S: UserStore,
    C: Clock,
{
    /// Creates a service with an empty registry.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            registry: Registry::new(),
            store,
            clock,
        }
    }

    /// Returns the registry context.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the registry context for direct manipulation.
    pub const fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Creates a user and adds it to the registry.
    ///
    /// Returns the id of the stored user. When the new user collides with an
    /// existing one the existing user is kept and its id is returned.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Domain`] when no user identifier is left to
    /// allocate.
    pub fn create_user(&mut self, request: CreateUserRequest) -> TrackerResult<UserId> {
        let mut new_user = NewUser::new(request.name, request.surname, request.email);
        if let Some(id) = request.id {
            new_user = new_user.with_id(id);
        }
        let user = User::new(new_user, self.registry.ids_mut())?;
        let existing = self
            .registry
            .users()
            .find(|member| member.same_identity(&user))
            .map(User::id);
        if let Some(id) = existing {
            debug!(user_id = %id, "user already registered");
            return Ok(id);
        }
        let id = user.id();
        self.registry.add_user(user);
        debug!(user_id = %id, "created user");
        Ok(id)
    }

    /// Applies a partial update to a user.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::UserNotFound`] when no user has `user_id`.
    pub fn update_user(&mut self, user_id: UserId, update: UserUpdate) -> TrackerResult<()> {
        self.user_mut(user_id)?.update_user(update);
        Ok(())
    }

    /// Removes a user and everything it owns.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::UserNotFound`] when no user has `user_id`.
    pub fn remove_user(&mut self, user_id: UserId) -> TrackerResult<User> {
        let removed = self
            .registry
            .remove_user_by_id(user_id)
            .ok_or(TrackerError::UserNotFound(user_id))?;
        debug!(user_id = %user_id, "removed user");
        Ok(removed)
    }

    /// Creates a project under a user.
    ///
    /// When the project collides with one the user already owns, the
    /// existing project is kept and its id is returned.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::UserNotFound`] for an unknown user or
    /// [`TrackerError::Domain`] for an unparseable deadline.
    pub fn create_project(
        &mut self,
        user_id: UserId,
        request: CreateProjectRequest,
    ) -> TrackerResult<ProjectId> {
        self.user(user_id)?;
        let mut new_project = NewProject::new(request.name, request.description);
        if let Some(id) = request.id {
            new_project = new_project.with_id(id);
        }
        if let Some(deadline) = request.deadline {
            new_project = new_project.with_deadline(deadline);
        }
        let project = Project::new(new_project, self.registry.ids_mut(), &*self.clock)?;

        let user = self.user_mut(user_id)?;
        let existing = user
            .projects()
            .find(|member| member.same_identity(&project))
            .map(Project::id);
        if let Some(id) = existing {
            debug!(user_id = %user_id, project_id = %id, "project already owned");
            return Ok(id);
        }
        let id = project.id();
        user.add_project(project);
        debug!(user_id = %user_id, project_id = %id, "created project");
        Ok(id)
    }

    /// Applies a partial update to a project.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown user or project, or
    /// [`TrackerError::Domain`] for an unparseable deadline.
    pub fn update_project(
        &mut self,
        user_id: UserId,
        project_id: ProjectId,
        update: ProjectUpdate,
    ) -> TrackerResult<()> {
        self.project_mut(user_id, project_id)?
            .update_project(update)?;
        Ok(())
    }

    /// Removes a project and its tasks from a user.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown user or project.
    pub fn remove_project(
        &mut self,
        user_id: UserId,
        project_id: ProjectId,
    ) -> TrackerResult<Project> {
        let removed = self
            .user_mut(user_id)?
            .remove_project_by_id(project_id)
            .ok_or(TrackerError::ProjectNotFound(project_id))?;
        debug!(user_id = %user_id, project_id = %project_id, "removed project");
        Ok(removed)
    }

    /// Creates a task inside a user's project.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown user or project, or
    /// [`TrackerError::Domain`] for an unknown task type, priority or status,
    /// or when no task identifier is left to allocate.
    pub fn create_task(
        &mut self,
        user_id: UserId,
        project_id: ProjectId,
        request: CreateTaskRequest,
    ) -> TrackerResult<TaskId> {
        self.project(user_id, project_id)?;
        let new_task = request.into_new_task()?;
        let task = Task::new(new_task, self.registry.ids_mut())?;
        let id = task.id();
        let project = self.project_mut(user_id, project_id)?;
        if !project.add_task(task) {
            debug!(project_id = %project_id, task_id = %id, "task id already present");
            return Ok(id);
        }
        debug!(project_id = %project_id, task_id = %id, "created task");
        Ok(id)
    }

    /// Applies a partial update to a task.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown user, project or task.
    pub fn update_task(
        &mut self,
        user_id: UserId,
        project_id: ProjectId,
        task_id: TaskId,
        update: TaskUpdate,
    ) -> TrackerResult<()> {
        self.task_mut(user_id, project_id, task_id)?.update(update);
        Ok(())
    }

    /// Removes a task from a project.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown user, project or task.
    pub fn remove_task(
        &mut self,
        user_id: UserId,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> TrackerResult<Task> {
        let removed = self
            .project_mut(user_id, project_id)?
            .remove_task_by_id(task_id)
            .ok_or(TrackerError::TaskNotFound(task_id))?;
        debug!(project_id = %project_id, task_id = %task_id, "removed task");
        Ok(removed)
    }

    /// Changes a task's status by name.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown user, project or task, or
    /// [`TrackerError::Domain`] when `status` names no known status.
    pub fn change_task_status(
        &mut self,
        user_id: UserId,
        project_id: ProjectId,
        task_id: TaskId,
        status: &str,
    ) -> TrackerResult<()> {
        self.task_mut(user_id, project_id, task_id)?
            .change_status(status)?;
        Ok(())
    }

    /// Returns every registered user.
    #[must_use]
    pub fn list_users(&self) -> &[User] {
        self.registry.users().as_slice()
    }

    /// Returns the projects owned by a user.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::UserNotFound`] when no user has `user_id`.
    pub fn list_projects(&self, user_id: UserId) -> TrackerResult<&[Project]> {
        Ok(self.user(user_id)?.projects().as_slice())
    }

    /// Returns the tasks of a user's project.
    ///
    /// # Errors
    ///
    /// Returns a not-found error for an unknown user or project.
    pub fn list_tasks(&self, user_id: UserId, project_id: ProjectId) -> TrackerResult<&[Task]> {
        Ok(self.project(user_id, project_id)?.tasks().as_slice())
    }

    /// Groups every task with the named status by owner and project.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Domain`] when `status` names no known status.
    pub fn filter_tasks_by_status(&self, status: &str) -> TrackerResult<TaskGroups> {
        let wanted = TaskStatus::try_from(status)?;
        Ok(self.group_tasks(|task| task.status() == wanted))
    }

    /// Groups every task with the named priority by owner and project.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Domain`] when `priority` names no known
    /// priority.
    pub fn filter_tasks_by_priority(&self, priority: &str) -> TrackerResult<TaskGroups> {
        let wanted = Priority::try_from(priority)?;
        Ok(self.group_tasks(|task| task.priority() == wanted))
    }

    /// Writes every user, project and task to the store.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] when the store rejects the write.
    pub fn save_data(&self) -> TrackerResult<()> {
        self.store.save(self.registry.users())?;
        info!(users = self.registry.users().len(), "saved tracker data");
        Ok(())
    }

    /// Replaces the registered users with the stored ones.
    ///
    /// Identifier counters are raised past every loaded id. Hydration runs
    /// against a copy of the allocator that is committed only on success.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Store`] when the stored data cannot be read
    /// or contains invalid records; users and counters are left unchanged.
    pub fn load_data(&mut self) -> TrackerResult<()> {
        let mut ids = self.registry.ids().clone();
        let users: IdentitySet<User> = self.store.load(&mut ids)?;
        info!(users = users.len(), "loaded tracker data");
        *self.registry.ids_mut() = ids;
        self.registry.replace_users(users);
        Ok(())
    }

    fn group_tasks(&self, predicate: impl Fn(&Task) -> bool) -> TaskGroups {
        let mut groups = TaskGroups::new();
        for user in self.registry.users() {
            for project in user.projects() {
                let matching: Vec<Task> = project
                    .tasks()
                    .iter()
                    .filter(|task| predicate(task))
                    .cloned()
                    .collect();
                if matching.is_empty() {
                    continue;
                }
                groups
                    .entry(format!("{} - {}", user.name(), project.name()))
                    .or_default()
                    .extend(matching);
            }
        }
        for tasks in groups.values_mut() {
            tasks.sort_by_key(|task| (task.priority().code(), task.id()));
        }
        groups
    }

    fn user(&self, user_id: UserId) -> TrackerResult<&User> {
        self.registry
            .find_user(user_id)
            .ok_or(TrackerError::UserNotFound(user_id))
    }

    fn user_mut(&mut self, user_id: UserId) -> TrackerResult<&mut User> {
        self.registry
            .find_user_mut(user_id)
            .ok_or(TrackerError::UserNotFound(user_id))
    }

    fn project(&self, user_id: UserId, project_id: ProjectId) -> TrackerResult<&Project> {
        self.user(user_id)?
            .find_project(project_id)
            .ok_or(TrackerError::ProjectNotFound(project_id))
    }

    fn project_mut(
        &mut self,
        user_id: UserId,
        project_id: ProjectId,
    ) -> TrackerResult<&mut Project> {
        self.user_mut(user_id)?
            .find_project_mut(project_id)
            .ok_or(TrackerError::ProjectNotFound(project_id))
    }

    fn task_mut(
        &mut self,
        user_id: UserId,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> TrackerResult<&mut Task> {
        self.project_mut(user_id, project_id)?
            .find_task_mut(task_id)
            .ok_or(TrackerError::TaskNotFound(task_id))
    }
}
