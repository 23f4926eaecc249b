//! User entity, the root of the persisted ownership graph.

use super::{
    IdAllocator, Identity, IdentitySet, Project, ProjectId, TrackerDomainError, UserId, UserRecord,
};
use std::fmt;

/// Parameter object for constructing a [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    id: Option<UserId>,
    name: String,
    surname: String,
    email: String,
}

impl NewUser {
    /// Creates a parameter object with no explicit id.
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

    /// Uses an explicit identifier instead of allocating one.
    #[must_use]
    pub const fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }
}

/// Partial replacement of user fields.
///
/// Empty strings count as not provided.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    name: Option<String>,
    surname: Option<String>,
    email: Option<String>,
}

impl UserUpdate {
    /// Creates an update that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the given name when non-empty.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Replaces the family name when non-empty.
    #[must_use]
    pub fn with_surname(mut self, surname: impl Into<String>) -> Self {
        self.surname = Some(surname.into());
        self
    }

    /// Replaces the email address when non-empty.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// A person owning a set of projects.
///
/// Two users collide in a set when their ids match **or** when both email
/// and name match.
#[derive(Debug, Clone)]
pub struct User {
    id: UserId,
    name: String,
    surname: String,
    email: String,
    projects: IdentitySet<Project>,
}

impl User {
    /// Creates a user with no projects.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::IdSpaceExhausted`] when no user
    /// identifier is left to allocate.
    pub fn new(new_user: NewUser, ids: &mut IdAllocator) -> Result<Self, TrackerDomainError> {
        Ok(Self {
            id: ids.resolve_user(new_user.id)?,
            name: new_user.name,
            surname: new_user.surname,
            email: new_user.email,
            projects: IdentitySet::new(),
        })
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the given name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the family name.
    #[must_use]
    pub fn surname(&self) -> &str {
        &self.surname
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the owned projects.
    #[must_use]
    pub const fn projects(&self) -> &IdentitySet<Project> {
        &self.projects
    }

    /// Adds a project; returns `false` when an equal project is present.
    pub fn add_project(&mut self, project: Project) -> bool {
        self.projects.insert(project)
    }

    /// Discards a project. Discarding an absent project is a no-op.
    pub fn remove_project(&mut self, project: &Project) -> Option<Project> {
        self.projects.remove(project)
    }

    /// Discards the project with `id`, if present.
    pub fn remove_project_by_id(&mut self, id: ProjectId) -> Option<Project> {
        self.projects.remove_where(|project| project.id() == id)
    }

    /// Looks up a project by id.
    #[must_use]
    pub fn find_project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.find(|project| project.id() == id)
    }

    /// Looks up a project by id for mutation.
    pub fn find_project_mut(&mut self, id: ProjectId) -> Option<&mut Project> {
        self.projects.find_mut(|project| project.id() == id)
    }

    /// Applies a partial update, skipping empty values.
    pub fn update_user(&mut self, update: UserUpdate) {
        if let Some(name) = update.name.filter(|value| !value.is_empty()) {
            self.name = name;
        }
        if let Some(surname) = update.surname.filter(|value| !value.is_empty()) {
            self.surname = surname;
        }
        if let Some(email) = update.email.filter(|value| !value.is_empty()) {
            self.email = email;
        }
    }

    /// Projects the user and everything it owns into dictionary form.
    #[must_use]
    pub fn to_dict(&self) -> UserRecord {
        UserRecord {
            id: Some(self.id.value()),
            name: Some(self.name.clone()),
            surname: Some(self.surname.clone()),
            email: Some(self.email.clone()),
            projects: self.projects.iter().map(Project::to_dict).collect(),
        }
    }
}

impl Identity for User {
    fn same_identity(&self, other: &Self) -> bool {
        self.id == other.id || (self.email == other.email && self.name == other.name)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} <{}>", self.name, self.surname, self.email)
    }
}
