//! Registry context holding the top-level entity sets and the allocator.

use super::{IdAllocator, IdentitySet, Project, User, UserId};

/// Owns every top-level collection for one session.
///
/// The users set is the root of the persisted graph. The standalone
/// projects set is a secondary registry that is never persisted.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    users: IdentitySet<User>,
    projects: IdentitySet<Project>,
    ids: IdAllocator,
}

impl Registry {
    /// Creates an empty registry with fresh counters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            users: IdentitySet::new(),
            projects: IdentitySet::new(),
            ids: IdAllocator::new(),
        }
    }

    /// Returns the identifier allocator.
    #[must_use]
    pub const fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    /// Returns the identifier allocator for allocation or validation.
    pub const fn ids_mut(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }

    /// Returns the users set.
    #[must_use]
    pub const fn users(&self) -> &IdentitySet<User> {
        &self.users
    }

    /// Adds a user; returns `false` when a colliding user is present.
    pub fn add_user(&mut self, user: User) -> bool {
        self.users.insert(user)
    }

    /// Discards a user. Discarding an absent user is a no-op.
    pub fn remove_user(&mut self, user: &User) -> Option<User> {
        self.users.remove(user)
    }

    /// Discards the user with `id`, if present.
    pub fn remove_user_by_id(&mut self, id: UserId) -> Option<User> {
        self.users.remove_where(|user| user.id() == id)
    }

    /// Looks up a user by id.
    #[must_use]
    pub fn find_user(&self, id: UserId) -> Option<&User> {
        self.users.find(|user| user.id() == id)
    }

    /// Looks up a user by id for mutation.
    pub fn find_user_mut(&mut self, id: UserId) -> Option<&mut User> {
        self.users.find_mut(|user| user.id() == id)
    }

    /// Replaces the users set, returning the previous one.
    pub fn replace_users(&mut self, users: IdentitySet<User>) -> IdentitySet<User> {
        std::mem::replace(&mut self.users, users)
    }

    /// Returns the standalone projects set.
    #[must_use]
    pub const fn projects(&self) -> &IdentitySet<Project> {
        &self.projects
    }

    /// Adds a standalone project; returns `false` on a collision.
    pub fn add_project(&mut self, project: Project) -> bool {
        self.projects.insert(project)
    }

    /// Discards a standalone project. Discarding an absent project is a no-op.
    pub fn remove_project(&mut self, project: &Project) -> Option<Project> {
        self.projects.remove(project)
    }
}
