//! Insertion-ordered sets keyed by an entity-specific identity rule.
//!
//! Tracker entities are not identified by structural equality. Projects
//! collide on `(name, description)` and users on a matching id **or** a
//! matching `(email, name)` pair. The user rule is not transitive, so it
//! cannot back a `Hash`/`Eq` container; [`IdentitySet`] applies the rule by
//! scanning its members instead.

use std::slice;

/// Decides whether two entities occupy the same slot in an [`IdentitySet`].
pub trait Identity {
    /// Returns `true` when `self` and `other` collide in a set.
    fn same_identity(&self, other: &Self) -> bool;
}

/// A set whose membership is decided by [`Identity::same_identity`].
///
/// Inserting an element that collides with an existing member keeps the
/// existing member and discards the new one, mirroring ordinary set insert.
#[derive(Debug, Clone)]
pub struct IdentitySet<T> {
    items: Vec<T>,
}

impl<T> IdentitySet<T> {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Returns the number of members.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when the set has no members.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over members in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Returns the members as a slice in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Returns the first member matching `predicate`.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| predicate(item))
    }

    /// Returns the first member matching `predicate` mutably.
    ///
    /// Callers that change identity-bearing fields through this reference
    /// can leave two colliding members in the set; later inserts still
    /// compare against both.
    pub fn find_mut(&mut self, predicate: impl Fn(&T) -> bool) -> Option<&mut T> {
        self.items.iter_mut().find(|item| predicate(item))
    }

    /// Removes and returns the first member matching `predicate`.
    pub fn remove_where(&mut self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        let index = self.items.iter().position(predicate)?;
        Some(self.items.remove(index))
    }
}

impl<T: Identity> IdentitySet<T> {
    /// Inserts `item` unless a colliding member is already present.
    ///
    /// Returns `true` when the item was added.
    pub fn insert(&mut self, item: T) -> bool {
        if self.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Returns `true` when a member collides with `item`.
    #[must_use]
    pub fn contains(&self, item: &T) -> bool {
        self.items.iter().any(|member| member.same_identity(item))
    }

    /// Removes the member colliding with `item`, if any.
    ///
    /// Removing an absent item is a no-op.
    pub fn remove(&mut self, item: &T) -> Option<T> {
        self.remove_where(|member| member.same_identity(item))
    }
}

impl<T> Default for IdentitySet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identity> FromIterator<T> for IdentitySet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Identity> Extend<T> for IdentitySet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<T> IntoIterator for IdentitySet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a IdentitySet<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
