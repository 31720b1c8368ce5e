//! Persistent collections with structural sharing.
//!
//! Thin wrappers around the `im` crate's persistent data structures,
//! providing Loottable-specific semantics.

use std::fmt;
use std::hash::Hash;
use std::iter::FromIterator;

/// Persistent, insertion-ordered set.
///
/// Iteration yields values in the order they were first inserted. Inserting
/// a value that is already present returns an unchanged set, so repeated
/// inserts are idempotent. Cloning is O(1).
#[derive(Clone)]
pub struct InsertionSet<T>
where
    T: Clone + Eq + Hash,
{
    order: im::Vector<T>,
    members: im::HashSet<T>,
}

impl<T: Clone + Eq + Hash> InsertionSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            order: im::Vector::new(),
            members: im::HashSet::new(),
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns true if the set contains the value.
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.members.contains(value)
    }

    /// Returns a new set with the value appended if it was absent.
    #[must_use]
    pub fn insert(&self, value: T) -> Self {
        if self.contains(&value) {
            return self.clone();
        }
        let mut order = self.order.clone();
        let mut members = self.members.clone();
        members.insert(value.clone());
        order.push_back(value);
        Self { order, members }
    }

    /// Returns the first inserted element.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.order.front()
    }

    /// Returns an iterator over the elements in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter()
    }
}

impl<T: Clone + Eq + Hash> Default for InsertionSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash + fmt::Debug> fmt::Debug for InsertionSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone + Eq + Hash> PartialEq for InsertionSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl<T: Clone + Eq + Hash> Eq for InsertionSet<T> {}

impl<T: Clone + Eq + Hash> FromIterator<T> for InsertionSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |set, value| set.insert(value))
    }
}

impl<'a, T: Clone + Eq + Hash> IntoIterator for &'a InsertionSet<T> {
    type Item = &'a T;
    type IntoIter = im::vector::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}
