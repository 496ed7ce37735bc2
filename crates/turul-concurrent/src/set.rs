//! Concurrent set with lock-ordered set algebra.
//!
//! Binary operations read both operands under their shared locks and build a
//! brand new set, so a result never shares storage with either input. Locks
//! are taken in ascending [`ContainerId`] order, which keeps `a.union(&b)` and
//! `b.union(&a)` deadlock-free when they race against queued writers.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use parking_lot::RwLock;

use crate::identity::{ContainerId, read_both};

/// A `HashSet` behind one `RwLock`, safe to share between threads.
pub struct ConcurrentSet<K> {
    id: ContainerId,
    members: RwLock<HashSet<K>>,
}

impl<K> ConcurrentSet<K>
where
    K: Eq + Hash,
{
    /// Create an empty set.
    pub fn new() -> Self {
        Self::from_set(HashSet::new())
    }

    /// Create an empty set with room for at least `capacity` members.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_set(HashSet::with_capacity(capacity))
    }

    fn from_set(members: HashSet<K>) -> Self {
        Self {
            id: ContainerId::next(),
            members: RwLock::new(members),
        }
    }

    /// Identity used for lock ordering.
    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// Add `key`. Returns `true` if it was not already present.
    pub fn insert(&self, key: K) -> bool {
        self.members.write().insert(key)
    }

    /// Remove `key`. Returns `true` if it was present.
    pub fn remove(&self, key: &K) -> bool {
        self.members.write().remove(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.members.read().contains(key)
    }

    pub fn len(&self) -> usize {
        self.members.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.read().is_empty()
    }

    /// Snapshot of all members, in unspecified order.
    pub fn values(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.members.read().iter().cloned().collect()
    }

    /// Remove every member.
    pub fn clear(&self) {
        self.members.write().clear();
    }

    fn with_pair<R>(&self, other: &Self, f: impl FnOnce(&HashSet<K>, &HashSet<K>) -> R) -> R {
        read_both((self.id, &self.members), (other.id, &other.members), f)
    }

    /// Members of either set.
    pub fn union(&self, other: &Self) -> Self
    where
        K: Clone,
    {
        self.with_pair(other, |a, b| Self::from_set(a.union(b).cloned().collect()))
    }

    /// Members of both sets.
    pub fn intersection(&self, other: &Self) -> Self
    where
        K: Clone,
    {
        self.with_pair(other, |a, b| {
            Self::from_set(a.intersection(b).cloned().collect())
        })
    }

    /// Members of `self` that are not in `other`.
    pub fn difference(&self, other: &Self) -> Self
    where
        K: Clone,
    {
        self.with_pair(other, |a, b| Self::from_set(a.difference(b).cloned().collect()))
    }

    /// Members of exactly one of the two sets.
    pub fn symmetric_difference(&self, other: &Self) -> Self
    where
        K: Clone,
    {
        self.with_pair(other, |a, b| {
            Self::from_set(a.symmetric_difference(b).cloned().collect())
        })
    }

    /// Whether every member of `self` is in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        self.with_pair(other, |a, b| a.is_subset(b))
    }

    /// Whether every member of `other` is in `self`.
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Whether both sets hold the same members (mutual subset), read as one snapshot.
    pub fn equal(&self, other: &Self) -> bool {
        self.with_pair(other, |a, b| a.len() == b.len() && a.is_subset(b))
    }
}

impl<K> Default for ConcurrentSet<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Deep copy with a fresh identity.
impl<K> Clone for ConcurrentSet<K>
where
    K: Eq + Hash + Clone,
{
    fn clone(&self) -> Self {
        Self::from_set(self.members.read().clone())
    }
}

impl<K> PartialEq for ConcurrentSet<K>
where
    K: Eq + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<K> Eq for ConcurrentSet<K> where K: Eq + Hash {}

impl<K> fmt::Debug for ConcurrentSet<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members = self.members.read();
        f.debug_struct("ConcurrentSet")
            .field("id", &self.id)
            .field("members", &*members)
            .finish()
    }
}

impl<K> FromIterator<K> for ConcurrentSet<K>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_set(iter.into_iter().collect())
    }
}

impl<K> Extend<K> for ConcurrentSet<K>
where
    K: Eq + Hash,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.members.get_mut().extend(iter);
    }
}

impl<K> From<HashSet<K>> for ConcurrentSet<K>
where
    K: Eq + Hash,
{
    fn from(members: HashSet<K>) -> Self {
        Self::from_set(members)
    }
}

#[cfg(feature = "serde")]
impl<K> serde::Serialize for ConcurrentSet<K>
where
    K: serde::Serialize + Eq + Hash,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let members = self.members.read();
        serializer.collect_seq(members.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, K> serde::Deserialize<'de> for ConcurrentSet<K>
where
    K: serde::Deserialize<'de> + Eq + Hash,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        HashSet::deserialize(deserializer).map(Self::from_set)
    }
}
