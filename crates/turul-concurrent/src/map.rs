//! Concurrent map guarded by a single reader-writer lock.
//!
//! Every operation takes the container lock for its own duration only:
//! shared for reads (`get`, `len`, `range`, `keys`, `values`), exclusive for
//! writes (`insert`, `remove`, `clear`, `update`). All operations on one map
//! therefore appear to happen in a single total order.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use parking_lot::RwLock;

use crate::identity::ContainerId;

/// A `HashMap` behind one `RwLock`, safe to share between threads.
///
/// Wrap it in an `Arc` to share ownership across tasks.
pub struct ConcurrentMap<K, V> {
    id: ContainerId,
    entries: RwLock<HashMap<K, V>>,
}

impl<K, V> ConcurrentMap<K, V>
where
    K: Eq + Hash,
{
    /// Create an empty map.
    pub fn new() -> Self {
        Self::from_map(HashMap::new())
    }

    /// Create an empty map with room for at least `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_map(HashMap::with_capacity(capacity))
    }

    fn from_map(entries: HashMap<K, V>) -> Self {
        Self {
            id: ContainerId::next(),
            entries: RwLock::new(entries),
        }
    }

    /// Identity used for lock ordering.
    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// Return a copy of the value stored under `key`, or `None` if absent.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.entries.read().get(key).cloned()
    }

    /// Return the value stored under `key`, or `V::default()` if absent.
    pub fn get_or_default(&self, key: &K) -> V
    where
        V: Clone + Default,
    {
        self.get(key).unwrap_or_default()
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Insert or overwrite `key`. Returns the replaced value, if any.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.entries.write().insert(key, value)
    }

    /// Remove `key`. Removing a missing key is a no-op.
    pub fn remove(&self, key: &K) -> Option<V> {
        self.entries.write().remove(key)
    }

    /// Atomically read-modify-write the entry for `key`.
    ///
    /// `f` receives the current value (if any) and returns the value to store.
    /// The write lock is held across `f`, so concurrent updates never lose
    /// increments. Returns a copy of the stored value.
    pub fn update<F>(&self, key: K, f: F) -> V
    where
        V: Clone,
        F: FnOnce(Option<V>) -> V,
    {
        let mut entries = self.entries.write();
        let next = f(entries.get(&key).cloned());
        entries.insert(key, next.clone());
        next
    }

    /// Number of entries at this instant.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the map is empty at this instant.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Visit each entry in unspecified order until `visit` returns `false`.
    ///
    /// The read lock is held for the whole traversal. Writing to this same map
    /// from inside `visit` deadlocks.
    pub fn range<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V) -> bool,
    {
        let entries = self.entries.read();
        for (key, value) in entries.iter() {
            if !visit(key, value) {
                break;
            }
        }
    }

    /// Snapshot of all keys, in unspecified order.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.entries.read().keys().cloned().collect()
    }

    /// Snapshot of all values, in unspecified order.
    pub fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.entries.read().values().cloned().collect()
    }

    /// Snapshot of the whole map.
    pub fn snapshot(&self) -> HashMap<K, V>
    where
        K: Clone,
        V: Clone,
    {
        self.entries.read().clone()
    }

    /// Keep only the entries for which `keep` returns `true`.
    pub fn retain<F>(&self, keep: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        self.entries.write().retain(keep);
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

impl<K, V> Default for ConcurrentMap<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Deep copy with a fresh identity.
impl<K, V> Clone for ConcurrentMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self::from_map(self.snapshot())
    }
}

impl<K, V> fmt::Debug for ConcurrentMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.read();
        f.debug_struct("ConcurrentMap")
            .field("id", &self.id)
            .field("entries", &*entries)
            .finish()
    }
}

impl<K, V> FromIterator<(K, V)> for ConcurrentMap<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_map(iter.into_iter().collect())
    }
}

impl<K, V> Extend<(K, V)> for ConcurrentMap<K, V>
where
    K: Eq + Hash,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries.get_mut().extend(iter);
    }
}

impl<K, V> From<HashMap<K, V>> for ConcurrentMap<K, V>
where
    K: Eq + Hash,
{
    fn from(entries: HashMap<K, V>) -> Self {
        Self::from_map(entries)
    }
}

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for ConcurrentMap<K, V>
where
    K: serde::Serialize + Eq + Hash,
    V: serde::Serialize,
{
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.entries.read();
        serializer.collect_map(entries.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for ConcurrentMap<K, V>
where
    K: serde::Deserialize<'de> + Eq + Hash,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        HashMap::deserialize(deserializer).map(Self::from_map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn one_two() -> ConcurrentMap<String, i32> {
        let m = ConcurrentMap::new();
        m.insert("one".to_string(), 1);
        m.insert("two".to_string(), 2);
        m
    }

    #[test]
    fn test_new_is_empty() {
        let m: ConcurrentMap<String, i32> = ConcurrentMap::new();
        assert!(m.is_empty());
        assert_eq!(m.len(), 0);
    }

    #[test]
    fn test_insert_and_get() {
        let m = one_two();
        assert_eq!(m.len(), 2);
        assert_eq!(m.get(&"one".to_string()), Some(1));
        assert_eq!(m.get(&"three".to_string()), None);
    }

    #[test]
    fn test_insert_overwrites() {
        let m = one_two();
        assert_eq!(m.insert("one".to_string(), 10), Some(1));
        assert_eq!(m.get(&"one".to_string()), Some(10));
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn test_get_or_default_on_miss() {
        let m = one_two();
        assert_eq!(m.get_or_default(&"missing".to_string()), 0);
        assert_eq!(m.get_or_default(&"two".to_string()), 2);
    }

    #[test]
    fn test_remove() {
        let m = one_two();
        assert_eq!(m.remove(&"one".to_string()), Some(1));
        assert_eq!(m.len(), 1);
        assert_eq!(m.get(&"one".to_string()), None);
        assert!(!m.contains_key(&"one".to_string()));

        // Removing again is a no-op.
        assert_eq!(m.remove(&"one".to_string()), None);
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn test_range_visits_all() {
        let m = one_two();
        let mut keys = Vec::new();
        m.range(|k, _| {
            keys.push(k.clone());
            true
        });
        keys.sort();
        assert_eq!(keys, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_range_stops_early() {
        let m: ConcurrentMap<i32, i32> = (0..10).map(|i| (i, i)).collect();
        let mut visited = 0;
        m.range(|_, _| {
            visited += 1;
            visited < 3
        });
        assert_eq!(visited, 3);
    }

    #[test]
    fn test_keys_and_values() {
        let m = one_two();
        let keys = m.keys();
        assert_eq!(keys.len(), 2);
        for k in &keys {
            assert!(m.get(k).is_some(), "key {k} should be present");
        }

        let mut values = m.values();
        values.sort();
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn test_clear() {
        let m = one_two();
        m.clear();
        assert!(m.is_empty());
        assert!(m.keys().is_empty());
    }

    #[test]
    fn test_update_accumulates() {
        let m: ConcurrentMap<&str, u64> = ConcurrentMap::new();
        assert_eq!(m.update("sum", |v| v.unwrap_or(0) + 5), 5);
        assert_eq!(m.update("sum", |v| v.unwrap_or(0) + 7), 12);
        assert_eq!(m.get(&"sum"), Some(12));
    }

    #[test]
    fn test_retain() {
        let m: ConcurrentMap<i32, i32> = (0..10).map(|i| (i, i * i)).collect();
        m.retain(|k, _| k % 2 == 0);
        assert_eq!(m.len(), 5);
        assert!(m.contains_key(&4));
        assert!(!m.contains_key(&3));
    }

    #[test]
    fn test_clone_is_independent() {
        let m = one_two();
        let copy = m.clone();
        assert_ne!(m.id(), copy.id());

        copy.insert("three".to_string(), 3);
        assert_eq!(copy.len(), 3);
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn test_extend_and_from_hashmap() {
        let mut m: ConcurrentMap<i32, &str> = HashMap::from([(1, "a")]).into();
        m.extend([(2, "b"), (3, "c")]);
        assert_eq!(m.len(), 3);
        assert_eq!(m.get(&3), Some("c"));
    }

    #[test]
    fn test_concurrent_update_loses_nothing() {
        let m = Arc::new(ConcurrentMap::<&str, usize>::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let m = Arc::clone(&m);
                thread::spawn(move || {
                    for _ in 0..1_000 {
                        m.update("hits", |v| v.unwrap_or(0) + 1);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(m.get(&"hits"), Some(8_000));
    }

    #[test]
    fn test_debug_lists_entries() {
        let m: ConcurrentMap<&str, i32> = [("a", 1)].into_iter().collect();
        let rendered = format!("{m:?}");
        assert!(rendered.starts_with("ConcurrentMap"));
        assert!(rendered.contains("\"a\": 1"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let m = one_two();
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json, serde_json::json!({"one": 1, "two": 2}));

        let back: ConcurrentMap<String, i32> = serde_json::from_value(json).unwrap();
        assert_eq!(back.snapshot(), m.snapshot());
    }
}
