//! Element-wise transformations that build new vectors.

use std::collections::HashSet;
use std::hash::Hash;

/// Elements satisfying `keep`, in order.
pub fn filter<T, F>(s: &[T], mut keep: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T) -> bool,
{
    s.iter().filter(|v| keep(v)).cloned().collect()
}

/// `f` applied to every element, in order.
pub fn map<T, U, F>(s: &[T], f: F) -> Vec<U>
where
    F: FnMut(&T) -> U,
{
    s.iter().map(f).collect()
}

/// Fold `s` into an accumulator starting from `initial`.
pub fn reduce<T, U, F>(s: &[T], f: F, initial: U) -> U
where
    F: FnMut(U, &T) -> U,
{
    s.iter().fold(initial, f)
}

/// All of `first` followed by all of `second`.
pub fn concat<T: Clone>(first: &[T], second: &[T]) -> Vec<T> {
    let mut out = Vec::with_capacity(first.len() + second.len());
    out.extend_from_slice(first);
    out.extend_from_slice(second);
    out
}

/// Unique elements, keeping the first occurrence of each.
pub fn distinct<T>(s: &[T]) -> Vec<T>
where
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::with_capacity(s.len());
    s.iter().filter(|v| seen.insert(*v)).cloned().collect()
}

/// Elements with a unique `key`, keeping the first occurrence of each key.
pub fn distinct_by<T, K, F>(s: &[T], mut key: F) -> Vec<T>
where
    T: Clone,
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::with_capacity(s.len());
    s.iter().filter(|v| seen.insert(key(v))).cloned().collect()
}

/// Split into (satisfying, not satisfying), each in original order.
pub fn partition<T, F>(s: &[T], mut pred: F) -> (Vec<T>, Vec<T>)
where
    T: Clone,
    F: FnMut(&T) -> bool,
{
    s.iter().cloned().partition(|v| pred(v))
}

/// Concatenate every inner sequence.
pub fn flatten<T, S>(s: &[S]) -> Vec<T>
where
    T: Clone,
    S: AsRef<[T]>,
{
    s.iter().flat_map(|inner| inner.as_ref().iter().cloned()).collect()
}

/// Call `f` on every element, in order.
pub fn for_each<T, F>(s: &[T], f: F)
where
    F: FnMut(&T),
{
    s.iter().for_each(f);
}
