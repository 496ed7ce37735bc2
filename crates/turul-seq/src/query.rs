//! Read-only questions about a sequence.

/// Position of the first element equal to `elem`.
pub fn index_of<T: PartialEq>(s: &[T], elem: &T) -> Option<usize> {
    s.iter().position(|v| v == elem)
}

/// Number of elements satisfying `pred`.
pub fn count<T, F>(s: &[T], mut pred: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    s.iter().filter(|v| pred(v)).count()
}

/// Whether every element satisfies `pred`. `true` for an empty sequence.
pub fn all<T, F>(s: &[T], pred: F) -> bool
where
    F: FnMut(&T) -> bool,
{
    s.iter().all(pred)
}

/// Whether at least one element satisfies `pred`. `false` for an empty sequence.
pub fn any<T, F>(s: &[T], pred: F) -> bool
where
    F: FnMut(&T) -> bool,
{
    s.iter().any(pred)
}
