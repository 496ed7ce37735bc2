//! Pairwise combination of sequences.

use crate::error::SeqError;

/// Combine equal-length sequences element by element.
pub fn zip<T, U, V, F>(first: &[T], second: &[U], mut f: F) -> Result<Vec<V>, SeqError>
where
    F: FnMut(&T, &U) -> V,
{
    if first.len() != second.len() {
        return Err(SeqError::LengthMismatch {
            left: first.len(),
            right: second.len(),
        });
    }
    Ok(first.iter().zip(second).map(|(a, b)| f(a, b)).collect())
}

/// Combine element by element, stopping at the end of the shorter sequence.
pub fn zip_shortest<T, U, V, F>(first: &[T], second: &[U], mut f: F) -> Vec<V>
where
    F: FnMut(&T, &U) -> V,
{
    first.iter().zip(second).map(|(a, b)| f(a, b)).collect()
}

/// `f(index, element)` for every element.
pub fn zip_with_index<T, U, F>(s: &[T], mut f: F) -> Vec<U>
where
    F: FnMut(usize, &T) -> U,
{
    s.iter().enumerate().map(|(i, v)| f(i, v)).collect()
}
