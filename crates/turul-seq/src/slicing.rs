//! Views into a sequence: prefixes, suffixes and fixed-size chunks.

use crate::error::SeqError;

/// Consecutive sub-slices of `size` elements; the last may be shorter.
///
/// Typical use is partitioning bulk data into one task per chunk.
pub fn chunk<T>(s: &[T], size: usize) -> Result<Vec<&[T]>, SeqError> {
    if size == 0 {
        return Err(SeqError::ZeroChunkSize);
    }
    Ok(s.chunks(size).collect())
}

/// The first `n` elements, or all of `s` when it is shorter.
pub fn take<T>(s: &[T], n: usize) -> &[T] {
    &s[..n.min(s.len())]
}

/// The longest prefix whose elements all satisfy `pred`.
pub fn take_while<T, F>(s: &[T], mut pred: F) -> &[T]
where
    F: FnMut(&T) -> bool,
{
    let end = s.iter().position(|v| !pred(v)).unwrap_or(s.len());
    &s[..end]
}

/// Everything after the first `n` elements; empty when `n` exceeds the length.
#[doc(alias = "drop")]
pub fn skip<T>(s: &[T], n: usize) -> &[T] {
    &s[n.min(s.len())..]
}
