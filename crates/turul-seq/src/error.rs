//! Errors for sequence operations with preconditions.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeqError {
    #[error("chunk size must be at least 1")]
    ZeroChunkSize,

    #[error("sequences must have the same length: {left} != {right}")]
    LengthMismatch { left: usize, right: usize },
}
