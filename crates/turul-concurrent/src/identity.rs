//! Container identity and lock ordering.
//!
//! Every container receives a process-wide sequence number at creation.
//! Operations that read two containers at once lock them in ascending
//! identity order, regardless of which one is the receiver.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

static NEXT_CONTAINER_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a container, unique for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContainerId(u64);

impl ContainerId {
    pub(crate) fn next() -> Self {
        Self(NEXT_CONTAINER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw sequence number.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "container#{}", self.0)
    }
}

/// Read two lock-guarded values at once, passing them to `f` in argument order.
///
/// Locks are always taken lowest identity first. When both sides are the same
/// container the lock is taken once, since a second shared acquisition can
/// block behind a queued writer.
pub(crate) fn read_both<T, R>(
    left: (ContainerId, &RwLock<T>),
    right: (ContainerId, &RwLock<T>),
    f: impl FnOnce(&T, &T) -> R,
) -> R {
    let (left_id, left_lock) = left;
    let (right_id, right_lock) = right;

    if left_id == right_id {
        let guard = left_lock.read();
        return f(&guard, &guard);
    }

    if left_id < right_id {
        let l = left_lock.read();
        let r = right_lock.read();
        f(&l, &r)
    } else {
        let r = right_lock.read();
        let l = left_lock.read();
        f(&l, &r)
    }
}
