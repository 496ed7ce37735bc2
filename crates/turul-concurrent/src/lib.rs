//! # Concurrent Containers
//!
//! **Lock-guarded map and set types for sharing state between worker threads.**
//!
//! Each container owns exactly one `parking_lot::RwLock` over its whole
//! storage. Readers proceed together, writers are exclusive, and every
//! operation holds the lock only for its own duration.
//!
//! ## Quick Start
//!
//! ```rust
//! use turul_concurrent::prelude::*;
//!
//! let scores = ConcurrentMap::new();
//! scores.insert("alice", 3);
//! scores.update("alice", |v| v.unwrap_or(0) + 1);
//! assert_eq!(scores.get(&"alice"), Some(4));
//!
//! let a: ConcurrentSet<u32> = [1, 2, 3].into_iter().collect();
//! let b: ConcurrentSet<u32> = [3, 4].into_iter().collect();
//! assert_eq!(a.union(&b).len(), 4);
//! assert!(a.intersection(&b).contains(&3));
//! ```
//!
//! ## Lock ordering
//!
//! Set operations that read two containers lock them in ascending
//! [`ContainerId`] order, so opposite-direction calls running at the same
//! time cannot deadlock.

pub mod identity;
pub mod map;
pub mod prelude;
pub mod set;

pub use identity::ContainerId;
pub use map::ConcurrentMap;
pub use set::ConcurrentSet;
