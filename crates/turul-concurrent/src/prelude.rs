//! Prelude module for convenient imports.
//!
//! ```rust
//! use turul_concurrent::prelude::*;
//! ```

pub use crate::identity::ContainerId;
pub use crate::map::ConcurrentMap;
pub use crate::set::ConcurrentSet;
