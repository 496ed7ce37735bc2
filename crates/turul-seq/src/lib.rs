//! # Sequence Operations
//!
//! Pure, single-threaded helpers over slices. They are mostly thin wrappers
//! over iterator adapters, collected here so callers preparing task lists
//! (chunk the input, build one task per chunk) have one consistent surface.
//!
//! ```rust
//! let data: Vec<u32> = (1..=10).collect();
//! let chunks = turul_seq::chunk(&data, 3)?;
//! let sums = turul_seq::map(&chunks, |c| c.iter().sum::<u32>());
//! assert_eq!(sums, vec![6, 15, 24, 10]);
//! assert_eq!(turul_seq::reduce(&sums, |acc, s| acc + s, 0), 55);
//! # Ok::<(), turul_seq::SeqError>(())
//! ```

pub mod error;
pub mod query;
pub mod reorder;
pub mod slicing;
pub mod transform;
pub mod zip;

pub use error::SeqError;
pub use query::{all, any, count, index_of};
pub use reorder::{reverse, rotate_left, rotate_right, shuffle};
pub use slicing::{chunk, skip, take, take_while};
pub use transform::{concat, distinct, distinct_by, filter, flatten, for_each, map, partition, reduce};
pub use zip::{zip, zip_shortest, zip_with_index};
