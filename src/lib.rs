//! # pagesort
//!
//! `pagesort` serves sorted pages of a fixed collection without sorting the whole collection
//! up front. Asking for "elements 200..220 in sorted order" only partitions and sorts as much
//! as that window needs, and the work is remembered: later requests never re-sort a region that
//! an earlier request already settled.
//!
//! ## Key Features
//!
//! - **Amortized quickselect**: Each request drives a partition tree with quickselect steps
//!   until the window is covered by small leaves, then introsorts those leaves. Settled leaves
//!   are skipped by every later request.
//! - **Worst-case bounds**: Quickselect splits and introsort share a depth budget, falling back
//!   to heapsort, so adversarial inputs stay O(n log n).
//! - **Zero-copy pages**: Pages are slices into the backing storage. The storage can be
//!   borrowed from the caller or owned by the paginator.
//! - **Pluggable ordering**: The [`Comparer`] trait is a two-way predicate with strategies for
//!   natural order, optional keys, user comparers and stable ordering via [`Indexed`] keys.
//! - **Misbehaving comparers are caught**: A comparer that is not a strict weak ordering is
//!   detected during partitioning and permanently faults the paginator instead of returning
//!   wrong pages.
//!
//! ## Usage
//!
//! ### Basic Usage
//!
//! ```rust
//! use pagesort::Paginator;
//!
//! let mut scores = vec![52, 97, 13, 71, 88, 5, 64];
//! let mut paginator = Paginator::direct(&mut scores);
//!
//! assert_eq!(paginator.get_page(0, 3).unwrap(), &[5, 13, 52]);
//! assert_eq!(paginator.get_page(3, 3).unwrap(), &[64, 71, 88]);
//! ```
//!
//! ### Keys and Values
//!
//! Sort one lane by a parallel key lane, or compute keys once per item:
//!
//! ```rust
//! use pagesort::Paginator;
//!
//! let mut users: Vec<(&str, u32)> = vec![("carol", 41), ("alice", 29), ("bob", 35)];
//! let mut by_age = Paginator::by_key(&mut users, |user: &(&str, u32)| user.1);
//!
//! assert_eq!(by_age.get_page(0, 1).unwrap(), &[("alice", 29)]);
//! ```
//!
//! ### Stable Pages
//!
//! ```rust
//! use pagesort::Paginator;
//!
//! let mut rows: Vec<(u8, char)> = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
//! let mut paginator = Paginator::stable_by_key(&mut rows, |row: &(u8, char)| row.0);
//!
//! assert_eq!(
//!     paginator.get_page(0, 4).unwrap(),
//!     &[(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]
//! );
//! ```
//!
//! ## Performance Characteristics
//!
//! - **First page**: O(n) expected, like quickselect, plus O(k log k) to sort the k elements
//!   around the window.
//! - **Later pages**: Only the pending partitions the window touches are split further.
//! - **Memory Overhead**: One partition node per split. Stable and key-selector paginators also
//!   hold an owned key lane.
//!
//! A paginator is not meant to be shared between threads; every request takes `&mut self`.

pub mod algo;
pub mod config;
pub mod core;
pub mod error;
pub mod paginator;
pub mod partition;
pub mod storage;

pub use crate::config::Tuning;
pub use crate::core::{
    Comparer, FnComparer, Indexed, NaturalOrder, NullsFirst, OptionOrder, Reverse, Stable,
};
pub use crate::error::{Error, Result};
pub use crate::paginator::{PageRange, Paginator, PaginatorState, Position};
pub use crate::partition::{Partition, PartitionTree};
pub use crate::storage::{Direct, Lane, Paired, SortStorage};

pub mod prelude {
    pub use crate::core::{Comparer, Indexed, NaturalOrder, Stable};
    pub use crate::error::{Error, Result};
    pub use crate::paginator::{PageRange, Paginator, Position};
    pub use crate::storage::{Direct, Paired, SortStorage};
}
