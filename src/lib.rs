//! Size-balanced order-statistic trees for Rust.
//!
//! This crate provides [`SBTree`], an ordered container that keeps its elements sorted by a
//! user-supplied comparator and supports both multiset (`insert_equal`) and set
//! (`insert_unique`) semantics. Besides the usual ordered-container operations it answers
//! order-statistic queries in O(log n):
//!
//! - [`select`](SBTree::select) - the position of the element at a given sorted index
//! - [`rank`](SBTree::rank) - the number of elements ordered before a present key
//! - Indexing by [`Rank`] - e.g., `tree[Rank(0)]` for the smallest element
//!
//! # Example
//!
//! ```
//! use sb_tree::{NOT_PRESENT, Rank, SBTree};
//!
//! let mut tree = SBTree::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert_unique(key);
//! }
//!
//! assert!(tree.iter().eq(&[1, 3, 4, 5, 7, 8, 9]));
//! assert_eq!(tree.get(tree.select(0)), Some(&1));
//! assert_eq!(tree.rank(&7), 4);
//! assert_eq!(tree.rank(&6), NOT_PRESENT);
//! assert_eq!(tree[Rank(6)], 9);
//!
//! // Duplicates are kept by `insert_equal`.
//! tree.insert_equal(4);
//! assert_eq!(tree.count(&4), 2);
//! assert_eq!(tree.erase_key(&4), 2);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **O(log n) rank operations** - Every node stores the population of its subtree
//! - **Stable positions** - A [`Position`] stays valid until its own element is removed
//! - **No recursion over the tree** - Cloning, clearing and the full-structure
//!   [`walk`](SBTree::walk) run in constant stack space
//!
//! # Implementation
//!
//! The tree is a size-balanced tree (SBT): instead of colors or heights, each node keeps its
//! subtree size, and after every insertion or removal the rebalancer rotates wherever a
//! child's subtree has become smaller than one of its nephews. Nodes live in an arena and link
//! to each other by index; the root and both extremes are cached in a separate header.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod compare;
mod error;
mod order_statistic;
mod raw;

pub mod sb_tree;

pub use compare::{Compare, Natural};
pub use error::Error;
pub use order_statistic::{NOT_PRESENT, Rank};
pub use raw::WalkState;
pub use sb_tree::{Position, SBTree};
