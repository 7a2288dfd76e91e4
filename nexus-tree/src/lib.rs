//! Intrusive balanced search trees over external storage.
//!
//! This crate provides an ordered container for latency-sensitive systems
//! like timer wheels, order books and scheduler run queues. The key insight:
//! separate storage from structure.
//!
//! # Design Philosophy
//!
//! Traditional ordered collections own their data:
//!
//! ```text
//! BTreeMap<K,V>  - owns values, allocates on insert
//! BTreeSet<T>    - owns values, no handle to an element once inserted
//! ```
//!
//! This crate inverts the model:
//!
//! ```text
//! Storage (Slab, Vec)  - owns elements, provides stable indices
//! Tree                 - orders indices through links embedded in elements
//! ```
//!
//! Benefits:
//! - **No allocation on insert**: links live inside the element
//! - **O(log n) removal by index**: no search needed to remove an element you hold
//! - **O(1) minimum and maximum**: both ends are cached
//! - **Shared storage**: one pool can feed several trees
//! - **Deterministic duplicates**: equal elements are ordered by insertion
//!   position, never merged
//!
//! # Quick Start
//!
//! ```
//! use nexus_tree::{Direction, Tree, TreeLink, TreeNode};
//!
//! struct Timer {
//!     deadline: u64,
//!     link: TreeLink<usize>,
//! }
//!
//! impl TreeNode<usize> for Timer {
//!     fn link(&self) -> &TreeLink<usize> { &self.link }
//!     fn link_mut(&mut self) -> &mut TreeLink<usize> { &mut self.link }
//! }
//!
//! let mut timers: Vec<Timer> = [30, 10, 20]
//!     .into_iter()
//!     .map(|deadline| Timer { deadline, link: TreeLink::new() })
//!     .collect();
//!
//! let mut tree = Tree::new(|a: &Timer, b: &Timer| a.deadline.cmp(&b.deadline));
//!
//! // Two-phase insert: look up, then link at the returned position.
//! for idx in 0..timers.len() {
//!     let pos = tree.find(&timers, &timers[idx]);
//!     tree.insert(&mut timers, idx, pos);
//! }
//!
//! assert_eq!(tree.first(), Some(1)); // deadline 10
//! assert_eq!(tree.walk(&timers, 1, Direction::After), Some(2));
//!
//! // Pop expired timers one by one; the tree stays valid in between.
//! while let Some(idx) = tree.pop_first(&mut timers) {
//!     assert!(!timers[idx].link.is_linked());
//! }
//! tree.destroy();
//! ```
//!
//! # Critical Invariant: Same Storage Instance
//!
//! All operations on a tree must use the same storage instance. This is the
//! caller's responsibility (same discipline as the `slab` crate). Passing a
//! different storage panics or corrupts the tree; [`Tree::verify`] detects the
//! latter.
//!
//! # Position Tokens
//!
//! [`Tree::find`] returns a [`Position`]: either the matching element or the
//! slot where the target belongs. The position stays usable only until the
//! next structural change; [`Tree::insert`] panics on a stale one. Use
//! [`Tree::insert_here`] to place an element next to a known neighbour
//! without any lookup.
//!
//! # Balancing
//!
//! | Strategy | Notes |
//! |----------|-------|
//! | [`RedBlack`] | Default, cheaper removal |
//! | [`Avl`] | Stricter balance, shallower lookups |
//!
//! Both satisfy the same ordering contract; see [`balance`].
//!
//! # Storage Options
//!
//! | Storage | Capacity | Use Case |
//! |---------|----------|----------|
//! | `slab::Slab` | Growable, slot reuse | General purpose |
//! | `Vec<T>` | Append-only | Pools built up front |
//! | `[T; N]` | Fixed | Static tables |
//! | [`OwnedTree`] | Fixed, owned | Single tree, no sharing |

#![warn(missing_docs)]

pub mod balance;
pub mod index;
pub mod link;
pub mod owned;
pub mod position;
mod proptests;
pub mod storage;
pub mod tree;

pub use balance::{Avl, Balance, RedBlack};
pub use index::Index;
pub use link::{Direction, TreeLink, TreeNode};
pub use owned::OwnedTree;
pub use position::{Place, Position};
pub use storage::{Full, Storage};
pub use tree::{Corruption, Drain, Iter, OrdFn, OrdTree, Tree};
