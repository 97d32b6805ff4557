//! An index over records that live somewhere else, kept as a plain (unbalanced)
//! Binary Search Tree.
//!
//! ## The index
//!
//! Each `Node` in the tree holds a single [`Key`], an integer handle into a
//! store owned by the caller (a `Vec` of rows, a slab, a file of fixed size
//! records...), and up to two children. The tree never sees the records. To
//! put keys in order it asks a [`Comparer`] supplied with every call, which is
//! free to look the records up however it likes. The invariants are:
//!
//! 1. For every `Node`, every key in its left subtree compares less than its
//!    own key.
//! 2. For every `Node`, every key in its right subtree compares equal to or
//!    greater than its own key. Duplicates are allowed and always go right.
//!
//! Nothing keeps the tree balanced, so operations take `O(height)` and the
//! height of a tree built from sorted input is its size. Walking the tree
//! (left subtree, then node, then right subtree) visits keys in order.
//!
//! ## Deleting
//!
//! Deleting a node with a left child moves the left child up into its place
//! and inserts every key of the old right subtree again, one by one, in
//! order. The right subtree's keys survive, its shape does not.
//!
//! # Examples
//!
//! ```
//! use bst_index::{Key, Ordered, Tree};
//!
//! let ages = vec![41, 17, 33, 17, 62];
//! let by_age = Ordered(|a: Key, b: Key| ages[a as usize].cmp(&ages[b as usize]));
//!
//! let mut tree = Tree::new();
//! for row in 0..ages.len() as Key {
//!     tree.insert(row, Some(&by_age)).unwrap();
//! }
//!
//! let rows: Vec<_> = tree.iter().map(|node| node.key()).collect();
//! assert_eq!(rows, [1, 3, 2, 0, 4]);
//!
//! // Deleting hands back the row that was removed from the index.
//! assert_eq!(tree.delete(0, Some(&by_age)), Ok(0));
//! assert_eq!(tree.len(), 4);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod compare;
mod error;
mod tree;
mod walk;

pub use compare::{Comparer, Natural, Ordered};
pub use error::{Result, TreeError};
pub use tree::{Key, Node, Tree};
pub use walk::{walk, Iter, WalkOutcome};
