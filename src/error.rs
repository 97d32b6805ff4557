//! Errors returned by tree operations.

use crate::Key;

/// Result type for tree operations.
pub type Result<T, E = TreeError> = std::result::Result<T, E>;

/// Everything that can go wrong while inserting, searching, or deleting.
///
/// Note that a [`search`][crate::Tree::search] miss is not an error, it is
/// `Ok(None)`. Only [`delete`][crate::Tree::delete] reports a missing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// An operation needed to order keys but no comparator was supplied.
    #[error("a comparator is required to order keys")]
    MissingComparator,

    /// The comparator returned something other than `-1`, `0`, or `1`.
    #[error("comparator returned {value}, expected -1, 0, or 1")]
    InvalidComparatorResult {
        /// The raw value the comparator produced.
        value: i8,
    },

    /// The key to delete is not in the tree.
    #[error("key {key} is not in the tree")]
    NotFound {
        /// The key that was requested.
        key: Key,
    },
}
