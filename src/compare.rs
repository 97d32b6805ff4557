//! The comparator contract. The tree never looks at what a [`Key`] refers to,
//! it only asks a [`Comparer`] how two keys are ordered.

use std::cmp::Ordering;

use crate::{Key, Result, TreeError};

/// A three-way ordering over keys, supplied by the caller on every operation
/// that needs one.
///
/// `compare(candidate, node)` must return `-1` when `candidate` sorts before
/// `node`, `0` when they are equal, and `1` when it sorts after. Anything else
/// is reported as [`TreeError::InvalidComparatorResult`].
///
/// The tree calls this many times per operation (a single delete may re-insert
/// a whole subtree), so it should be a pure function of its arguments. A
/// comparator that changes its mind between calls silently breaks the ordering
/// of the tree.
///
/// Any `Fn(Key, Key) -> i8` is a `Comparer`:
///
/// ```
/// use bst_index::{Comparer, Key};
///
/// let by_magnitude = |a: Key, b: Key| a.abs().cmp(&b.abs()) as i8;
/// assert_eq!(by_magnitude.compare(-3, 2), 1);
/// ```
pub trait Comparer {
    /// Compares the key being placed or looked up against a key already in the
    /// tree.
    fn compare(&self, candidate: Key, node: Key) -> i8;
}

impl<F> Comparer for F
where
    F: Fn(Key, Key) -> i8,
{
    fn compare(&self, candidate: Key, node: Key) -> i8 {
        self(candidate, node)
    }
}

/// Orders keys by their own integer value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl Comparer for Natural {
    fn compare(&self, candidate: Key, node: Key) -> i8 {
        candidate.cmp(&node) as i8
    }
}

/// Adapts a comparison returning [`Ordering`] to the [`Comparer`] contract.
/// This is usually how keys are ordered by the records they index.
///
/// # Examples
///
/// ```
/// use bst_index::{Key, Ordered, Tree};
///
/// let names = ["mallory", "alice", "bob"];
/// let by_name = Ordered(|a: Key, b: Key| names[a as usize].cmp(names[b as usize]));
///
/// let mut tree = Tree::new();
/// for index in 0..names.len() as Key {
///     tree.insert(index, Some(&by_name)).unwrap();
/// }
///
/// let sorted: Vec<_> = tree.iter().map(|n| names[n.key() as usize]).collect();
/// assert_eq!(sorted, ["alice", "bob", "mallory"]);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Ordered<F>(pub F);

impl<F> Comparer for Ordered<F>
where
    F: Fn(Key, Key) -> Ordering,
{
    fn compare(&self, candidate: Key, node: Key) -> i8 {
        (self.0)(candidate, node) as i8
    }
}

/// Runs the comparator and checks its answer.
pub(crate) fn compare(cmp: &dyn Comparer, candidate: Key, node: Key) -> Result<Ordering> {
    match cmp.compare(candidate, node) {
        -1 => Ok(Ordering::Less),
        0 => Ok(Ordering::Equal),
        1 => Ok(Ordering::Greater),
        value => Err(TreeError::InvalidComparatorResult { value }),
    }
}
