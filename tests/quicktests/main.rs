//! Property tests for the index, run against `Natural` ordering over `i8`
//! sized keys so that duplicates are common.

use quickcheck::{Arbitrary, Gen};

mod tree;

/// An enum for the various kinds of "things" to do to
/// a tree in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op {
    /// Insert the key into the tree
    Insert(i8),
    /// Delete the key from the tree
    Delete(i8),
}

impl Arbitrary for Op {
    fn arbitrary(g: &mut Gen) -> Self {
        if bool::arbitrary(g) {
            Op::Insert(i8::arbitrary(g))
        } else {
            Op::Delete(i8::arbitrary(g))
        }
    }
}
