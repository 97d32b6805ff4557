//! In-order traversal. Both the visitor based [`walk`] and the [`Iter`]
//! iterator keep their own stack instead of recursing, so a degenerate tree
//! (every key inserted in ascending order, say) can be traversed no matter how
//! deep it is.

use std::ops::ControlFlow;

use crate::Node;

/// How a [`walk`] finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    /// Every node was visited.
    Completed,
    /// The visitor asked to stop before the traversal finished.
    Stopped,
}

/// Visits every node in the subtree rooted at `node` in order: the left
/// subtree, then the node, then the right subtree. Under a consistent
/// comparator this yields keys in ascending order.
///
/// Returning [`ControlFlow::Break`] from the visitor stops the walk without
/// visiting any more nodes.
///
/// # Examples
///
/// ```
/// use std::ops::ControlFlow;
///
/// use bst_index::{walk, Natural, Tree, WalkOutcome};
///
/// let mut tree = Tree::new();
/// for key in [5, 3, 8, 1, 4] {
///     tree.insert(key, Some(&Natural)).unwrap();
/// }
///
/// let mut seen = Vec::new();
/// let outcome = walk(tree.root().unwrap(), |node| {
///     seen.push(node.key());
///     if node.key() == 4 {
///         ControlFlow::Break(())
///     } else {
///         ControlFlow::Continue(())
///     }
/// });
///
/// assert_eq!(outcome, WalkOutcome::Stopped);
/// assert_eq!(seen, [1, 3, 4]);
/// ```
pub fn walk<'a, F>(node: &'a Node, mut visitor: F) -> WalkOutcome
where
    F: FnMut(&'a Node) -> ControlFlow<()>,
{
    for node in Iter::new(Some(node)) {
        if visitor(node).is_break() {
            return WalkOutcome::Stopped;
        }
    }
    WalkOutcome::Completed
}

/// An in-order iterator over the nodes of a tree. Created by
/// [`Tree::iter`][crate::Tree::iter].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    /// Nodes whose left subtree has been descended into but which haven't been
    /// yielded. The top is always the next node in order.
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(root: Option<&'a Node>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut link: Option<&'a Node>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(node)
    }
}
