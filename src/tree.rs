//! The index itself: an unbalanced BST of [`Key`]s ordered by a caller
//! supplied [`Comparer`].

use std::cmp::Ordering;
use std::ops::ControlFlow;

use tracing::{debug, trace, warn};

use crate::compare::{compare, Comparer};
use crate::walk::{walk, Iter, WalkOutcome};
use crate::{Result, TreeError};

/// A handle to a record in a store owned by the caller. The tree never
/// interprets it, only the [`Comparer`] does.
pub type Key = i64;

type Link = Option<Box<Node>>;

/// Which child link a descent takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    /// Equal keys go right.
    fn of(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Side::Left,
            Ordering::Equal | Ordering::Greater => Side::Right,
        }
    }
}

/// An index over externally stored records, kept in the order defined by the
/// [`Comparer`] passed to each operation. There is no balancing: inserting
/// keys in sorted order produces a tree that is really a linked list.
///
/// # Examples
///
/// ```
/// use bst_index::{Natural, Tree, TreeError};
///
/// let mut tree = Tree::new();
/// for key in [5, 3, 8, 1, 4] {
///     tree.insert(key, Some(&Natural)).unwrap();
/// }
///
/// assert_eq!(tree.search(4, Some(&Natural)).unwrap().map(|n| n.key()), Some(4));
/// assert!(tree.search(99, Some(&Natural)).unwrap().is_none());
///
/// assert_eq!(tree.delete(5, Some(&Natural)), Ok(5));
/// assert_eq!(tree.delete(99, Some(&Natural)), Err(TreeError::NotFound { key: 99 }));
///
/// let keys: Vec<_> = tree.iter().map(|n| n.key()).collect();
/// assert_eq!(keys, [1, 3, 4, 8]);
/// ```
#[derive(Debug, Default)]
pub struct Tree {
    root: Link,
}

impl Tree {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// The root node, if the tree isn't empty.
    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of nodes in the tree. This walks the whole tree.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// The number of nodes on the longest path from the root to a leaf. An
    /// empty tree has a height of 0.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node, usize)> = self.root().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left().map(|n| (n, depth + 1)));
            stack.extend(node.right().map(|n| (n, depth + 1)));
        }
        height
    }

    /// An in-order iterator over the nodes of the tree.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.root())
    }

    /// Walks the whole tree in order. See [`walk`] for details. Walking an
    /// empty tree never calls `visitor` and reports
    /// [`Completed`][WalkOutcome::Completed].
    pub fn walk<'a, F>(&'a self, visitor: F) -> WalkOutcome
    where
        F: FnMut(&'a Node) -> ControlFlow<()>,
    {
        match self.root() {
            Some(root) => walk(root, visitor),
            None => WalkOutcome::Completed,
        }
    }

    /// Inserts `key` and returns the node created for it. Keys that compare
    /// less than a node go to its left, everything else (including equal
    /// keys) goes to its right, so inserting a key twice stores it twice.
    ///
    /// The first insert into an empty tree doesn't need a comparator. After
    /// that a missing one is a [`TreeError::MissingComparator`]. On error
    /// nothing is inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_index::{Natural, Tree, TreeError};
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert_eq!(tree.insert(1, None).map(|n| n.key()), Ok(1));
    /// assert_eq!(tree.insert(2, None).map(|n| n.key()), Err(TreeError::MissingComparator));
    /// assert_eq!(tree.insert(2, Some(&Natural)).map(|n| n.key()), Ok(2));
    /// ```
    pub fn insert(&mut self, key: Key, cmp: Option<&dyn Comparer>) -> Result<&Node> {
        attach(&mut self.root, key, cmp, |_| {}).map(|node| &*node)
    }

    /// Finds a node whose key compares equal to `key`. A miss is `Ok(None)`,
    /// not an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_index::{Natural, Tree};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, None).unwrap();
    ///
    /// assert_eq!(tree.search(1, Some(&Natural)).unwrap().map(|n| n.key()), Some(1));
    /// assert!(tree.search(42, Some(&Natural)).unwrap().is_none());
    /// ```
    pub fn search(&self, key: Key, cmp: Option<&dyn Comparer>) -> Result<Option<&Node>> {
        let cmp = cmp.ok_or(TreeError::MissingComparator)?;
        let mut link = self.root();
        while let Some(node) = link {
            link = match compare(cmp, key, node.key)? {
                Ordering::Less => node.left(),
                Ordering::Equal => return Ok(Some(node)),
                Ordering::Greater => node.right(),
            };
        }
        Ok(None)
    }

    /// Whether a key comparing equal to `key` is in the tree.
    pub fn contains(&self, key: Key, cmp: Option<&dyn Comparer>) -> Result<bool> {
        self.search(key, cmp).map(|node| node.is_some())
    }

    /// Deletes the first node found whose key compares equal to `key` and
    /// returns its key.
    ///
    /// When the node has a left child, that child takes the node's place and
    /// every key of the node's old right subtree is inserted again below it.
    /// When it only has a right child, the right child takes its place. A leaf
    /// is simply removed.
    ///
    /// Unlike [`search`][Tree::search], a missing key is an error
    /// ([`TreeError::NotFound`]). The tree is unchanged whenever an error is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use bst_index::{Natural, Tree, TreeError};
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1, None).unwrap();
    ///
    /// assert_eq!(tree.delete(1, Some(&Natural)), Ok(1));
    /// assert_eq!(tree.delete(1, Some(&Natural)), Err(TreeError::NotFound { key: 1 }));
    /// assert!(tree.is_empty());
    /// ```
    pub fn delete(&mut self, key: Key, cmp: Option<&dyn Comparer>) -> Result<Key> {
        let cmp = cmp.ok_or(TreeError::MissingComparator)?;
        let path = self.path_to(key, cmp)?;
        let slot = follow(&mut self.root, &path);

        let Some(mut node) = slot.take() else {
            return Err(TreeError::NotFound { key });
        };
        let removed = node.key;
        match (node.left.take(), node.right.take()) {
            (Some(left), orphan) => {
                trace!(removed, replacement = left.key, "splicing left child into deleted slot");
                *slot = Some(left);
                if let Some(orphan) = orphan {
                    if let Err(err) = rethread(slot, &orphan, cmp) {
                        warn!(removed, %err, "comparator failed while re-threading, restoring node");
                        node.left = slot.take();
                        node.right = Some(orphan);
                        *slot = Some(node);
                        return Err(err);
                    }
                }
            }
            (None, Some(right)) => {
                trace!(removed, replacement = right.key, "promoting right child into deleted slot");
                *slot = Some(right);
            }
            (None, None) => {
                trace!(removed, "detaching leaf");
            }
        }
        Ok(removed)
    }

    /// The sides taken from the root to reach a node equal to `key`. Nothing
    /// is mutated, so comparator errors are caught before a delete changes
    /// anything.
    fn path_to(&self, key: Key, cmp: &dyn Comparer) -> Result<Vec<Side>> {
        let mut path = Vec::new();
        let mut link = self.root();
        while let Some(node) = link {
            let side = match compare(cmp, key, node.key)? {
                Ordering::Equal => return Ok(path),
                ordering => Side::of(ordering),
            };
            path.push(side);
            link = node.child(side);
        }
        Err(TreeError::NotFound { key })
    }
}

impl<'a> IntoIterator for &'a Tree {
    type Item = &'a Node;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A `Node` holds a key and up to two children. It holds no record data and
/// has no pointer back to its parent.
#[derive(Debug)]
pub struct Node {
    key: Key,
    left: Link,
    right: Link,
}

impl Drop for Node {
    // Dropping a `Box<Node>` would otherwise recurse once per level, which
    // overflows the stack on a degenerate tree.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node>> = Vec::new();
        stack.extend(self.left.take());
        stack.extend(self.right.take());
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl Node {
    fn new(key: Key) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }

    /// The key this node indexes.
    pub fn key(&self) -> Key {
        self.key
    }

    /// The left child. Every key below it compares less than this node's key.
    pub fn left(&self) -> Option<&Node> {
        self.left.as_deref()
    }

    /// The right child. Every key below it compares equal to or greater than
    /// this node's key.
    pub fn right(&self) -> Option<&Node> {
        self.right.as_deref()
    }

    fn child(&self, side: Side) -> Option<&Node> {
        match side {
            Side::Left => self.left(),
            Side::Right => self.right(),
        }
    }

    fn child_mut(&mut self, side: Side) -> &mut Link {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// Inserts `key` into the subtree owned by `link`, reporting each side taken
/// to `trail`. Only an empty `link` may be filled without a comparator.
fn attach<'a>(
    mut link: &'a mut Link,
    key: Key,
    cmp: Option<&dyn Comparer>,
    mut trail: impl FnMut(Side),
) -> Result<&'a mut Node> {
    while let Some(node) = link {
        let cmp = cmp.ok_or(TreeError::MissingComparator)?;
        let side = Side::of(compare(cmp, key, node.key)?);
        trail(side);
        link = node.child_mut(side);
    }
    let node: &'a mut Node = link.insert(Box::new(Node::new(key)));
    Ok(node)
}

/// The link reached by taking `path` from `link`.
fn follow<'a>(mut link: &'a mut Link, path: &[Side]) -> &'a mut Link {
    for &side in path {
        match link {
            Some(node) => link = node.child_mut(side),
            None => break,
        }
    }
    link
}

/// Re-inserts every key of a detached subtree below `slot`, in order.
///
/// If the comparator fails part way, the nodes added so far are removed again
/// (newest first, so each one is still a leaf when it goes) and `slot` is left
/// as it was on entry.
fn rethread(slot: &mut Link, orphan: &Node, cmp: &dyn Comparer) -> Result<()> {
    let mut placed: Vec<Vec<Side>> = Vec::new();
    let mut failure = None;

    walk(orphan, |node| {
        let mut path = Vec::new();
        match attach(slot, node.key, Some(cmp), |side| path.push(side)) {
            Ok(_) => {
                placed.push(path);
                ControlFlow::Continue(())
            }
            Err(err) => {
                failure = Some(err);
                ControlFlow::Break(())
            }
        }
    });

    match failure {
        None => {
            debug!(reinserted = placed.len(), "re-threaded orphaned subtree");
            Ok(())
        }
        Some(err) => {
            for path in placed.iter().rev() {
                *follow(slot, path) = None;
            }
            Err(err)
        }
    }
}
