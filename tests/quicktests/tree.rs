use std::collections::HashMap;
use std::ops::ControlFlow;

use bst_index::{Comparer, Key, Natural, Node, Tree, TreeError, WalkOutcome};
use quickcheck_macros::quickcheck;

use crate::Op;

const NATURAL: Option<&dyn Comparer> = Some(&Natural);

fn tree_of(xs: &[i8]) -> Tree {
    let mut tree = Tree::new();
    for x in xs {
        tree.insert(Key::from(*x), NATURAL).unwrap();
    }
    tree
}

fn keys(tree: &Tree) -> Vec<Key> {
    tree.iter().map(Node::key).collect()
}

/// Applies a set of operations to a tree and a multiset of keys.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same keys in both.
fn do_ops(ops: &[Op], tree: &mut Tree, counts: &mut HashMap<Key, usize>) {
    for op in ops {
        match *op {
            Op::Insert(k) => {
                let key = Key::from(k);
                tree.insert(key, NATURAL).unwrap();
                *counts.entry(key).or_default() += 1;
            }
            Op::Delete(k) => {
                let key = Key::from(k);
                let present = counts.get(&key).map_or(false, |&count| count > 0);
                match tree.delete(key, NATURAL) {
                    Ok(removed) => {
                        assert!(present);
                        assert_eq!(removed, key);
                        *counts.entry(key).or_default() -= 1;
                    }
                    Err(err) => {
                        assert!(!present);
                        assert_eq!(err, TreeError::NotFound { key });
                    }
                }
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op>) -> bool {
    let mut tree = Tree::new();
    let mut counts = HashMap::new();

    do_ops(&ops, &mut tree, &mut counts);
    counts.iter().all(|(&key, &count)| {
        let found = tree.iter().filter(|node| node.key() == key).count();
        found == count && tree.contains(key, NATURAL) == Ok(count > 0)
    })
}

#[quickcheck]
fn walk_is_sorted(xs: Vec<i8>) -> bool {
    let tree = tree_of(&xs);

    let mut sorted: Vec<Key> = xs.into_iter().map(Key::from).collect();
    sorted.sort();

    keys(&tree) == sorted
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree = tree_of(&xs);

    xs.iter().all(|x| {
        let key = Key::from(*x);
        tree.search(key, NATURAL).unwrap().map(Node::key) == Some(key)
    })
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree = tree_of(&xs);

    nots.iter()
        .filter(|x| !xs.contains(x))
        .all(|x| tree.contains(Key::from(*x), NATURAL) == Ok(false))
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut tree = tree_of(&xs);
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while tree.delete(Key::from(*delete), NATURAL).is_ok() {}
    }

    let mut still_present = xs;
    still_present.retain(|x| !deletes.contains(x));

    deletes
        .iter()
        .all(|x| tree.contains(Key::from(*x), NATURAL) == Ok(false))
        && still_present
            .iter()
            .all(|x| tree.contains(Key::from(*x), NATURAL) == Ok(true))
}

#[quickcheck]
fn delete_removes_exactly_one(xs: Vec<i8>, pick: usize) -> bool {
    if xs.is_empty() {
        return true;
    }
    let mut tree = tree_of(&xs);
    let target = Key::from(xs[pick % xs.len()]);

    let mut expected = keys(&tree);
    let at = expected.iter().position(|&k| k == target).unwrap();
    expected.remove(at);

    tree.delete(target, NATURAL) == Ok(target) && keys(&tree) == expected
}

#[quickcheck]
fn walk_stops_after_n(xs: Vec<i8>, n: usize) -> bool {
    let tree = tree_of(&xs);
    let stop_after = n % (xs.len() + 1);

    let mut visited = 0;
    let outcome = tree.walk(|_| {
        visited += 1;
        if visited == stop_after {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });

    if stop_after == 0 {
        // Never asked to stop.
        outcome == WalkOutcome::Completed && visited == xs.len()
    } else {
        outcome == WalkOutcome::Stopped && visited == stop_after
    }
}
