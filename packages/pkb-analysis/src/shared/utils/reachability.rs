//! Breadth-first reachability
//!
//! Used for every transitive relation that is plain reachability over a
//! materialised edge set (NextT, AffectsT, AffectsBipT). The source itself
//! is only part of the result when some path of at least one edge leads
//! back to it.

use std::collections::{BTreeSet, VecDeque};
use std::hash::Hash;

use rustc_hash::FxHashSet;

/// Nodes reachable from `source` in one or more steps
pub fn reachable_from<K, F, I>(source: K, mut successors: F) -> BTreeSet<K>
where
    K: Copy + Ord + Hash,
    F: FnMut(K) -> I,
    I: IntoIterator<Item = K>,
{
    let mut reached = BTreeSet::new();
    let mut expanded: FxHashSet<K> = FxHashSet::default();
    let mut queue = VecDeque::from([source]);
    expanded.insert(source);

    while let Some(node) = queue.pop_front() {
        for next in successors(node) {
            reached.insert(next);
            if expanded.insert(next) {
                queue.push_back(next);
            }
        }
    }

    reached
}
