//! Affects domain model
//!
//! A definition of `v` at an assignment flows forward until something writes
//! `v` again. The same propagation runs over the flat CFG (Affects) and over
//! exploded graphs (AffectsBip); only the node type and the way a node is
//! classified differ.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::hash::Hash;

use crate::features::explosion::ExplodedNodeId;
use crate::shared::models::{StmtIndex, SuccessorMap};

/// How a node treats the variable being propagated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Effect {
    /// Assignment reading the variable: the definition reaches it
    pub uses: bool,
    /// Writes the variable: the definition stops here
    pub kills: bool,
}

/// Nodes a definition reaches, starting after `start`
///
/// A node that both uses and kills is reported and then ends that path.
pub(crate) fn propagate_definition<N, F, I, C>(start: N, mut successors: F, classify: C) -> BTreeSet<N>
where
    N: Copy + Ord + Hash,
    F: FnMut(N) -> I,
    I: IntoIterator<Item = N>,
    C: Fn(N) -> Effect,
{
    let mut affected = BTreeSet::new();
    let mut visited: FxHashSet<N> = FxHashSet::default();
    let mut stack: Vec<N> = successors(start).into_iter().collect();

    while let Some(node) = stack.pop() {
        if !visited.insert(node) {
            continue;
        }
        let effect = classify(node);
        if effect.uses {
            affected.insert(node);
        }
        if !effect.kills {
            stack.extend(successors(node));
        }
    }

    affected
}

/// Node-level AffectsBip edges of one exploded graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAffects {
    pub root: String,
    pub(crate) edges: BTreeMap<ExplodedNodeId, BTreeSet<ExplodedNodeId>>,
    /// node → statement, for projection
    pub(crate) stmt_of: Vec<StmtIndex>,
}

impl NodeAffects {
    pub fn targets(&self, node: ExplodedNodeId) -> impl Iterator<Item = ExplodedNodeId> + '_ {
        self.edges.get(&node).into_iter().flatten().copied()
    }

    pub fn sources(&self) -> impl Iterator<Item = ExplodedNodeId> + '_ {
        self.edges.keys().copied()
    }

    pub fn stmt_of(&self, node: ExplodedNodeId) -> Option<StmtIndex> {
        self.stmt_of.get(node.index()).copied()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }
}

/// AffectsBip across every exploded graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffectsBip {
    pub(crate) graphs: Vec<NodeAffects>,
}

impl AffectsBip {
    pub fn graphs(&self) -> &[NodeAffects] {
        &self.graphs
    }

    /// Statement-level projection of the node edges
    pub fn project(&self) -> SuccessorMap {
        let mut projected = SuccessorMap::new();
        for graph in &self.graphs {
            for (&from, targets) in &graph.edges {
                let Some(a) = graph.stmt_of(from) else { continue };
                let entry = projected.entry(a).or_default();
                entry.extend(targets.iter().filter_map(|&to| graph.stmt_of(to)));
            }
        }
        projected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_propagation_stops_at_kill() {
        // 1 → 2 → 3 → 4, node 3 kills, nodes 2 and 4 use
        let next = |n: u32| if n < 4 { vec![n + 1] } else { vec![] };
        let classify = |n: u32| Effect {
            uses: n == 2 || n == 4,
            kills: n == 3,
        };

        let affected = propagate_definition(1, next, classify);
        assert_eq!(affected, BTreeSet::from([2]));
    }

    // EDGE CASE: a node that uses and kills is still reported
    #[test]
    fn test_use_and_kill_on_same_node() {
        let next = |n: u32| if n < 3 { vec![n + 1] } else { vec![1] };
        let classify = |n: u32| Effect {
            uses: n == 1 || n == 3,
            kills: n == 1,
        };

        // loops back to the source, which redefines its own input
        let affected = propagate_definition(1, next, classify);
        assert_eq!(affected, BTreeSet::from([1, 3]));
    }
}
