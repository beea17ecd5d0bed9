//! Interprocedural CFG (CFGBip) domain model

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::shared::models::{StmtGraph, StmtIndex, SuccessorMap};

/// CFG with every call spliced into its callee
///
/// - call statement → callee entry (its only outgoing edge)
/// - callee exit → the call's original successor (branch-back edge)
///
/// Branch-back edges are part of `graph` and also kept apart in
/// `branch_back`, since the traversal follows them only when it has no
/// return address of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CfgBip {
    pub(crate) graph: StmtGraph,
    /// exit statement → statements control may return to
    pub(crate) branch_back: SuccessorMap,
    /// procedure → non-call statements where control leaves it
    pub(crate) exit_sets: BTreeMap<String, BTreeSet<StmtIndex>>,
    /// call statement → its successor in the CFG, when it has one
    pub(crate) return_sites: BTreeMap<StmtIndex, StmtIndex>,
    /// non-call exits of every procedure
    pub(crate) local_exits: BTreeSet<StmtIndex>,
}

impl CfgBip {
    pub fn graph(&self) -> &StmtGraph {
        &self.graph
    }

    pub fn successors(&self, stmt: StmtIndex) -> &BTreeSet<StmtIndex> {
        self.graph.successors(stmt)
    }

    pub fn branch_back_targets(&self, stmt: StmtIndex) -> impl Iterator<Item = StmtIndex> + '_ {
        self.branch_back.get(&stmt).into_iter().flatten().copied()
    }

    pub fn exit_set(&self, procedure: &str) -> Option<&BTreeSet<StmtIndex>> {
        self.exit_sets.get(procedure)
    }

    pub fn return_site(&self, call: StmtIndex) -> Option<StmtIndex> {
        self.return_sites.get(&call).copied()
    }

    pub fn is_local_exit(&self, stmt: StmtIndex) -> bool {
        self.local_exits.contains(&stmt)
    }

    pub fn branch_back_count(&self) -> usize {
        self.branch_back.values().map(BTreeSet::len).sum()
    }
}
