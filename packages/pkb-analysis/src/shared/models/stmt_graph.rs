//! Statement successor graph
//!
//! Shared shape of the CFG and CFGBip: statement index → ordered set of
//! successor indices. Slot 0 is an unused sentinel so that statement numbers
//! index the table directly.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use pkb_store::StmtIndex;

/// Materialised statement relation: source → targets
pub type SuccessorMap = BTreeMap<StmtIndex, BTreeSet<StmtIndex>>;

static NO_SUCCESSORS: BTreeSet<StmtIndex> = BTreeSet::new();

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StmtGraph {
    successors: Vec<BTreeSet<StmtIndex>>,
}

impl StmtGraph {
    /// Graph over statements 1..=n with no edges
    pub fn with_statements(n: usize) -> Self {
        Self {
            successors: vec![BTreeSet::new(); n + 1],
        }
    }

    /// Number of statements N
    pub fn len(&self) -> usize {
        self.successors.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn statements(&self) -> std::ops::RangeInclusive<StmtIndex> {
        1..=self.len()
    }

    pub fn successors(&self, stmt: StmtIndex) -> &BTreeSet<StmtIndex> {
        if stmt == 0 {
            return &NO_SUCCESSORS;
        }
        self.successors.get(stmt).unwrap_or(&NO_SUCCESSORS)
    }

    pub fn has_edge(&self, from: StmtIndex, to: StmtIndex) -> bool {
        self.successors(from).contains(&to)
    }

    /// Add `from → to`; returns false if the edge already existed
    pub fn add_edge(&mut self, from: StmtIndex, to: StmtIndex) -> bool {
        debug_assert!(from != 0 && to != 0, "statement 0 is a sentinel");
        match self.successors.get_mut(from) {
            Some(targets) => targets.insert(to),
            None => false,
        }
    }

    /// Remove and return every outgoing edge of `stmt`
    pub fn take_successors(&mut self, stmt: StmtIndex) -> BTreeSet<StmtIndex> {
        self.successors
            .get_mut(stmt)
            .map(std::mem::take)
            .unwrap_or_default()
    }

    pub fn edges(&self) -> impl Iterator<Item = (StmtIndex, StmtIndex)> + '_ {
        self.statements()
            .flat_map(move |s| self.successors(s).iter().map(move |&t| (s, t)))
    }

    pub fn edge_count(&self) -> usize {
        self.successors.iter().map(BTreeSet::len).sum()
    }
}
