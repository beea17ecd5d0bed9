//! Intraprocedural control flow graph

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::shared::models::{StatementTable, StmtGraph, StmtIndex, StmtType};

/// Statement-level CFG for the whole program
///
/// Edges never cross procedure boundaries. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cfg {
    pub(crate) graph: StmtGraph,
}

impl Cfg {
    pub fn graph(&self) -> &StmtGraph {
        &self.graph
    }

    pub fn successors(&self, stmt: StmtIndex) -> &BTreeSet<StmtIndex> {
        self.graph.successors(stmt)
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether control can leave the procedure right after `stmt`
    ///
    /// - read / print / assign / call: no successor
    /// - while: exactly one successor (its body; no follower)
    /// - if: never, its branches carry the exits
    pub fn is_exit(&self, table: &StatementTable, stmt: StmtIndex) -> bool {
        let out = self.successors(stmt).len();
        match table.stmt_type(stmt) {
            Some(StmtType::While) => out == 1,
            Some(StmtType::If) | None => false,
            Some(_) => out == 0,
        }
    }
}
