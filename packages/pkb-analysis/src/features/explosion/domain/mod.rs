//! Exploded (context-sensitive) execution graph
//!
//! Arena of nodes addressed by `ExplodedNodeId`. Each node is one statement
//! occurrence under one calling context, so the same statement number shows
//! up once per distinct call chain leading to it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::models::StmtIndex;

/// Dense index into `ExplodedGraph::nodes`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExplodedNodeId(pub usize);

impl ExplodedNodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ExplodedNodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplodedNode {
    pub stmt: StmtIndex,
    pub children: Vec<ExplodedNodeId>,
}

/// One exploded graph per root procedure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplodedGraph {
    pub root: String,
    pub(crate) nodes: Vec<ExplodedNode>,
    pub(crate) entry: ExplodedNodeId,
}

impl ExplodedGraph {
    pub fn entry(&self) -> ExplodedNodeId {
        self.entry
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: ExplodedNodeId) -> Option<&ExplodedNode> {
        self.nodes.get(id.0)
    }

    pub fn stmt_of(&self, id: ExplodedNodeId) -> Option<StmtIndex> {
        self.node(id).map(|n| n.stmt)
    }

    pub fn children(&self, id: ExplodedNodeId) -> &[ExplodedNodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn node_ids(&self) -> impl Iterator<Item = ExplodedNodeId> {
        (0..self.nodes.len()).map(ExplodedNodeId)
    }

    /// Every node standing for `stmt`, in creation order
    pub fn occurrences(&self, stmt: StmtIndex) -> Vec<ExplodedNodeId> {
        self.node_ids()
            .filter(|&id| self.stmt_of(id) == Some(stmt))
            .collect()
    }
}
