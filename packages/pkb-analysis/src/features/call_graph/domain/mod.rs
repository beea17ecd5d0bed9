//! Call graph domain model
//!
//! Directed graph where:
//! - Nodes are procedure names
//! - Edges are direct calls (A → B means A contains `call B`)
//!
//! The graph must be acyclic; `TopoOrder` is the proof that it is, and the
//! stages that depend on acyclicity take it as an input.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::shared::models::StmtIndex;

#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    pub(crate) graph: DiGraph<String, ()>,
    pub(crate) name_to_node: HashMap<String, NodeIndex>,
    /// callee → call statements invoking it, ascending
    pub(crate) call_sites: BTreeMap<String, Vec<StmtIndex>>,
}

impl CallGraph {
    pub fn procedure_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Procedures in program order
    pub fn procedures(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_indices().map(move |idx| self.graph[idx].as_str())
    }

    /// Direct callees of `procedure`, sorted
    pub fn callees(&self, procedure: &str) -> BTreeSet<String> {
        self.neighbors(procedure, Direction::Outgoing)
    }

    /// Direct callers of `procedure`, sorted
    pub fn callers(&self, procedure: &str) -> BTreeSet<String> {
        self.neighbors(procedure, Direction::Incoming)
    }

    fn neighbors(&self, procedure: &str, direction: Direction) -> BTreeSet<String> {
        match self.name_to_node.get(procedure) {
            Some(&idx) => self
                .graph
                .neighbors_directed(idx, direction)
                .map(|n| self.graph[n].clone())
                .collect(),
            None => BTreeSet::new(),
        }
    }

    /// Call statements whose target is `procedure`
    pub fn call_sites_of(&self, procedure: &str) -> &[StmtIndex] {
        self.call_sites
            .get(procedure)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Procedures that are never called, in program order
    pub fn roots(&self) -> Vec<String> {
        self.graph
            .node_indices()
            .filter(|&idx| {
                self.graph
                    .neighbors_directed(idx, Direction::Incoming)
                    .next()
                    .is_none()
            })
            .map(|idx| self.graph[idx].clone())
            .collect()
    }

    /// All direct `Calls(p, q)` pairs, sorted
    pub fn call_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = self
            .graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(a, b)| (self.graph[a].clone(), self.graph[b].clone()))
            .collect();
        pairs.sort();
        pairs
    }
}

/// Topological order of an acyclic call graph (callers before callees)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopoOrder {
    pub(crate) order: Vec<String>,
}

impl TopoOrder {
    pub fn callers_first(&self) -> &[String] {
        &self.order
    }

    /// Callees before callers
    pub fn callees_first(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().rev().map(String::as_str)
    }
}

/// `CallsT`: procedure → every procedure it reaches through calls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallsClosure {
    pub(crate) descendants: BTreeMap<String, BTreeSet<String>>,
}

impl CallsClosure {
    pub fn descendants(&self, procedure: &str) -> Option<&BTreeSet<String>> {
        self.descendants.get(procedure)
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.descendants
            .iter()
            .flat_map(|(p, qs)| qs.iter().map(move |q| (p.as_str(), q.as_str())))
    }

    pub fn pair_count(&self) -> usize {
        self.descendants.values().map(BTreeSet::len).sum()
    }
}
