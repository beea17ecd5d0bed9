//! Topological sort of the call graph (Kahn's algorithm)
//!
//! Queue seeded with zero in-degree procedures in program order, so the
//! result is deterministic. A short order means a cycle; the cycles are
//! reported through Tarjan SCC so the error names the procedures involved.

use petgraph::algo::tarjan_scc;
use petgraph::graph::NodeIndex;
use petgraph::Direction;
use std::collections::VecDeque;
use tracing::debug;

use crate::features::call_graph::domain::{CallGraph, TopoOrder};
use crate::shared::models::{AnalysisError, Result};

/// Callers-before-callees order, or `CyclicCallGraph` if recursion exists
pub fn topological_order(calls: &CallGraph) -> Result<TopoOrder> {
    let graph = &calls.graph;

    let mut in_degree: Vec<usize> = graph
        .node_indices()
        .map(|idx| graph.neighbors_directed(idx, Direction::Incoming).count())
        .collect();

    let mut queue: VecDeque<NodeIndex> = graph
        .node_indices()
        .filter(|idx| in_degree[idx.index()] == 0)
        .collect();

    let mut order = Vec::with_capacity(graph.node_count());
    while let Some(node) = queue.pop_front() {
        order.push(graph[node].clone());

        let mut callees: Vec<NodeIndex> = graph.neighbors_directed(node, Direction::Outgoing).collect();
        callees.sort();
        for callee in callees {
            let degree = &mut in_degree[callee.index()];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(callee);
            }
        }
    }

    if order.len() < graph.node_count() {
        let cycles = find_cycles(calls);
        debug!(cycles = cycles.len(), "call graph is recursive");
        return Err(AnalysisError::cyclic_call_graph(&cycles));
    }

    Ok(TopoOrder { order })
}

/// Strongly connected components that form a cycle, names sorted
fn find_cycles(calls: &CallGraph) -> Vec<Vec<String>> {
    let graph = &calls.graph;
    let mut cycles: Vec<Vec<String>> = tarjan_scc(graph)
        .into_iter()
        .filter(|scc| scc.len() > 1 || graph.contains_edge(scc[0], scc[0]))
        .map(|scc| {
            let mut names: Vec<String> = scc.into_iter().map(|idx| graph[idx].clone()).collect();
            names.sort();
            names
        })
        .collect();
    cycles.sort();
    cycles
}
