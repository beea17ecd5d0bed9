//! AffectsBip / AffectsBipT over exploded graphs
//!
//! Call nodes are transparent: the callee body is inlined after them, so the
//! writes it performs are seen directly.

use std::collections::BTreeMap;
use tracing::debug;

use crate::features::affects::domain::{propagate_definition, AffectsBip, Effect, NodeAffects};
use crate::features::explosion::{ExplodedGraph, ExplodedNodeId};
use crate::shared::models::{StatementTable, StmtType, SuccessorMap};
use crate::shared::utils::reachable_from;

pub fn compute_affects_bip(table: &StatementTable, graphs: &[ExplodedGraph]) -> AffectsBip {
    let result = AffectsBip {
        graphs: graphs.iter().map(|g| node_affects(table, g)).collect(),
    };

    debug!(
        graphs = result.graphs.len(),
        node_edges = result.graphs.iter().map(NodeAffects::edge_count).sum::<usize>(),
        "AffectsBip computed"
    );
    result
}

fn node_affects(table: &StatementTable, graph: &ExplodedGraph) -> NodeAffects {
    let stmt_of: Vec<_> = graph.node_ids().filter_map(|id| graph.stmt_of(id)).collect();
    let mut edges = BTreeMap::new();

    for node in graph.node_ids() {
        let Some(info) = graph.stmt_of(node).and_then(|s| table.info(s)) else {
            continue;
        };
        if info.stmt_type != StmtType::Assign {
            continue;
        }
        let Some(var) = info.writes.as_deref() else {
            continue;
        };

        let affected = propagate_definition(
            node,
            |n| graph.children(n).iter().copied(),
            |n| {
                let Some(info) = graph.stmt_of(n).and_then(|s| table.info(s)) else {
                    return Effect::default();
                };
                match info.stmt_type {
                    StmtType::Assign => Effect {
                        uses: info.reads.contains(var),
                        kills: info.writes.as_deref() == Some(var),
                    },
                    StmtType::Read => Effect {
                        uses: false,
                        kills: info.writes.as_deref() == Some(var),
                    },
                    _ => Effect::default(),
                }
            },
        );
        if !affected.is_empty() {
            edges.insert(node, affected);
        }
    }

    NodeAffects {
        root: graph.root.clone(),
        edges,
        stmt_of,
    }
}

/// `AffectsBipT`: closure over node edges within each graph, then projected
pub fn compute_affects_bip_t(affects_bip: &AffectsBip) -> SuccessorMap {
    let mut projected = SuccessorMap::new();

    for graph in affects_bip.graphs() {
        for source in graph.sources() {
            let Some(from) = graph.stmt_of(source) else {
                continue;
            };
            let reached = reachable_from(source, |n: ExplodedNodeId| graph.targets(n));
            projected
                .entry(from)
                .or_default()
                .extend(reached.into_iter().filter_map(|n| graph.stmt_of(n)));
        }
    }

    projected.retain(|_, targets| !targets.is_empty());
    projected
}
