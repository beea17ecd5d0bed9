/*
 * Graph Explosion
 *
 * Inlines every call, recursively, starting from each root procedure:
 * - a procedure occurrence gets one node per statement of its range
 * - a call node's only child is the entry node of a fresh callee occurrence
 * - the callee's non-call exits connect to the continuation: the node of the
 *   call's successor, or the enclosing continuation for a call with none
 *
 * Nodes are numbered in creation order: a procedure's own statements first,
 * then each call's callee occurrence in statement order, depth first.
 */

use tracing::{debug, trace};

use crate::features::call_graph::{CallGraph, TopoOrder};
use crate::features::explosion::domain::{ExplodedGraph, ExplodedNode, ExplodedNodeId};
use crate::features::flow_graph::Cfg;
use crate::shared::models::{AnalysisError, Result, StatementTable, StmtType};

/// Explode every root procedure, roots in program order
pub fn explode_program(
    table: &StatementTable,
    cfg: &Cfg,
    calls: &CallGraph,
    order: &TopoOrder,
) -> Result<Vec<ExplodedGraph>> {
    let mut graphs = Vec::new();

    for root in calls.roots() {
        let mut exploder = Exploder {
            table,
            cfg,
            nodes: Vec::new(),
            max_depth: order.callers_first().len(),
        };
        let entry = exploder.explode(&root, None, 0)?;
        trace!(root = %root, nodes = exploder.nodes.len(), "root exploded");
        graphs.push(ExplodedGraph {
            root,
            nodes: exploder.nodes,
            entry,
        });
    }

    debug!(
        graphs = graphs.len(),
        nodes = graphs.iter().map(ExplodedGraph::node_count).sum::<usize>(),
        "explosion done"
    );
    Ok(graphs)
}

struct Exploder<'a> {
    table: &'a StatementTable,
    cfg: &'a Cfg,
    nodes: Vec<ExplodedNode>,
    /// Call chains are never longer than the number of procedures
    max_depth: usize,
}

impl Exploder<'_> {
    fn explode(
        &mut self,
        procedure: &str,
        continuation: Option<ExplodedNodeId>,
        depth: usize,
    ) -> Result<ExplodedNodeId> {
        if depth >= self.max_depth {
            return Err(AnalysisError::internal("call chain deeper than the call graph")
                .with_procedure(procedure));
        }
        let (table, cfg) = (self.table, self.cfg);
        let range = table
            .range(procedure)
            .ok_or_else(|| {
                AnalysisError::internal("procedure missing from statement table")
                    .with_procedure(procedure)
            })?
            .clone();

        let base = self.nodes.len();
        let node_of = |stmt: usize| ExplodedNodeId(base + (stmt - range.lo));
        for stmt in range.statements() {
            self.nodes.push(ExplodedNode {
                stmt,
                children: Vec::new(),
            });
        }

        for stmt in range.statements() {
            let successors = cfg.successors(stmt);

            let children = if table.is_type(stmt, StmtType::Call) {
                let callee = table.callee_of(stmt).ok_or_else(|| {
                    AnalysisError::internal("call statement without target").with_stmt(stmt)
                })?;
                let return_to = successors.iter().next().map(|&n| node_of(n)).or(continuation);
                vec![self.explode(callee, return_to, depth + 1)?]
            } else {
                let mut children: Vec<ExplodedNodeId> =
                    successors.iter().map(|&n| node_of(n)).collect();
                if let Some(cont) = continuation {
                    if cfg.is_exit(table, stmt) {
                        children.push(cont);
                    }
                }
                children
            };

            self.nodes[node_of(stmt).0].children = children;
        }

        Ok(node_of(range.lo))
    }
}
