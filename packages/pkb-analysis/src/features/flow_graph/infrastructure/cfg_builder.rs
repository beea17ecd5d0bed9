/*
 * CFG Builder
 *
 * One pass over each procedure's statement lists. Every list is linked with
 * the statement control falls through to once the list is done (`follow`):
 * - top-level list of a procedure: none
 * - branch of an `if`: whatever follows the `if`
 * - body of a `while`: the `while` itself
 *
 * Leaf exits of nested `if`s therefore reach the follower without a
 * separate fix-up pass.
 */

use tracing::debug;

use crate::features::flow_graph::domain::Cfg;
use crate::shared::models::{Program, StatementTable, Stmt, StmtGraph, StmtIndex, StmtKind};

/// Build the program CFG
pub fn build_cfg(program: &Program, table: &StatementTable) -> Cfg {
    let mut graph = StmtGraph::with_statements(table.len());

    for procedure in &program.procedures {
        link_stmt_list(&procedure.body, None, &mut graph);
    }

    debug!(
        statements = graph.len(),
        edges = graph.edge_count(),
        "CFG built"
    );

    Cfg { graph }
}

fn link_stmt_list(stmts: &[Stmt], follow: Option<StmtIndex>, graph: &mut StmtGraph) {
    for (i, stmt) in stmts.iter().enumerate() {
        let next = stmts.get(i + 1).map(|s| s.index).or(follow);

        match &stmt.kind {
            StmtKind::If {
                then_body,
                else_body,
                ..
            } => {
                for branch in [then_body, else_body] {
                    if let Some(first) = branch.first() {
                        graph.add_edge(stmt.index, first.index);
                    }
                    link_stmt_list(branch, next, graph);
                }
            }
            StmtKind::While { body, .. } => {
                if let Some(first) = body.first() {
                    graph.add_edge(stmt.index, first.index);
                }
                link_stmt_list(body, Some(stmt.index), graph);
                if let Some(next) = next {
                    graph.add_edge(stmt.index, next);
                }
            }
            _ => {
                if let Some(next) = next {
                    graph.add_edge(stmt.index, next);
                }
            }
        }
    }
}
