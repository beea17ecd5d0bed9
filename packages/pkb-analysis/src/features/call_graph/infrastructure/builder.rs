//! Direct call edges, scanned per procedure body

use petgraph::graph::DiGraph;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

use crate::features::call_graph::domain::CallGraph;
use crate::shared::models::{AnalysisError, Result, StatementTable, StmtType};

/// Build the call graph from the statement table
///
/// Every procedure becomes a node (in program order), every distinct
/// caller/callee pair one edge, however many call statements produce it.
pub fn build_call_graph(table: &StatementTable) -> Result<CallGraph> {
    let mut graph = DiGraph::new();
    let mut name_to_node = HashMap::new();

    for range in table.procedures() {
        let idx = graph.add_node(range.name.clone());
        name_to_node.insert(range.name.clone(), idx);
    }

    let mut seen_pairs = HashSet::new();
    let mut call_sites: BTreeMap<String, Vec<usize>> = BTreeMap::new();

    for stmt in table.stmts_of_type(StmtType::Call) {
        let (caller, callee) = match (table.procedure_of(stmt), table.callee_of(stmt)) {
            (Some(range), Some(callee)) => (range.name.as_str(), callee),
            _ => {
                return Err(AnalysisError::internal("call statement without target").with_stmt(stmt))
            }
        };
        let (&from, &to) = match (name_to_node.get(caller), name_to_node.get(callee)) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                return Err(AnalysisError::invalid_program(format!(
                    "call to unknown procedure '{}'",
                    callee
                ))
                .with_stmt(stmt))
            }
        };

        call_sites.entry(callee.to_string()).or_default().push(stmt);
        if seen_pairs.insert((from, to)) {
            graph.add_edge(from, to, ());
        }
    }

    debug!(
        procedures = graph.node_count(),
        calls = graph.edge_count(),
        "call graph built"
    );

    Ok(CallGraph {
        graph,
        name_to_node,
        call_sites,
    })
}
