/*
 * CFGBip Builder
 *
 * Splices every call into its callee. Procedures are processed callees
 * first so the callee's exit set is complete before any of its call sites
 * is rewired:
 *
 *   call s → P, original successor n
 *     s → entry(P)                 (replaces s → n)
 *     e → n  for e in exit-set(P)  (branch-back)
 *
 * A call with no successor adds no branch-back edge; its callee's exits
 * become exits of the caller instead and are wired by the caller's own
 * call sites.
 */

use std::collections::{BTreeSet, VecDeque};
use tracing::{debug, trace};

use crate::features::call_graph::TopoOrder;
use crate::features::cfg_bip::domain::CfgBip;
use crate::features::flow_graph::Cfg;
use crate::shared::models::{AnalysisError, Result, StatementTable, StmtIndex, StmtType};

pub fn build_cfg_bip(table: &StatementTable, cfg: &Cfg, order: &TopoOrder) -> Result<CfgBip> {
    let mut bip = CfgBip {
        graph: cfg.graph().clone(),
        ..CfgBip::default()
    };
    let mut visited = vec![false; table.len() + 1];

    for procedure in order.callees_first() {
        let entry = table.entry(procedure).ok_or_else(|| {
            AnalysisError::internal("procedure missing from statement table")
                .with_procedure(procedure)
        })?;

        let mut exits = BTreeSet::new();
        let mut queue = VecDeque::from([entry]);
        visited[entry] = true;

        while let Some(stmt) = queue.pop_front() {
            let original = cfg.successors(stmt);
            for &next in original {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }

            let is_exit = cfg.is_exit(table, stmt);
            if table.is_type(stmt, StmtType::Call) {
                let callee_exits = splice_call(table, stmt, original, &mut bip)?;
                if is_exit {
                    exits.extend(callee_exits);
                }
            } else if is_exit {
                exits.insert(stmt);
                bip.local_exits.insert(stmt);
            }
        }

        trace!(procedure, exits = exits.len(), "procedure spliced");
        bip.exit_sets.insert(procedure.to_string(), exits);
    }

    debug!(
        edges = bip.graph.edge_count(),
        branch_back = bip.branch_back_count(),
        "CFGBip built"
    );
    Ok(bip)
}

/// Rewire one call statement; returns the callee's exit set
fn splice_call(
    table: &StatementTable,
    call: StmtIndex,
    original: &BTreeSet<StmtIndex>,
    bip: &mut CfgBip,
) -> Result<BTreeSet<StmtIndex>> {
    let callee = table
        .callee_of(call)
        .ok_or_else(|| AnalysisError::internal("call statement without target").with_stmt(call))?;
    let callee_entry = table.entry(callee).ok_or_else(|| {
        AnalysisError::internal("callee missing from statement table").with_stmt(call)
    })?;
    let callee_exits = bip.exit_sets.get(callee).cloned().ok_or_else(|| {
        AnalysisError::internal(format!("exit set of '{}' requested before it was built", callee))
            .with_stmt(call)
    })?;

    for &return_site in original {
        bip.return_sites.insert(call, return_site);
        for &exit in &callee_exits {
            bip.graph.add_edge(exit, return_site);
            bip.branch_back.entry(exit).or_default().insert(return_site);
        }
    }

    bip.graph.take_successors(call);
    bip.graph.add_edge(call, callee_entry);
    Ok(callee_exits)
}

/// Every call statement ends up with exactly one outgoing edge
pub fn calls_have_single_successor(table: &StatementTable, bip: &CfgBip) -> bool {
    table
        .stmts_of_type(StmtType::Call)
        .all(|call| bip.successors(call).len() == 1)
}
