//! Affects / AffectsT over the flat CFG

use tracing::{debug, trace};

use crate::features::affects::domain::{propagate_definition, Effect};
use crate::features::flow_graph::Cfg;
use crate::features::modifies_uses::ModifiesUses;
use crate::shared::models::{StatementTable, StmtIndex, StmtType, SuccessorMap};
use crate::shared::utils::reachable_from;

/// What `stmt` does to `var` in the intraprocedural setting
///
/// A call writes `var` when its callee modifies it, directly or further
/// down the call chain.
fn effect_on(table: &StatementTable, mu: &ModifiesUses, stmt: StmtIndex, var: &str) -> Effect {
    let Some(info) = table.info(stmt) else {
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
        StmtType::Call => Effect {
            uses: false,
            kills: mu.modifies_stmt(stmt).contains(var),
        },
        StmtType::Print | StmtType::If | StmtType::While => Effect::default(),
    }
}

/// `Affects(a, b)` for every assignment `a`
pub fn compute_affects(table: &StatementTable, cfg: &Cfg, mu: &ModifiesUses) -> SuccessorMap {
    let mut affects = SuccessorMap::new();

    for assign in table.stmts_of_type(StmtType::Assign) {
        let Some(var) = table.info(assign).and_then(|i| i.writes.as_deref()) else {
            continue;
        };
        let affected = propagate_definition(
            assign,
            |s| cfg.successors(s).iter().copied(),
            |s| effect_on(table, mu, s, var),
        );
        trace!(assign, var, affected = affected.len(), "definition propagated");
        if !affected.is_empty() {
            affects.insert(assign, affected);
        }
    }

    debug!(
        pairs = affects.values().map(|t| t.len()).sum::<usize>(),
        "Affects computed"
    );
    affects
}

/// Transitive closure over already computed direct edges
pub fn compute_transitive(direct: &SuccessorMap) -> SuccessorMap {
    let mut closure = SuccessorMap::new();
    for &from in direct.keys() {
        let reached = reachable_from(from, |s| direct.get(&s).into_iter().flatten().copied());
        if !reached.is_empty() {
            closure.insert(from, reached);
        }
    }
    closure
}
