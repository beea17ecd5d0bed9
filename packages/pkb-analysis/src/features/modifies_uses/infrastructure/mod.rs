//! Modifies / Uses computation
//!
//! Statement sets come from a post-order walk of each procedure body; a call
//! inherits its callee's procedure sets, which are complete because
//! procedures are visited callees first.

use tracing::debug;

use crate::features::call_graph::TopoOrder;
use crate::features::modifies_uses::domain::{ModifiesUses, VarSet};
use crate::shared::models::{AnalysisError, Program, Result, Stmt, StmtKind};

pub fn compute_modifies_uses(program: &Program, order: &TopoOrder) -> Result<ModifiesUses> {
    let mut relations = ModifiesUses::default();

    for name in order.callees_first() {
        let procedure = program.procedure(name).ok_or_else(|| {
            AnalysisError::internal("procedure missing from program").with_procedure(name)
        })?;

        let (modifies, uses) = visit_list(&procedure.body, &mut relations)?;
        relations.proc_modifies.insert(name.to_string(), modifies);
        relations.proc_uses.insert(name.to_string(), uses);
    }

    debug!(
        modifies = relations.stmt_modifies_pairs().count(),
        uses = relations.stmt_uses_pairs().count(),
        "Modifies/Uses computed"
    );
    Ok(relations)
}

/// Union of the sets of every statement in `stmts`
fn visit_list(stmts: &[Stmt], relations: &mut ModifiesUses) -> Result<(VarSet, VarSet)> {
    let mut modifies = VarSet::new();
    let mut uses = VarSet::new();
    for stmt in stmts {
        let (m, u) = visit_stmt(stmt, relations)?;
        modifies.extend(m);
        uses.extend(u);
    }
    Ok((modifies, uses))
}

fn visit_stmt(stmt: &Stmt, relations: &mut ModifiesUses) -> Result<(VarSet, VarSet)> {
    let (modifies, uses) = match &stmt.kind {
        StmtKind::Read { var } => (VarSet::from([var.clone()]), VarSet::new()),
        StmtKind::Print { var } => (VarSet::new(), VarSet::from([var.clone()])),
        StmtKind::Assign { target, uses } => (VarSet::from([target.clone()]), uses.clone()),
        StmtKind::If {
            cond_uses,
            then_body,
            else_body,
        } => {
            let (mut modifies, mut uses) = visit_list(then_body, relations)?;
            let (m, u) = visit_list(else_body, relations)?;
            modifies.extend(m);
            uses.extend(u);
            uses.extend(cond_uses.iter().cloned());
            (modifies, uses)
        }
        StmtKind::While { cond_uses, body } => {
            let (modifies, mut uses) = visit_list(body, relations)?;
            uses.extend(cond_uses.iter().cloned());
            (modifies, uses)
        }
        StmtKind::Call { callee } => {
            if !relations.proc_modifies.contains_key(callee) {
                return Err(AnalysisError::internal(format!(
                    "Modifies of '{}' requested before it was computed",
                    callee
                ))
                .with_stmt(stmt.index));
            }
            (
                relations.modifies_proc(callee).clone(),
                relations.uses_proc(callee).clone(),
            )
        }
    };

    if !modifies.is_empty() {
        relations.stmt_modifies.insert(stmt.index, modifies.clone());
    }
    if !uses.is_empty() {
        relations.stmt_uses.insert(stmt.index, uses.clone());
    }
    Ok((modifies, uses))
}
