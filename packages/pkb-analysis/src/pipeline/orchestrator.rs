//! Single-run orchestration
//!
//! ```text
//! numbering → call graph → Modifies/Uses → CFG → NextT
//!   → [CFGBip → NextBipT] → Affects/AffectsT → [explosion → AffectsBip/AffectsBipT]
//!   → write relations → seal
//! ```
//!
//! Bracketed stages run only when their toggle is on. Relations are written
//! after every stage succeeded, so a failing run leaves the store untouched.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info};

use pkb_store::{ProcRelation, RelationStore, StmtRelation, VarRelation};

use crate::config::PipelineConfig;
use crate::features::cfg_bip::next_bip_pairs;
use crate::features::flow_graph::next_pairs;
use crate::pipeline::state::PipelineState;
use crate::shared::models::{Program, Result, StmtIndex, SuccessorMap};

/// Outcome of one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub statements: usize,
    pub procedures: usize,
    /// relation name → tuples written
    pub relation_counts: BTreeMap<String, usize>,
}

impl RunSummary {
    pub fn count(&self, relation: &str) -> usize {
        self.relation_counts.get(relation).copied().unwrap_or(0)
    }

    pub fn total_tuples(&self) -> usize {
        self.relation_counts.values().sum()
    }
}

/// Run every enabled stage over `program` and fill `store`
pub fn run_pipeline<S: RelationStore>(
    program: &Program,
    config: &PipelineConfig,
    store: &mut S,
) -> Result<RunSummary> {
    let started = Instant::now();
    let stages = config.stages();
    let mut state = PipelineState::new(program);

    state.number_statements()?;
    state.build_call_graph()?;
    state.compute_modifies_uses()?;
    state.build_cfg()?;
    state.compute_next_t()?;
    if stages.next_bip {
        state.build_cfg_bip()?;
        state.compute_next_bip_t()?;
    }
    state.compute_affects()?;
    if stages.affects_bip {
        state.explode()?;
        state.compute_affects_bip()?;
    }

    let summary = write_relations(&state, store, config)?;
    store.seal();

    info!(
        statements = summary.statements,
        procedures = summary.procedures,
        tuples = summary.total_tuples(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "pipeline run complete"
    );
    Ok(summary)
}

fn write_relations<S: RelationStore>(
    state: &PipelineState<'_>,
    store: &mut S,
    config: &PipelineConfig,
) -> Result<RunSummary> {
    let table = state.table()?;
    let mut summary = RunSummary {
        statements: table.len(),
        procedures: table.procedures().len(),
        relation_counts: BTreeMap::new(),
    };

    let cfg = state.cfg()?;
    write_stmt_pairs(store, &mut summary, StmtRelation::Next, next_pairs(cfg))?;
    write_stmt_map(store, &mut summary, StmtRelation::NextT, state.next_t()?)?;
    write_stmt_map(store, &mut summary, StmtRelation::Affects, state.affects()?)?;
    write_stmt_map(store, &mut summary, StmtRelation::AffectsT, state.affects_t()?)?;

    if config.stages().next_bip {
        let bip = state.cfg_bip()?;
        write_stmt_pairs(store, &mut summary, StmtRelation::NextBip, next_bip_pairs(bip))?;
        write_stmt_map(store, &mut summary, StmtRelation::NextBipT, state.next_bip_t()?)?;
    }
    if config.stages().affects_bip {
        let projected = state.affects_bip()?.project();
        write_stmt_map(store, &mut summary, StmtRelation::AffectsBip, &projected)?;
        write_stmt_map(store, &mut summary, StmtRelation::AffectsBipT, state.affects_bip_t()?)?;
    }

    let calls = state.call_graph()?;
    let mut written = 0;
    for (caller, callee) in calls.call_pairs() {
        store.insert_proc_pair(ProcRelation::Calls, &caller, &callee)?;
        written += 1;
    }
    record(&mut summary, ProcRelation::Calls.as_str(), written);

    let mut written = 0;
    for (caller, callee) in state.calls_t()?.pairs() {
        store.insert_proc_pair(ProcRelation::CallsT, caller, callee)?;
        written += 1;
    }
    record(&mut summary, ProcRelation::CallsT.as_str(), written);

    let mu = state.modifies_uses()?;
    let mut written = 0;
    for (stmt, var) in mu.stmt_modifies_pairs() {
        store.insert_stmt_var(VarRelation::Modifies, stmt, var)?;
        written += 1;
    }
    for (procedure, var) in mu.proc_modifies_pairs() {
        store.insert_proc_var(VarRelation::Modifies, procedure, var)?;
        written += 1;
    }
    record(&mut summary, VarRelation::Modifies.as_str(), written);

    let mut written = 0;
    for (stmt, var) in mu.stmt_uses_pairs() {
        store.insert_stmt_var(VarRelation::Uses, stmt, var)?;
        written += 1;
    }
    for (procedure, var) in mu.proc_uses_pairs() {
        store.insert_proc_var(VarRelation::Uses, procedure, var)?;
        written += 1;
    }
    record(&mut summary, VarRelation::Uses.as_str(), written);

    Ok(summary)
}

fn write_stmt_pairs<S: RelationStore>(
    store: &mut S,
    summary: &mut RunSummary,
    relation: StmtRelation,
    pairs: impl IntoIterator<Item = (StmtIndex, StmtIndex)>,
) -> Result<()> {
    let mut written = 0;
    for (from, to) in pairs {
        store.insert_stmt_pair(relation, from, to)?;
        written += 1;
    }
    debug!(relation = relation.as_str(), tuples = written, "relation written");
    record(summary, relation.as_str(), written);
    Ok(())
}

fn write_stmt_map<S: RelationStore>(
    store: &mut S,
    summary: &mut RunSummary,
    relation: StmtRelation,
    map: &SuccessorMap,
) -> Result<()> {
    let pairs = map
        .iter()
        .flat_map(|(&from, targets)| targets.iter().map(move |&to| (from, to)));
    write_stmt_pairs(store, summary, relation, pairs)
}

fn record(summary: &mut RunSummary, relation: &str, written: usize) {
    summary.relation_counts.insert(relation.to_string(), written);
}
