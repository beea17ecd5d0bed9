//! End-to-end pipeline runs: fixtures → store → snapshot

#[path = "../common/mod.rs"]
mod common;

use std::io::Write;

use common::*;
use pkb_analysis::{ErrorKind, PipelineConfig, Preset, ProgramBuilder};
use pkb_store::{
    InMemoryRelationStore, ProcRelation, RelationSnapshot, RelationStore, StmtRelation,
    VarRelation,
};
use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

#[test]
fn test_accumulator_relation_counts() {
    init_tracing();
    let (store, summary) = run_full(&accumulator());

    assert!(store.is_sealed());
    assert_eq!(summary.statements, 10);
    assert_eq!(summary.procedures, 3);
    assert_eq!(summary.count("Next"), 8);
    assert_eq!(summary.count("Calls"), 2);
    assert_eq!(summary.count("CallsT"), 3);

    for relation in StmtRelation::ALL {
        assert_eq!(
            store.count(relation),
            summary.count(relation.as_str()),
            "{}",
            relation
        );
    }
    assert_eq!(summary.total_tuples(), store.snapshot().tuple_count());
}

#[test]
fn test_accumulator_next_t() {
    let (store, _) = run_full(&accumulator());

    assert_targets(&store, StmtRelation::NextT, 1, &[2, 3, 4, 5, 6]);
    assert_targets(&store, StmtRelation::NextT, 4, &[3, 4, 5, 6]);
    assert_targets(&store, StmtRelation::NextT, 7, &[8, 9]);
    assert_targets(&store, StmtRelation::NextT, 6, &[]);
    // NextT never leaves the procedure
    assert!(!store.contains(StmtRelation::NextT, 4, 7));
}

#[test]
fn test_calls_and_calls_t() {
    let (store, _) = run_full(&linear_call_chain());

    assert_eq!(store.callees(ProcRelation::Calls, "A"), vec!["B"]);
    assert_eq!(store.callees(ProcRelation::CallsT, "A"), vec!["B", "C", "D"]);
    assert_eq!(store.callers(ProcRelation::CallsT, "D"), vec!["A", "B", "C"]);
    assert!(store.callees(ProcRelation::CallsT, "D").is_empty());
}

#[test]
fn test_modifies_uses_propagate_through_calls() {
    let (store, _) = run_full(&accumulator());

    assert_eq!(store.proc_vars_of(VarRelation::Modifies, "main"), vec!["n", "total"]);
    assert_eq!(store.proc_vars_of(VarRelation::Modifies, "step"), vec!["total"]);
    assert!(store.proc_vars_of(VarRelation::Modifies, "log").is_empty());
    assert_eq!(store.proc_vars_of(VarRelation::Uses, "log"), vec!["total"]);

    assert_eq!(store.stmt_vars_of(VarRelation::Modifies, 4), vec!["total"]);
    assert_eq!(store.stmt_vars_of(VarRelation::Uses, 4), vec!["n", "total"]);
    assert_eq!(store.stmt_vars_of(VarRelation::Modifies, 3), vec!["n", "total"]);
    assert_eq!(store.stmt_vars_of(VarRelation::Uses, 9), vec!["total"]);
}

#[test]
fn test_fresh_runs_are_identical() {
    for program in [accumulator(), rotation(), multi_caller()] {
        let (first, _) = run_full(&program);
        let (second, _) = run_full(&program);
        assert_eq!(first.snapshot(), second.snapshot());
    }
}

#[test]
fn test_snapshot_json_round_trip() {
    let (store, _) = run_full(&rotation());
    let snapshot = store.snapshot();

    let file = NamedTempFile::new().unwrap();
    snapshot.write_json(file.path()).unwrap();
    let restored = RelationSnapshot::read_json(file.path()).unwrap();

    assert_eq!(restored, snapshot);
    assert!(restored.stmt_pairs.contains_key(&StmtRelation::AffectsBipT));
}

#[test]
fn test_yaml_config_selects_stages() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "version: 1").unwrap();
    writeln!(file, "preset: full").unwrap();
    writeln!(file, "stages:").unwrap();
    writeln!(file, "  affects_bip: false").unwrap();

    let config = PipelineConfig::from_yaml(file.path()).unwrap();
    assert_eq!(config.get_preset(), Preset::Full);
    assert!(config.stages().next_bip);
    assert!(!config.stages().affects_bip);

    let (store, summary) = run_with(&rotation(), &config);
    assert_eq!(store.count(StmtRelation::AffectsBip), 0);
    assert_eq!(summary.count("NextBip"), store.count(StmtRelation::NextBip));
    assert!(store.count(StmtRelation::NextBip) > 0);
}

#[test]
fn test_intraprocedural_preset() {
    let config = PipelineConfig::preset(Preset::Intraprocedural);
    let (intra, _) = run_with(&accumulator(), &config);
    let (full, _) = run_full(&accumulator());

    assert_eq!(intra.count(StmtRelation::NextBipT), 0);
    assert_eq!(intra.count(StmtRelation::AffectsBipT), 0);
    assert_eq!(intra.pairs(StmtRelation::Affects), full.pairs(StmtRelation::Affects));
    assert_eq!(intra.pairs(StmtRelation::NextT), full.pairs(StmtRelation::NextT));
}

#[test]
fn test_recursive_program_is_rejected() {
    let program = ProgramBuilder::new()
        .procedure("main", |b| {
            b.call("ping"); // 1
        })
        .procedure("ping", |b| {
            b.call("pong"); // 2
        })
        .procedure("pong", |b| {
            b.call("ping"); // 3
        })
        .build();
    let mut store = InMemoryRelationStore::new();

    let err = pkb_analysis::run_pipeline(&program, &PipelineConfig::default(), &mut store)
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::CyclicCallGraph);
    assert!(err.message.contains("ping"));
    assert!(err.message.contains("pong"));
    assert!(!store.is_sealed());
}

#[test]
fn test_unknown_callee_is_invalid() {
    let program = ProgramBuilder::new()
        .procedure("main", |b| {
            b.call("missing");
        })
        .build();
    let mut store = InMemoryRelationStore::new();

    let err = pkb_analysis::run_pipeline(&program, &PipelineConfig::default(), &mut store)
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidProgram);
    assert!(err.message.contains("missing"));
}
