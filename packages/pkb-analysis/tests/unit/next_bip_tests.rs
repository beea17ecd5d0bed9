//! NextBip / NextBipT through the full pipeline

#[path = "../common/mod.rs"]
mod common;

use common::*;
use pkb_analysis::shared::models::walk_stmts;
use pkb_analysis::{PipelineConfig, Preset, StmtKind};
use pkb_store::StmtRelation::{Next, NextBip, NextBipT, NextT};
use pretty_assertions::assert_eq;

#[test]
fn test_linear_call_chain() {
    init_tracing();
    let (store, _) = run_full(&linear_call_chain());

    assert_eq!(store.pairs(NextBip), vec![(1, 2), (2, 3), (3, 4)]);
    assert_targets(&store, NextBipT, 1, &[2, 3, 4]);
    assert_targets(&store, NextBipT, 2, &[3, 4]);
    assert_targets(&store, NextBipT, 4, &[]);
    // no statement follows another inside a procedure
    assert_eq!(store.count(Next), 0);
}

#[test]
fn test_multi_caller_convergence() {
    let (store, _) = run_full(&multi_caller());

    assert_targets(&store, NextBip, 7, &[2, 4, 6]);
    assert_targets(&store, NextBipT, 7, &[2, 4, 6]);
    // entering p from A returns to A only
    assert_targets(&store, NextBipT, 1, &[2, 7]);
    assert_targets(&store, NextBipT, 3, &[4, 7]);
    assert_targets(&store, NextBipT, 5, &[6, 7]);
}

#[test]
fn test_calls_have_exactly_one_successor() {
    for program in [linear_call_chain(), multi_caller(), rotation(), accumulator()] {
        let (store, _) = run_full(&program);
        let mut call_stmts = Vec::new();
        for procedure in &program.procedures {
            walk_stmts(&procedure.body, &mut |stmt| {
                if matches!(stmt.kind, StmtKind::Call { .. }) {
                    call_stmts.push(stmt.index);
                }
            });
        }
        assert!(!call_stmts.is_empty());
        for stmt in call_stmts {
            assert_eq!(store.successors(NextBip, stmt).len(), 1, "call {}", stmt);
        }
    }
}

#[test]
fn test_loop_with_nested_calls() {
    let (store, summary) = run_full(&accumulator());

    assert_eq!(
        store.pairs(NextBip),
        vec![
            (1, 2),
            (2, 3),
            (3, 4),
            (3, 6),
            (4, 7),
            (5, 3),
            (7, 8),
            (7, 9),
            (8, 5),
            (9, 10),
            (10, 5),
        ]
    );
    assert_eq!(summary.count("NextBip"), 11);

    assert_targets(&store, NextBipT, 4, &[3, 4, 5, 6, 7, 8, 9, 10]);
    // started in `log`: returns along the recorded branch-back edge
    assert_targets(&store, NextBipT, 10, &[3, 4, 5, 6, 7, 8, 9, 10]);
    assert_targets(&store, NextBipT, 6, &[]);
}

// EDGE CASE: the start statement belongs to NextBipT only when revisited
#[test]
fn test_self_relation_needs_revisit() {
    let (store, _) = run_full(&linear_call_chain());
    assert!(!store.contains(NextBipT, 1, 1));

    let (store, _) = run_full(&accumulator());
    assert!(store.contains(NextBipT, 4, 4));
    assert!(!store.contains(NextBipT, 1, 1));
}

#[test]
fn test_call_free_program_matches_next_t() {
    let (store, _) = run_full(&data_flow_chain());
    assert_eq!(store.pairs(NextBip), store.pairs(Next));
    assert_eq!(store.pairs(NextBipT), store.pairs(NextT));
}

#[test]
fn test_next_bip_disabled() {
    let config = PipelineConfig::preset(Preset::Full).next_bip(false);
    let (store, summary) = run_with(&multi_caller(), &config);

    assert_eq!(store.count(NextBip), 0);
    assert_eq!(store.count(NextBipT), 0);
    assert!(summary.relation_counts.contains_key("AffectsBip"));
}
