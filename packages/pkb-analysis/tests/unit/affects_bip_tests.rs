//! Affects / AffectsBip through the full pipeline

#[path = "../common/mod.rs"]
mod common;

use common::*;
use pkb_analysis::{PipelineConfig, ProgramBuilder};
use pkb_store::StmtRelation::{Affects, AffectsBip, AffectsBipT, AffectsT};
use pretty_assertions::assert_eq;

#[test]
fn test_data_flow_chain() {
    init_tracing();
    let (store, _) = run_full(&data_flow_chain());

    assert_eq!(store.pairs(Affects), vec![(1, 2), (2, 3), (3, 4), (4, 5)]);
    assert_targets(&store, AffectsT, 1, &[2, 3, 4, 5]);
    assert_targets(&store, AffectsT, 4, &[5]);
    assert_targets(&store, AffectsT, 5, &[]);

    // no calls: the exploded view adds nothing
    assert_eq!(store.pairs(AffectsBip), store.pairs(Affects));
    assert_eq!(store.pairs(AffectsBipT), store.pairs(AffectsT));
}

#[test]
fn test_rotation_across_call_occurrences() {
    let (store, _) = run_full(&rotation());

    assert_targets(&store, AffectsBip, 4, &[7]);
    assert_targets(&store, AffectsBip, 5, &[4]);
    assert_targets(&store, AffectsBip, 6, &[5]);
    assert_targets(&store, AffectsBip, 7, &[6]);

    assert_targets(&store, AffectsBipT, 4, &[5, 6, 7]);
    assert_targets(&store, AffectsBipT, 5, &[4, 6, 7]);
    assert_targets(&store, AffectsBipT, 6, &[4, 5, 7]);
    assert_targets(&store, AffectsBipT, 7, &[5, 6]);

    // a single body sees only the d = a ... c = d link
    assert_eq!(store.pairs(Affects), vec![(4, 7)]);
    assert_eq!(store.pairs(AffectsT), vec![(4, 7)]);
}

#[test]
fn test_definition_flows_into_callee() {
    let program = ProgramBuilder::new()
        .procedure("main", |b| {
            b.assign("x", &[]); // 1
            b.call("g"); // 2
            b.print("y"); // 3
        })
        .procedure("g", |b| {
            b.assign("y", &["x"]); // 4
        })
        .build();
    let (store, _) = run_full(&program);

    assert_targets(&store, AffectsBip, 1, &[4]);
    assert_targets(&store, Affects, 1, &[]);
}

#[test]
fn test_callee_write_kills_and_reaches_caller() {
    let program = ProgramBuilder::new()
        .procedure("main", |b| {
            b.assign("x", &[]); // 1
            b.call("f"); // 2
            b.assign("y", &["x"]); // 3
        })
        .procedure("f", |b| {
            b.assign("x", &[]); // 4
        })
        .build();
    let (store, _) = run_full(&program);

    assert_targets(&store, AffectsBip, 1, &[]);
    assert_targets(&store, AffectsBip, 4, &[3]);
    // the call modifies x, so intraprocedurally 1 is killed as well
    assert_targets(&store, Affects, 1, &[]);
    assert!(!store.contains(Affects, 4, 3));
}

// EDGE CASE: a loop lets an assignment affect itself
#[test]
fn test_loop_self_affects() {
    let (store, _) = run_full(&accumulator());

    assert!(store.contains(Affects, 5, 5));
    assert!(store.contains(AffectsBip, 5, 5));
    assert!(store.contains(AffectsBip, 8, 8));
    assert!(store.contains(AffectsBipT, 8, 8));
}

#[test]
fn test_affects_bip_disabled() {
    let config = PipelineConfig::default().affects_bip(false);
    let (store, summary) = run_with(&rotation(), &config);

    assert_eq!(store.count(AffectsBip), 0);
    assert_eq!(store.count(AffectsBipT), 0);
    assert_eq!(summary.count("Affects"), 1);
    assert!(summary.relation_counts.contains_key("NextBip"));
}
