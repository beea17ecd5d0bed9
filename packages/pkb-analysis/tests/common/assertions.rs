//! Store helpers and assertions

use pkb_analysis::{run_pipeline, PipelineConfig, Program, RunSummary};
use pkb_store::{InMemoryRelationStore, StmtRelation};

/// Run the full pipeline into a fresh store
pub fn run_full(program: &Program) -> (InMemoryRelationStore, RunSummary) {
    run_with(program, &PipelineConfig::default())
}

pub fn run_with(program: &Program, config: &PipelineConfig) -> (InMemoryRelationStore, RunSummary) {
    let mut store = InMemoryRelationStore::new();
    let summary = run_pipeline(program, config, &mut store).expect("pipeline run failed");
    (store, summary)
}

/// Assert the exact target list of `relation(from, _)`
pub fn assert_targets(
    store: &InMemoryRelationStore,
    relation: StmtRelation,
    from: usize,
    expected: &[usize],
) {
    let actual = store.successors(relation, from);
    assert_eq!(
        actual, expected,
        "{}({}, _) expected {:?}, got {:?}",
        relation, from, expected, actual
    );
}
