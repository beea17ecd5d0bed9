//! Property-based checks over generated non-recursive programs
//!
//! Procedure `pK` may only call `pJ` with `J > K`, so every generated program
//! has an acyclic call graph.

#[path = "../common/mod.rs"]
mod common;

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use common::*;
use pkb_analysis::shared::models::{walk_stmts, BodyBuilder};
use pkb_analysis::{Program, ProgramBuilder, StmtKind};
use pkb_store::{ProcRelation, StmtRelation};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Shape {
    Read(&'static str),
    Print(&'static str),
    Assign(&'static str, Vec<&'static str>),
    Call(u8),
    If(Vec<Shape>, Vec<Shape>),
    While(Vec<Shape>),
}

const VARS: &[&str] = &["a", "b", "c"];

fn var() -> impl Strategy<Value = &'static str> {
    prop::sample::select(VARS)
}

fn shape() -> impl Strategy<Value = Shape> {
    let leaf = prop_oneof![
        var().prop_map(Shape::Read),
        var().prop_map(Shape::Print),
        (var(), prop::collection::vec(var(), 0..3)).prop_map(|(t, u)| Shape::Assign(t, u)),
        any::<u8>().prop_map(Shape::Call),
    ];
    leaf.prop_recursive(3, 24, 3, |inner| {
        prop_oneof![
            (
                prop::collection::vec(inner.clone(), 1..3),
                prop::collection::vec(inner.clone(), 1..3)
            )
                .prop_map(|(t, e)| Shape::If(t, e)),
            prop::collection::vec(inner, 1..3).prop_map(Shape::While),
        ]
    })
}

fn bodies() -> impl Strategy<Value = Vec<Vec<Shape>>> {
    prop::collection::vec(prop::collection::vec(shape(), 1..4), 1..4)
}

fn proc_name(index: usize) -> String {
    format!("p{}", index)
}

fn emit(b: &mut BodyBuilder<'_>, shapes: &[Shape], proc: usize, procs: usize, calls: bool) {
    for shape in shapes {
        match shape {
            Shape::Read(v) => {
                b.read(v);
            }
            Shape::Print(v) => {
                b.print(v);
            }
            Shape::Assign(target, uses) => {
                b.assign(target, uses);
            }
            Shape::Call(k) if calls && proc + 1 < procs => {
                let target = proc + 1 + (*k as usize) % (procs - proc - 1);
                b.call(&proc_name(target));
            }
            Shape::Call(_) => {
                b.read("a");
            }
            Shape::If(then_shapes, else_shapes) => {
                b.if_else(
                    &["a"],
                    |t| emit(t, then_shapes, proc, procs, calls),
                    |e| emit(e, else_shapes, proc, procs, calls),
                );
            }
            Shape::While(body) => {
                b.while_loop(&["b"], |w| emit(w, body, proc, procs, calls));
            }
        }
    }
}

fn build(bodies: &[Vec<Shape>], calls: bool) -> Program {
    let procs = bodies.len();
    let mut builder = ProgramBuilder::new();
    for (index, body) in bodies.iter().enumerate() {
        builder = builder.procedure(&proc_name(index), |b| emit(b, body, index, procs, calls));
    }
    builder.build()
}

/// Owning procedure of every statement
fn owners(program: &Program) -> BTreeMap<usize, String> {
    let mut owners = BTreeMap::new();
    for procedure in &program.procedures {
        walk_stmts(&procedure.body, &mut |stmt| {
            owners.insert(stmt.index, procedure.name.clone());
        });
    }
    owners
}

fn call_stmts(program: &Program) -> Vec<usize> {
    let mut calls = Vec::new();
    for procedure in &program.procedures {
        walk_stmts(&procedure.body, &mut |stmt| {
            if matches!(stmt.kind, StmtKind::Call { .. }) {
                calls.push(stmt.index);
            }
        });
    }
    calls
}

/// Breadth-first closure of a pair list; sources without targets are omitted
fn closure<T: Ord + Clone>(pairs: &[(T, T)]) -> BTreeMap<T, BTreeSet<T>> {
    let mut adjacency: BTreeMap<T, Vec<T>> = BTreeMap::new();
    for (from, to) in pairs {
        adjacency.entry(from.clone()).or_default().push(to.clone());
    }

    let mut result = BTreeMap::new();
    for source in adjacency.keys() {
        let mut seen = BTreeSet::new();
        let mut queue: VecDeque<T> = adjacency[source].iter().cloned().collect();
        while let Some(node) = queue.pop_front() {
            if seen.insert(node.clone()) {
                if let Some(next) = adjacency.get(&node) {
                    queue.extend(next.iter().cloned());
                }
            }
        }
        result.insert(source.clone(), seen);
    }
    result
}

fn as_pairs<T: Clone>(map: &BTreeMap<T, BTreeSet<T>>) -> Vec<(T, T)> {
    map.iter()
        .flat_map(|(from, targets)| targets.iter().map(move |to| (from.clone(), to.clone())))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_next_t_is_closure_of_next(shapes in bodies()) {
        let program = build(&shapes, true);
        let (store, _) = run_full(&program);

        let expected = as_pairs(&closure(&store.pairs(StmtRelation::Next)));
        prop_assert_eq!(store.pairs(StmtRelation::NextT), expected);
    }

    #[test]
    fn prop_next_stays_in_procedure(shapes in bodies()) {
        let program = build(&shapes, true);
        let owners = owners(&program);
        let (store, _) = run_full(&program);

        for (from, to) in store.pairs(StmtRelation::Next) {
            prop_assert_eq!(&owners[&from], &owners[&to]);
        }
        for (from, to) in store.pairs(StmtRelation::Affects) {
            prop_assert_eq!(&owners[&from], &owners[&to]);
        }
    }

    #[test]
    fn prop_calls_t_is_closure_without_self(shapes in bodies()) {
        let program = build(&shapes, true);
        let (store, summary) = run_full(&program);

        let mut calls = Vec::new();
        for procedure in &program.procedures {
            for callee in store.callees(ProcRelation::Calls, &procedure.name) {
                calls.push((procedure.name.clone(), callee));
            }
        }
        let expected = closure(&calls);
        let mut written = 0;
        for procedure in &program.procedures {
            let actual: BTreeSet<String> = store
                .callees(ProcRelation::CallsT, &procedure.name)
                .into_iter()
                .collect();
            prop_assert!(!actual.contains(&procedure.name));
            prop_assert_eq!(&actual, &expected.get(&procedure.name).cloned().unwrap_or_default());
            written += actual.len();
        }
        prop_assert_eq!(summary.count("CallsT"), written);
    }

    #[test]
    fn prop_every_call_has_one_next_bip_successor(shapes in bodies()) {
        let program = build(&shapes, true);
        let (store, _) = run_full(&program);

        for stmt in call_stmts(&program) {
            prop_assert_eq!(store.successors(StmtRelation::NextBip, stmt).len(), 1);
        }
    }

    #[test]
    fn prop_fresh_runs_are_identical(shapes in bodies()) {
        let program = build(&shapes, true);
        let (first, _) = run_full(&program);
        let (second, _) = run_full(&program);
        prop_assert_eq!(first.snapshot(), second.snapshot());
    }

    #[test]
    fn prop_call_free_bip_matches_intraprocedural(shapes in bodies()) {
        let program = build(&shapes, false);
        let (store, _) = run_full(&program);

        prop_assert_eq!(store.pairs(StmtRelation::NextBip), store.pairs(StmtRelation::Next));
        prop_assert_eq!(store.pairs(StmtRelation::NextBipT), store.pairs(StmtRelation::NextT));
        prop_assert_eq!(store.pairs(StmtRelation::AffectsBip), store.pairs(StmtRelation::Affects));
        prop_assert_eq!(store.pairs(StmtRelation::AffectsBipT), store.pairs(StmtRelation::AffectsT));
    }
}
