//! CallsT closure
//!
//! Descendant sets are filled callees-first, so each procedure's set is the
//! union of its direct callees and their (already complete) sets.

use std::collections::{BTreeMap, BTreeSet};

use crate::features::call_graph::domain::{CallGraph, CallsClosure, TopoOrder};

pub fn compute_calls_t(calls: &CallGraph, order: &TopoOrder) -> CallsClosure {
    let mut descendants: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for procedure in order.callees_first() {
        let mut reached = BTreeSet::new();
        for callee in calls.callees(procedure) {
            if let Some(below) = descendants.get(&callee) {
                reached.extend(below.iter().cloned());
            }
            reached.insert(callee);
        }
        descendants.insert(procedure.to_string(), reached);
    }

    CallsClosure { descendants }
}
