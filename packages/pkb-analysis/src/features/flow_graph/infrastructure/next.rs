//! Next / NextT over the CFG

use tracing::{debug, trace};

use crate::features::flow_graph::domain::Cfg;
use crate::shared::models::{StmtIndex, SuccessorMap};
use crate::shared::utils::reachable_from;

/// `Next(a, b)` pairs: exactly the CFG edges, sorted
pub fn next_pairs(cfg: &Cfg) -> Vec<(StmtIndex, StmtIndex)> {
    cfg.graph().edges().collect()
}

/// `NextT`: one breadth-first search per source statement
///
/// Sources with nothing reachable are left out of the map.
pub fn compute_next_t(cfg: &Cfg) -> SuccessorMap {
    let mut next_t = SuccessorMap::new();

    for from in cfg.graph().statements() {
        let reached = reachable_from(from, |s| cfg.successors(s).iter().copied());
        trace!(from, reached = reached.len(), "NextT source done");
        if !reached.is_empty() {
            next_t.insert(from, reached);
        }
    }

    debug!(
        pairs = next_t.values().map(|r| r.len()).sum::<usize>(),
        "NextT computed"
    );
    next_t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::flow_graph::infrastructure::build_cfg;
    use crate::shared::models::{ProgramBuilder, StatementTable};
    use std::collections::BTreeSet;

    fn set(items: &[usize]) -> BTreeSet<usize> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_next_t_loop_includes_self() {
        let program = ProgramBuilder::new()
            .procedure("p", |b| {
                b.read("x"); // 1
                b.while_loop(&["x"], |w| {
                    // 2
                    w.assign("x", &["x"]); // 3
                });
                b.print("x"); // 4
            })
            .build();
        let table = StatementTable::build(&program).unwrap();
        let cfg = build_cfg(&program, &table);

        assert_eq!(next_pairs(&cfg), vec![(1, 2), (2, 3), (2, 4), (3, 2)]);

        let next_t = compute_next_t(&cfg);
        assert_eq!(next_t[&1], set(&[2, 3, 4]));
        assert_eq!(next_t[&2], set(&[2, 3, 4]));
        assert_eq!(next_t[&3], set(&[2, 3, 4]));
        assert!(!next_t.contains_key(&4));
    }

    // EDGE CASE: straight-line code never relates a statement to itself
    #[test]
    fn test_next_t_without_loop_excludes_self() {
        let program = ProgramBuilder::new()
            .procedure("p", |b| {
                b.read("x"); // 1
                b.print("x"); // 2
                b.print("y"); // 3
            })
            .procedure("q", |b| {
                b.print("z"); // 4
            })
            .build();
        let table = StatementTable::build(&program).unwrap();
        let cfg = build_cfg(&program, &table);
        let next_t = compute_next_t(&cfg);

        assert_eq!(next_t[&1], set(&[2, 3]));
        assert_eq!(next_t[&2], set(&[3]));
        assert!(next_t.values().flatten().all(|&s| s != 4));
        assert!(next_t.iter().all(|(from, reached)| !reached.contains(from)));
    }
}
