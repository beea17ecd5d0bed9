//! NextBip / NextBipT
//!
//! `NextBip` is the CFGBip edge set. `NextBipT` cannot be plain reachability
//! over CFGBip: branch-back edges would let control return to a caller it
//! never came from. The traversal instead carries a return-address stack and
//! follows branch-back edges only when that stack is empty, i.e. when the
//! walk started inside the procedure that is returning.
//!
//! Work items are `(statement, return stack, hops left)`, expanded
//! breadth-first. Two bounds keep the walk finite:
//!
//! - hops left: starts at the total number of `(statement, stack)` states the
//!   walk can reach, minus one; for a program without calls that is N-1.
//! - visit limit per statement: the number of distinct return stacks its
//!   procedure can be active under, `1 + Σ limit(caller)` over its call
//!   sites. A statement is expanded at most that many times.
//!
//! Both bounds are upper bounds on the state space, so they never cut a real
//! path short. `(statement, stack)` states are also deduplicated exactly.

use rustc_hash::FxHashSet;
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::rc::Rc;
use tracing::{debug, trace};

use crate::features::call_graph::{CallGraph, TopoOrder};
use crate::features::cfg_bip::domain::CfgBip;
use crate::features::flow_graph::Cfg;
use crate::shared::models::{StatementTable, StmtIndex, StmtType, SuccessorMap};

// ═══════════════════════════════════════════════════════════════════════════
// Return stack
// ═══════════════════════════════════════════════════════════════════════════

/// Immutable linked stack of return addresses, shared between work items
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
struct ReturnStack(Option<Rc<Frame>>);

#[derive(Debug, PartialEq, Eq, Hash)]
struct Frame {
    site: StmtIndex,
    below: ReturnStack,
}

impl ReturnStack {
    fn push(&self, site: StmtIndex) -> Self {
        ReturnStack(Some(Rc::new(Frame {
            site,
            below: self.clone(),
        })))
    }

    fn pop(&self) -> Option<(StmtIndex, ReturnStack)> {
        self.0
            .as_ref()
            .map(|frame| (frame.site, frame.below.clone()))
    }
}

#[derive(Debug)]
struct WorkItem {
    stmt: StmtIndex,
    stack: ReturnStack,
    hops_left: usize,
}

// ═══════════════════════════════════════════════════════════════════════════
// Traversal
// ═══════════════════════════════════════════════════════════════════════════

/// `NextBip(a, b)` pairs: the CFGBip edges, branch-back edges included
pub fn next_bip_pairs(bip: &CfgBip) -> Vec<(StmtIndex, StmtIndex)> {
    bip.graph().edges().collect()
}

/// Call-stack-aware walker over CFGBip
#[derive(Debug)]
pub struct NextBipTraversal<'a> {
    table: &'a StatementTable,
    cfg: &'a Cfg,
    bip: &'a CfgBip,
    /// Indexed by statement; slot 0 unused
    visit_limits: Vec<usize>,
    hop_budget: usize,
}

impl<'a> NextBipTraversal<'a> {
    pub fn new(
        table: &'a StatementTable,
        cfg: &'a Cfg,
        bip: &'a CfgBip,
        calls: &CallGraph,
        order: &TopoOrder,
    ) -> Self {
        let contexts = context_counts(table, calls, order);

        let mut visit_limits = vec![0; table.len() + 1];
        for range in table.procedures() {
            let limit = contexts.get(&range.name).copied().unwrap_or(1);
            for stmt in range.statements() {
                visit_limits[stmt] = limit;
            }
        }
        let hop_budget = visit_limits.iter().sum::<usize>().saturating_sub(1);

        Self {
            table,
            cfg,
            bip,
            visit_limits,
            hop_budget,
        }
    }

    pub fn visit_limit(&self, stmt: StmtIndex) -> usize {
        self.visit_limits.get(stmt).copied().unwrap_or(0)
    }

    pub fn hop_budget(&self) -> usize {
        self.hop_budget
    }

    /// Every statement reachable from `from` in one or more steps
    pub fn reachable_from(&self, from: StmtIndex) -> BTreeSet<StmtIndex> {
        let mut reached = BTreeSet::new();
        if self.visit_limit(from) == 0 {
            return reached;
        }

        let mut visits = vec![0usize; self.visit_limits.len()];
        let mut seen: FxHashSet<(StmtIndex, ReturnStack)> = FxHashSet::default();

        seen.insert((from, ReturnStack::default()));
        visits[from] = 1;
        let mut queue = VecDeque::from([WorkItem {
            stmt: from,
            stack: ReturnStack::default(),
            hops_left: self.hop_budget,
        }]);

        while let Some(item) = queue.pop_front() {
            for (next, stack) in self.transitions(item.stmt, &item.stack) {
                reached.insert(next);

                if item.hops_left == 0 || visits[next] >= self.visit_limits[next] {
                    continue;
                }
                if seen.insert((next, stack.clone())) {
                    visits[next] += 1;
                    queue.push_back(WorkItem {
                        stmt: next,
                        stack,
                        hops_left: item.hops_left - 1,
                    });
                }
            }
        }

        trace!(from, reached = reached.len(), states = seen.len(), "NextBipT source done");
        reached
    }

    /// Successor states of `stmt` under `stack`
    fn transitions(&self, stmt: StmtIndex, stack: &ReturnStack) -> Vec<(StmtIndex, ReturnStack)> {
        let mut out = Vec::new();

        match self.table.stmt_type(stmt) {
            Some(StmtType::Call) => {
                let inner = match self.bip.return_site(stmt) {
                    Some(site) => stack.push(site),
                    None => stack.clone(),
                };
                for &entry in self.bip.successors(stmt) {
                    out.push((entry, inner.clone()));
                }
            }
            Some(stmt_type) if self.bip.is_local_exit(stmt) => {
                match stack.pop() {
                    Some((site, below)) => out.push((site, below)),
                    None => out.extend(
                        self.bip
                            .branch_back_targets(stmt)
                            .map(|target| (target, ReturnStack::default())),
                    ),
                }
                if stmt_type == StmtType::While {
                    for &body in self.cfg.successors(stmt) {
                        out.push((body, stack.clone()));
                    }
                }
            }
            _ => {
                for &next in self.cfg.successors(stmt) {
                    out.push((next, stack.clone()));
                }
            }
        }

        out
    }
}

/// Number of distinct return stacks each procedure can run under
///
/// Callers first: a procedure's count is one (the empty stack) plus the
/// count of the procedure owning each of its call sites.
fn context_counts(
    table: &StatementTable,
    calls: &CallGraph,
    order: &TopoOrder,
) -> HashMap<String, usize> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for procedure in order.callers_first() {
        let inherited: usize = calls
            .call_sites_of(procedure)
            .iter()
            .filter_map(|&site| table.procedure_of(site))
            .map(|caller| counts.get(&caller.name).copied().unwrap_or(1))
            .sum();
        counts.insert(procedure.clone(), 1 + inherited);
    }

    counts
}

/// `NextBipT` for every statement
pub fn compute_next_bip_t(traversal: &NextBipTraversal<'_>) -> SuccessorMap {
    let mut next_bip_t = SuccessorMap::new();

    for from in traversal.table.statements() {
        let reached = traversal.reachable_from(from);
        if !reached.is_empty() {
            next_bip_t.insert(from, reached);
        }
    }

    debug!(
        pairs = next_bip_t.values().map(|r| r.len()).sum::<usize>(),
        hop_budget = traversal.hop_budget,
        "NextBipT computed"
    );
    next_bip_t
}
