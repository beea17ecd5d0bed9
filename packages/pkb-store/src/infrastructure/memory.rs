//! In-memory relation store
//!
//! Indexed sets with forward and reverse lookup per relation. This is the
//! adapter the query evaluator reads from once a run has sealed it.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Debug;

use crate::domain::{
    ProcRelation, RelationSnapshot, RelationStore, StmtIndex, StmtRelation, VarRelation,
};
use crate::{Result, StoreError};

/// Forward + reverse index over one binary relation
#[derive(Debug, Clone)]
pub struct RelationIndex<L, R> {
    forward: BTreeMap<L, BTreeSet<R>>,
    reverse: BTreeMap<R, BTreeSet<L>>,
    len: usize,
}

impl<L, R> Default for RelationIndex<L, R> {
    fn default() -> Self {
        Self {
            forward: BTreeMap::new(),
            reverse: BTreeMap::new(),
            len: 0,
        }
    }
}

impl<L: Ord + Clone, R: Ord + Clone> RelationIndex<L, R> {
    /// Insert a pair; returns false if it was already present
    pub fn insert(&mut self, left: L, right: R) -> bool {
        let fresh = self
            .forward
            .entry(left.clone())
            .or_default()
            .insert(right.clone());
        if fresh {
            self.reverse.entry(right).or_default().insert(left);
            self.len += 1;
        }
        fresh
    }

    pub fn contains(&self, left: &L, right: &R) -> bool {
        self.forward
            .get(left)
            .map_or(false, |rights| rights.contains(right))
    }

    pub fn rights_of(&self, left: &L) -> Vec<R> {
        self.forward
            .get(left)
            .map(|rights| rights.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn lefts_of(&self, right: &R) -> Vec<L> {
        self.reverse
            .get(right)
            .map(|lefts| lefts.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn pairs(&self) -> Vec<(L, R)> {
        self.forward
            .iter()
            .flat_map(|(left, rights)| rights.iter().map(move |r| (left.clone(), r.clone())))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Indexed in-memory implementation of `RelationStore`
#[derive(Debug, Default)]
pub struct InMemoryRelationStore {
    stmt_pairs: HashMap<StmtRelation, RelationIndex<StmtIndex, StmtIndex>>,
    proc_pairs: HashMap<ProcRelation, RelationIndex<String, String>>,
    stmt_vars: HashMap<VarRelation, RelationIndex<StmtIndex, String>>,
    proc_vars: HashMap<VarRelation, RelationIndex<String, String>>,
    sealed: bool,
}

fn insert_unique<L, R>(
    index: &mut RelationIndex<L, R>,
    relation: impl std::fmt::Display,
    left: L,
    right: R,
) -> Result<()>
where
    L: Ord + Clone + Debug,
    R: Ord + Clone + Debug,
{
    if index.contains(&left, &right) {
        return Err(StoreError::duplicate(relation, (left, right)));
    }
    index.insert(left, right);
    Ok(())
}

impl InMemoryRelationStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Read API (query evaluator side)
    // ═══════════════════════════════════════════════════════════════════════

    pub fn contains(&self, relation: StmtRelation, from: StmtIndex, to: StmtIndex) -> bool {
        self.stmt_pairs
            .get(&relation)
            .map_or(false, |index| index.contains(&from, &to))
    }

    /// Statements `to` with `relation(from, to)`
    pub fn successors(&self, relation: StmtRelation, from: StmtIndex) -> Vec<StmtIndex> {
        self.stmt_pairs
            .get(&relation)
            .map(|index| index.rights_of(&from))
            .unwrap_or_default()
    }

    /// Statements `from` with `relation(from, to)`
    pub fn predecessors(&self, relation: StmtRelation, to: StmtIndex) -> Vec<StmtIndex> {
        self.stmt_pairs
            .get(&relation)
            .map(|index| index.lefts_of(&to))
            .unwrap_or_default()
    }

    pub fn pairs(&self, relation: StmtRelation) -> Vec<(StmtIndex, StmtIndex)> {
        self.stmt_pairs
            .get(&relation)
            .map(RelationIndex::pairs)
            .unwrap_or_default()
    }

    pub fn count(&self, relation: StmtRelation) -> usize {
        self.stmt_pairs.get(&relation).map_or(0, RelationIndex::len)
    }

    pub fn callees(&self, relation: ProcRelation, caller: &str) -> Vec<String> {
        self.proc_pairs
            .get(&relation)
            .map(|index| index.rights_of(&caller.to_string()))
            .unwrap_or_default()
    }

    pub fn callers(&self, relation: ProcRelation, callee: &str) -> Vec<String> {
        self.proc_pairs
            .get(&relation)
            .map(|index| index.lefts_of(&callee.to_string()))
            .unwrap_or_default()
    }

    pub fn stmt_vars_of(&self, relation: VarRelation, stmt: StmtIndex) -> Vec<String> {
        self.stmt_vars
            .get(&relation)
            .map(|index| index.rights_of(&stmt))
            .unwrap_or_default()
    }

    pub fn proc_vars_of(&self, relation: VarRelation, proc_name: &str) -> Vec<String> {
        self.proc_vars
            .get(&relation)
            .map(|index| index.rights_of(&proc_name.to_string()))
            .unwrap_or_default()
    }

    /// Sorted copy of every tuple
    pub fn snapshot(&self) -> RelationSnapshot {
        fn collect<K: Ord + Copy, L: Ord + Clone, R: Ord + Clone>(
            map: &HashMap<K, RelationIndex<L, R>>,
        ) -> BTreeMap<K, Vec<(L, R)>> {
            map.iter()
                .filter(|(_, index)| !index.is_empty())
                .map(|(kind, index)| (*kind, index.pairs()))
                .collect()
        }

        RelationSnapshot {
            stmt_pairs: collect(&self.stmt_pairs),
            proc_pairs: collect(&self.proc_pairs),
            stmt_vars: collect(&self.stmt_vars),
            proc_vars: collect(&self.proc_vars),
        }
    }
}

impl RelationStore for InMemoryRelationStore {
    fn insert_stmt_pair(
        &mut self,
        relation: StmtRelation,
        from: StmtIndex,
        to: StmtIndex,
    ) -> Result<()> {
        if self.sealed {
            return Err(StoreError::sealed(relation));
        }
        let index = self.stmt_pairs.entry(relation).or_default();
        insert_unique(index, relation, from, to)
    }

    fn insert_proc_pair(&mut self, relation: ProcRelation, from: &str, to: &str) -> Result<()> {
        if self.sealed {
            return Err(StoreError::sealed(relation));
        }
        let index = self.proc_pairs.entry(relation).or_default();
        insert_unique(index, relation, from.to_string(), to.to_string())
    }

    fn insert_stmt_var(
        &mut self,
        relation: VarRelation,
        stmt: StmtIndex,
        var: &str,
    ) -> Result<()> {
        if self.sealed {
            return Err(StoreError::sealed(relation));
        }
        let index = self.stmt_vars.entry(relation).or_default();
        insert_unique(index, relation, stmt, var.to_string())
    }

    fn insert_proc_var(
        &mut self,
        relation: VarRelation,
        proc_name: &str,
        var: &str,
    ) -> Result<()> {
        if self.sealed {
            return Err(StoreError::sealed(relation));
        }
        let index = self.proc_vars.entry(relation).or_default();
        insert_unique(index, relation, proc_name.to_string(), var.to_string())
    }

    fn seal(&mut self) {
        self.sealed = true;
    }

    fn is_sealed(&self) -> bool {
        self.sealed
    }
}
