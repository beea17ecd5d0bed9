//! Domain layer for the relation store
//!
//! # Domain Models
//!
//! - `StmtRelation`: statement × statement relations (Next*, Affects*)
//! - `ProcRelation`: procedure × procedure relations (Calls, CallsT)
//! - `VarRelation`: statement/procedure × variable relations (Modifies, Uses)
//! - `RelationSnapshot`: serializable copy of every stored tuple
//!
//! # Port Trait
//!
//! - `RelationStore`: write side used by the analysis pipeline
//!
//! The store is write-only while a pipeline run populates it and read-only
//! after `seal()`. Every true tuple is inserted exactly once.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::Result;

/// Global statement number (1..N, unique across the program)
pub type StmtIndex = usize;

// ═══════════════════════════════════════════════════════════════════════════
// Relation Vocabulary
// ═══════════════════════════════════════════════════════════════════════════

/// Relations between two statements
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StmtRelation {
    Next,
    NextT,
    NextBip,
    NextBipT,
    Affects,
    AffectsT,
    AffectsBip,
    AffectsBipT,
}

impl StmtRelation {
    pub const ALL: [StmtRelation; 8] = [
        StmtRelation::Next,
        StmtRelation::NextT,
        StmtRelation::NextBip,
        StmtRelation::NextBipT,
        StmtRelation::Affects,
        StmtRelation::AffectsT,
        StmtRelation::AffectsBip,
        StmtRelation::AffectsBipT,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StmtRelation::Next => "Next",
            StmtRelation::NextT => "NextT",
            StmtRelation::NextBip => "NextBip",
            StmtRelation::NextBipT => "NextBipT",
            StmtRelation::Affects => "Affects",
            StmtRelation::AffectsT => "AffectsT",
            StmtRelation::AffectsBip => "AffectsBip",
            StmtRelation::AffectsBipT => "AffectsBipT",
        }
    }
}

impl fmt::Display for StmtRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relations between two procedures
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProcRelation {
    Calls,
    CallsT,
}

impl ProcRelation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcRelation::Calls => "Calls",
            ProcRelation::CallsT => "CallsT",
        }
    }
}

impl fmt::Display for ProcRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relations between a statement or procedure and a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VarRelation {
    Modifies,
    Uses,
}

impl VarRelation {
    pub fn as_str(&self) -> &'static str {
        match self {
            VarRelation::Modifies => "Modifies",
            VarRelation::Uses => "Uses",
        }
    }
}

impl fmt::Display for VarRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Snapshot
// ═══════════════════════════════════════════════════════════════════════════

/// Every tuple held by a store, in sorted order
///
/// Two runs over the same program produce equal snapshots, which makes the
/// snapshot the unit of comparison for fixtures and regression tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationSnapshot {
    #[serde(default)]
    pub stmt_pairs: BTreeMap<StmtRelation, Vec<(StmtIndex, StmtIndex)>>,
    #[serde(default)]
    pub proc_pairs: BTreeMap<ProcRelation, Vec<(String, String)>>,
    #[serde(default)]
    pub stmt_vars: BTreeMap<VarRelation, Vec<(StmtIndex, String)>>,
    #[serde(default)]
    pub proc_vars: BTreeMap<VarRelation, Vec<(String, String)>>,
}

impl RelationSnapshot {
    /// Total number of tuples across all relations
    pub fn tuple_count(&self) -> usize {
        self.stmt_pairs.values().map(Vec::len).sum::<usize>()
            + self.proc_pairs.values().map(Vec::len).sum::<usize>()
            + self.stmt_vars.values().map(Vec::len).sum::<usize>()
            + self.proc_vars.values().map(Vec::len).sum::<usize>()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Write the snapshot as pretty JSON
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn read_json(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Port Trait: RelationStore
// ═══════════════════════════════════════════════════════════════════════════

/// Write side of the relation store
///
/// The analysis pipeline inserts each true tuple once and then calls
/// `seal()`. Implementations reject duplicates and post-seal writes.
pub trait RelationStore {
    fn insert_stmt_pair(
        &mut self,
        relation: StmtRelation,
        from: StmtIndex,
        to: StmtIndex,
    ) -> Result<()>;

    fn insert_proc_pair(&mut self, relation: ProcRelation, from: &str, to: &str) -> Result<()>;

    fn insert_stmt_var(&mut self, relation: VarRelation, stmt: StmtIndex, var: &str)
        -> Result<()>;

    fn insert_proc_var(&mut self, relation: VarRelation, proc_name: &str, var: &str)
        -> Result<()>;

    /// Make the store read-only
    fn seal(&mut self);

    fn is_sealed(&self) -> bool;
}
