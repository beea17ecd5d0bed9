//! pkb-store - Relation store for SIMPLE program analysis
//!
//! > Write once per run, read many times by the query evaluator.
//!
//! ## Core Principles
//!
//! 1. **Write-only during a run**: the analysis pipeline inserts tuples, nothing reads them yet
//! 2. **Exactly once**: every true tuple is inserted a single time; duplicates are errors
//! 3. **Read-only afterwards**: `seal()` closes the write side
//!
//! ## Usage
//!
//! ```rust
//! use pkb_store::{InMemoryRelationStore, RelationStore, StmtRelation};
//!
//! let mut store = InMemoryRelationStore::new();
//! store.insert_stmt_pair(StmtRelation::Next, 1, 2).unwrap();
//! store.seal();
//!
//! assert_eq!(store.successors(StmtRelation::Next, 1), vec![2]);
//! ```

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::{Result, StoreError};

pub use domain::{
    ProcRelation, RelationSnapshot, RelationStore, StmtIndex, StmtRelation, VarRelation,
};
pub use infrastructure::InMemoryRelationStore;
