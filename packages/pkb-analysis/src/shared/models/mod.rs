//! Shared models used by every feature

pub mod error;
pub mod program;
pub mod statement_table;
pub mod stmt_graph;

pub use error::{AnalysisError, ErrorKind, Result};
pub use pkb_store::StmtIndex;
pub use program::{walk_stmts, BodyBuilder, Procedure, Program, ProgramBuilder, Stmt, StmtKind};
pub use statement_table::{ProcRange, StatementTable, StmtInfo, StmtType};
pub use stmt_graph::{StmtGraph, SuccessorMap};
