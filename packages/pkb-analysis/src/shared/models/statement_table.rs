//! Statement numbering table
//!
//! Reads the 1..N numbering the parser attached to the AST and indexes it:
//! statement kind, owning procedure, direct variable reads/writes and call
//! targets per statement, plus the contiguous `[lo, hi]` range of each
//! procedure. Every later stage looks statements up here instead of walking
//! the AST again.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use pkb_store::StmtIndex;

use super::error::{AnalysisError, Result};
use super::program::{walk_stmts, Program, Stmt, StmtKind};

/// Statement kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StmtType {
    Read,
    Print,
    Assign,
    If,
    While,
    Call,
}

impl StmtType {
    pub fn of(kind: &StmtKind) -> Self {
        match kind {
            StmtKind::Read { .. } => StmtType::Read,
            StmtKind::Print { .. } => StmtType::Print,
            StmtKind::Assign { .. } => StmtType::Assign,
            StmtKind::If { .. } => StmtType::If,
            StmtKind::While { .. } => StmtType::While,
            StmtKind::Call { .. } => StmtType::Call,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, StmtType::If | StmtType::While)
    }
}

/// Contiguous statement range of one procedure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcRange {
    pub name: String,
    pub lo: StmtIndex,
    pub hi: StmtIndex,
}

impl ProcRange {
    pub fn contains(&self, stmt: StmtIndex) -> bool {
        (self.lo..=self.hi).contains(&stmt)
    }

    pub fn statements(&self) -> std::ops::RangeInclusive<StmtIndex> {
        self.lo..=self.hi
    }
}

/// Per-statement facts read straight off the AST
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StmtInfo {
    pub stmt_type: StmtType,
    /// Index into `StatementTable::procedures`
    pub procedure: usize,
    /// Variable written by this statement itself (read / assign)
    pub writes: Option<String>,
    /// Variables read by this statement itself (expression or condition)
    pub reads: BTreeSet<String>,
    pub callee: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatementTable {
    /// Index 0 is an unused sentinel
    infos: Vec<Option<StmtInfo>>,
    procedures: Vec<ProcRange>,
    #[serde(skip)]
    proc_index: HashMap<String, usize>,
}

impl StatementTable {
    /// Index and validate the numbering of `program`
    ///
    /// Rejects: empty procedures or statement lists, duplicate procedure
    /// names, numbering that is not exactly 1..N in textual order, and calls
    /// to procedures that do not exist.
    pub fn build(program: &Program) -> Result<Self> {
        let mut infos: Vec<Option<StmtInfo>> = vec![None];
        let mut procedures = Vec::with_capacity(program.procedures.len());
        let mut proc_index = HashMap::new();

        for (proc_idx, procedure) in program.procedures.iter().enumerate() {
            if proc_index
                .insert(procedure.name.clone(), proc_idx)
                .is_some()
            {
                return Err(AnalysisError::invalid_program("duplicate procedure name")
                    .with_procedure(procedure.name.as_str()));
            }
            if procedure.body.is_empty() {
                return Err(AnalysisError::invalid_program("procedure has no statements")
                    .with_procedure(procedure.name.as_str()));
            }

            let lo = infos.len();
            let mut violation: Option<AnalysisError> = None;
            walk_stmts(&procedure.body, &mut |stmt: &Stmt| {
                if violation.is_some() {
                    return;
                }
                let expected = infos.len();
                if stmt.index != expected {
                    violation = Some(
                        AnalysisError::invalid_program(format!(
                            "statement numbered {} where {} was expected",
                            stmt.index, expected
                        ))
                        .with_stmt(stmt.index),
                    );
                    return;
                }
                if let Some(message) = empty_body(&stmt.kind) {
                    violation = Some(AnalysisError::invalid_program(message).with_stmt(stmt.index));
                    return;
                }
                infos.push(Some(stmt_info(&stmt.kind, proc_idx)));
            });
            if let Some(err) = violation {
                return Err(err.with_procedure(procedure.name.as_str()));
            }

            procedures.push(ProcRange {
                name: procedure.name.clone(),
                lo,
                hi: infos.len() - 1,
            });
        }

        for (stmt, info) in infos.iter().enumerate() {
            if let Some(callee) = info.as_ref().and_then(|i| i.callee.as_ref()) {
                if !proc_index.contains_key(callee) {
                    return Err(AnalysisError::invalid_program(format!(
                        "call to unknown procedure '{}'",
                        callee
                    ))
                    .with_stmt(stmt));
                }
            }
        }

        Ok(Self {
            infos,
            procedures,
            proc_index,
        })
    }

    /// Number of statements N
    pub fn len(&self) -> usize {
        self.infos.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All statement indices, 1..=N
    pub fn statements(&self) -> std::ops::RangeInclusive<StmtIndex> {
        1..=self.len()
    }

    pub fn info(&self, stmt: StmtIndex) -> Option<&StmtInfo> {
        self.infos.get(stmt).and_then(Option::as_ref)
    }

    pub fn stmt_type(&self, stmt: StmtIndex) -> Option<StmtType> {
        self.info(stmt).map(|i| i.stmt_type)
    }

    pub fn is_type(&self, stmt: StmtIndex, stmt_type: StmtType) -> bool {
        self.stmt_type(stmt) == Some(stmt_type)
    }

    pub fn stmts_of_type(&self, stmt_type: StmtType) -> impl Iterator<Item = StmtIndex> + '_ {
        self.statements()
            .filter(move |&s| self.is_type(s, stmt_type))
    }

    pub fn callee_of(&self, stmt: StmtIndex) -> Option<&str> {
        self.info(stmt).and_then(|i| i.callee.as_deref())
    }

    pub fn procedures(&self) -> &[ProcRange] {
        &self.procedures
    }

    pub fn range(&self, procedure: &str) -> Option<&ProcRange> {
        self.proc_index
            .get(procedure)
            .map(|&idx| &self.procedures[idx])
    }

    /// First statement of `procedure`
    pub fn entry(&self, procedure: &str) -> Option<StmtIndex> {
        self.range(procedure).map(|r| r.lo)
    }

    pub fn procedure_of(&self, stmt: StmtIndex) -> Option<&ProcRange> {
        self.info(stmt).map(|i| &self.procedures[i.procedure])
    }
}

fn empty_body(kind: &StmtKind) -> Option<&'static str> {
    match kind {
        StmtKind::While { body, .. } if body.is_empty() => Some("while statement with empty body"),
        StmtKind::If {
            then_body,
            else_body,
            ..
        } if then_body.is_empty() || else_body.is_empty() => {
            Some("if statement with an empty branch")
        }
        _ => None,
    }
}

fn stmt_info(kind: &StmtKind, procedure: usize) -> StmtInfo {
    let (writes, reads, callee) = match kind {
        StmtKind::Read { var } => (Some(var.clone()), BTreeSet::new(), None),
        StmtKind::Print { var } => (None, BTreeSet::from([var.clone()]), None),
        StmtKind::Assign { target, uses } => (Some(target.clone()), uses.clone(), None),
        StmtKind::If { cond_uses, .. } | StmtKind::While { cond_uses, .. } => {
            (None, cond_uses.clone(), None)
        }
        StmtKind::Call { callee } => (None, BTreeSet::new(), Some(callee.clone())),
    };
    StmtInfo {
        stmt_type: StmtType::of(kind),
        procedure,
        writes,
        reads,
        callee,
    }
}
