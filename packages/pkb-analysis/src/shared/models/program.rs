//! SIMPLE program model
//!
//! The parser hands the engine a statement-numbered AST: procedures made of
//! nested statement lists, where every statement carries a permanent index
//! assigned in textual order across the whole program (1..N).
//!
//! Expressions are reduced to the set of variables they read; constants and
//! operators play no part in any relation computed here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use pkb_store::StmtIndex;

/// Whole program, procedures in textual order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub procedures: Vec<Procedure>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Procedure {
    pub name: String,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stmt {
    pub index: StmtIndex,
    pub kind: StmtKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StmtKind {
    Read {
        var: String,
    },
    Print {
        var: String,
    },
    Assign {
        target: String,
        uses: BTreeSet<String>,
    },
    If {
        cond_uses: BTreeSet<String>,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },
    While {
        cond_uses: BTreeSet<String>,
        body: Vec<Stmt>,
    },
    Call {
        callee: String,
    },
}

impl Program {
    pub fn procedure(&self, name: &str) -> Option<&Procedure> {
        self.procedures.iter().find(|p| p.name == name)
    }

    /// Total number of statements, nested ones included
    pub fn statement_count(&self) -> usize {
        let mut count = 0;
        for procedure in &self.procedures {
            walk_stmts(&procedure.body, &mut |_| count += 1);
        }
        count
    }
}

/// Pre-order walk (textual order) over a statement list and its nested lists
pub fn walk_stmts<'a>(stmts: &'a [Stmt], visit: &mut impl FnMut(&'a Stmt)) {
    for stmt in stmts {
        visit(stmt);
        match &stmt.kind {
            StmtKind::If {
                then_body,
                else_body,
                ..
            } => {
                walk_stmts(then_body, visit);
                walk_stmts(else_body, visit);
            }
            StmtKind::While { body, .. } => walk_stmts(body, visit),
            _ => {}
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ProgramBuilder
// ═══════════════════════════════════════════════════════════════════════════

/// Builds a `Program` and numbers statements in textual order
///
/// # Example
///
/// ```rust
/// use pkb_analysis::shared::models::ProgramBuilder;
///
/// let program = ProgramBuilder::new()
///     .procedure("main", |b| {
///         b.assign("x", &["y"]); // 1
///         b.while_loop(&["x"], |body| {
///             // 2
///             body.call("helper"); // 3
///         });
///         b.print("x"); // 4
///     })
///     .procedure("helper", |b| {
///         b.read("y"); // 5
///     })
///     .build();
///
/// assert_eq!(program.statement_count(), 5);
/// ```
#[derive(Debug)]
pub struct ProgramBuilder {
    next_index: StmtIndex,
    procedures: Vec<Procedure>,
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self {
            next_index: 1,
            procedures: Vec::new(),
        }
    }

    pub fn procedure(mut self, name: &str, build: impl FnOnce(&mut BodyBuilder<'_>)) -> Self {
        let mut body = BodyBuilder::new(&mut self.next_index);
        build(&mut body);
        let stmts = body.finish();
        self.procedures.push(Procedure {
            name: name.to_string(),
            body: stmts,
        });
        self
    }

    pub fn build(self) -> Program {
        Program {
            procedures: self.procedures,
        }
    }
}

/// Appends statements to one statement list
#[derive(Debug)]
pub struct BodyBuilder<'a> {
    next_index: &'a mut StmtIndex,
    stmts: Vec<Stmt>,
}

fn var_set(vars: &[&str]) -> BTreeSet<String> {
    vars.iter().map(|v| v.to_string()).collect()
}

impl<'a> BodyBuilder<'a> {
    fn new(next_index: &'a mut StmtIndex) -> Self {
        Self {
            next_index,
            stmts: Vec::new(),
        }
    }

    fn allocate(&mut self) -> StmtIndex {
        let index = *self.next_index;
        *self.next_index += 1;
        index
    }

    fn nested(&mut self, build: impl FnOnce(&mut BodyBuilder<'_>)) -> Vec<Stmt> {
        let mut inner = BodyBuilder::new(&mut *self.next_index);
        build(&mut inner);
        inner.finish()
    }

    fn finish(self) -> Vec<Stmt> {
        self.stmts
    }

    pub fn read(&mut self, var: &str) -> &mut Self {
        let index = self.allocate();
        self.stmts.push(Stmt {
            index,
            kind: StmtKind::Read {
                var: var.to_string(),
            },
        });
        self
    }

    pub fn print(&mut self, var: &str) -> &mut Self {
        let index = self.allocate();
        self.stmts.push(Stmt {
            index,
            kind: StmtKind::Print {
                var: var.to_string(),
            },
        });
        self
    }

    /// `target = <expression over uses>`
    pub fn assign(&mut self, target: &str, uses: &[&str]) -> &mut Self {
        let index = self.allocate();
        self.stmts.push(Stmt {
            index,
            kind: StmtKind::Assign {
                target: target.to_string(),
                uses: var_set(uses),
            },
        });
        self
    }

    pub fn call(&mut self, callee: &str) -> &mut Self {
        let index = self.allocate();
        self.stmts.push(Stmt {
            index,
            kind: StmtKind::Call {
                callee: callee.to_string(),
            },
        });
        self
    }

    pub fn while_loop(
        &mut self,
        cond_uses: &[&str],
        body: impl FnOnce(&mut BodyBuilder<'_>),
    ) -> &mut Self {
        let index = self.allocate();
        let body = self.nested(body);
        self.stmts.push(Stmt {
            index,
            kind: StmtKind::While {
                cond_uses: var_set(cond_uses),
                body,
            },
        });
        self
    }

    pub fn if_else(
        &mut self,
        cond_uses: &[&str],
        then_branch: impl FnOnce(&mut BodyBuilder<'_>),
        else_branch: impl FnOnce(&mut BodyBuilder<'_>),
    ) -> &mut Self {
        let index = self.allocate();
        let then_body = self.nested(then_branch);
        let else_body = self.nested(else_branch);
        self.stmts.push(Stmt {
            index,
            kind: StmtKind::If {
                cond_uses: var_set(cond_uses),
                then_body,
                else_body,
            },
        });
        self
    }
}
