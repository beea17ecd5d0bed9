//! Error types for the pkb-analysis crate
//!
//! Every failure of a run is fatal: there is no best-effort mode. Errors are
//! categorised by the stage contract they violate.

use std::fmt;

use pkb_store::StoreError;

use crate::config::ConfigError;

/// Error kind categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A stage ran before its input graph was built
    NotYetConstructed,
    /// The call graph contains a cycle (recursion)
    CyclicCallGraph,
    /// Malformed input AST (numbering, unknown callee, empty bodies)
    InvalidProgram,
    /// Configuration errors
    Config,
    /// Relation store rejected a write
    Store,
    /// Internal errors (bugs)
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotYetConstructed => "not_yet_constructed",
            ErrorKind::CyclicCallGraph => "cyclic_call_graph",
            ErrorKind::InvalidProgram => "invalid_program",
            ErrorKind::Config => "config",
            ErrorKind::Store => "store",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Unified error type
#[derive(Debug)]
pub struct AnalysisError {
    pub kind: ErrorKind,
    pub message: String,
    pub procedure: Option<String>,
    pub stmt: Option<usize>,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AnalysisError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            procedure: None,
            stmt: None,
            source: None,
        }
    }

    pub fn with_procedure(mut self, procedure: impl Into<String>) -> Self {
        self.procedure = Some(procedure.into());
        self
    }

    pub fn with_stmt(mut self, stmt: usize) -> Self {
        self.stmt = Some(stmt);
        self
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn not_yet_constructed(what: &str) -> Self {
        Self::new(
            ErrorKind::NotYetConstructed,
            format!("{} has not been constructed yet", what),
        )
    }

    pub fn cyclic_call_graph(cycles: &[Vec<String>]) -> Self {
        let rendered: Vec<String> = cycles.iter().map(|cycle| cycle.join(" -> ")).collect();
        Self::new(
            ErrorKind::CyclicCallGraph,
            format!("recursive calls are not supported: {}", rendered.join("; ")),
        )
    }

    pub fn invalid_program(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidProgram, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)?;
        if let Some(ref procedure) = self.procedure {
            write!(f, " in procedure '{}'", procedure)?;
        }
        if let Some(stmt) = self.stmt {
            write!(f, " at statement {}", stmt)?;
        }
        Ok(())
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<StoreError> for AnalysisError {
    fn from(err: StoreError) -> Self {
        AnalysisError::new(ErrorKind::Store, format!("relation store error: {}", err))
            .with_source(err)
    }
}

impl From<ConfigError> for AnalysisError {
    fn from(err: ConfigError) -> Self {
        AnalysisError::new(ErrorKind::Config, err.to_string()).with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, AnalysisError>;
