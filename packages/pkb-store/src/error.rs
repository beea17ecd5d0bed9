//! Error types for pkb-store

use std::fmt;
use thiserror::Error;

/// Store error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A tuple was inserted a second time
    DuplicateTuple,
    /// Write attempted after the store became read-only
    Sealed,
    /// Serialization/deserialization errors
    Serialization,
    /// I/O errors
    IO,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::DuplicateTuple => "duplicate_tuple",
            ErrorKind::Sealed => "sealed",
            ErrorKind::Serialization => "serialization",
            ErrorKind::IO => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Store error type
#[derive(Debug, Error)]
#[error("[{kind}] {message}")]
pub struct StoreError {
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
    pub kind: ErrorKind,
    pub message: String,
}

impl StoreError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn duplicate(relation: impl fmt::Display, tuple: impl fmt::Debug) -> Self {
        Self::new(
            ErrorKind::DuplicateTuple,
            format!("{} tuple {:?} inserted twice", relation, tuple),
        )
    }

    pub fn sealed(relation: impl fmt::Display) -> Self {
        Self::new(
            ErrorKind::Sealed,
            format!("store is read-only, rejected {} insert", relation),
        )
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IO, message)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::serialization(format!("JSON error: {}", err)).with_source(err)
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::io(format!("I/O error: {}", err)).with_source(err)
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, StoreError>;
