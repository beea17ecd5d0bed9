//! Graph explosion: one context-sensitive execution graph per root procedure

pub mod domain;
pub mod infrastructure;

pub use domain::{ExplodedGraph, ExplodedNode, ExplodedNodeId};
pub use infrastructure::explode_program;
