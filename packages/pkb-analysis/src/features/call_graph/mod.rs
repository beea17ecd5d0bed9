//! Call graph feature
//!
//! Direct `Calls`, the recursion check with its topological order, and the
//! `CallsT` closure.

pub mod domain;
pub mod infrastructure;

pub use domain::{CallGraph, CallsClosure, TopoOrder};
pub use infrastructure::{build_call_graph, compute_calls_t, topological_order};
