//! Shared algorithms

pub mod reachability;

pub use reachability::reachable_from;
