//! Analysis features
//!
//! Each feature owns its domain model and the builders that produce it.
//! Builders are plain functions over typed inputs; sequencing them is the
//! pipeline's job.

pub mod affects;
pub mod call_graph;
pub mod cfg_bip;
pub mod explosion;
pub mod flow_graph;
pub mod modifies_uses;
