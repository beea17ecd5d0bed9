//! CFGBip infrastructure

pub mod bip_builder;
pub mod next_bip;

pub use bip_builder::{build_cfg_bip, calls_have_single_successor};
pub use next_bip::{compute_next_bip_t, next_bip_pairs, NextBipTraversal};
