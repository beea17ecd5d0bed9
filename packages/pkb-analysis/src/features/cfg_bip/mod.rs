//! Interprocedural control flow: CFGBip, NextBip and NextBipT

pub mod domain;
pub mod infrastructure;

pub use domain::CfgBip;
pub use infrastructure::{
    build_cfg_bip, calls_have_single_successor, compute_next_bip_t, next_bip_pairs,
    NextBipTraversal,
};
