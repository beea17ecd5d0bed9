//! Control flow feature: CFG, Next and NextT

pub mod domain;
pub mod infrastructure;

pub use domain::Cfg;
pub use infrastructure::{build_cfg, compute_next_t, next_pairs};
