//! Flow graph infrastructure

pub mod cfg_builder;
pub mod next;

pub use cfg_builder::build_cfg;
pub use next::{compute_next_t, next_pairs};
