//! Data-flow feature: Affects, AffectsT, AffectsBip and AffectsBipT

pub mod domain;
pub mod infrastructure;

pub use domain::{AffectsBip, Effect, NodeAffects};
pub use infrastructure::{
    compute_affects, compute_affects_bip, compute_affects_bip_t, compute_transitive,
};
