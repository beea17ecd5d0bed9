//! Modifies / Uses feature (statement and procedure level)

pub mod domain;
pub mod infrastructure;

pub use domain::{ModifiesUses, VarSet};
pub use infrastructure::compute_modifies_uses;
