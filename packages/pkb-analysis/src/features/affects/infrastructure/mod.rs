pub mod affects;
pub mod affects_bip;

pub use affects::{compute_affects, compute_transitive};
pub use affects_bip::{compute_affects_bip, compute_affects_bip_t};
