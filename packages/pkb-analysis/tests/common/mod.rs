//! Common test utilities for pkb-analysis
//!
//! Program fixtures and store helpers shared by the unit and integration
//! test targets. Not every target uses every helper.

#![allow(dead_code)]

mod assertions;
mod fixtures;

pub use assertions::*;
pub use fixtures::*;

/// Install a `tracing` subscriber honouring `RUST_LOG`, once per process
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
