//! Pipeline orchestration
//!
//! `PipelineState` owns the intermediate graphs of one run; `run_pipeline`
//! drives the stages in their fixed order and writes the results.

pub mod orchestrator;
pub mod stages;
pub mod state;

pub use orchestrator::{run_pipeline, RunSummary};
pub use stages::StageId;
pub use state::PipelineState;
