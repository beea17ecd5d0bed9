//! Pipeline configuration
//!
//! Two independent stage toggles (NextBip and AffectsBip), reachable through
//! presets, a builder API or a versioned YAML file.

pub mod error;
pub mod io;
pub mod pipeline_config;
pub mod preset;

pub use error::{ConfigError, ConfigResult};
pub use pipeline_config::{PipelineConfig, StageControl, SUPPORTED_VERSIONS};
pub use preset::Preset;
