//! YAML schema types
//!
//! ```yaml
//! version: 1
//! preset: full          # optional, defaults to full
//! stages:               # optional, overrides the preset
//!   next_bip: true
//!   affects_bip: false
//! ```

use serde::{Deserialize, Serialize};

use super::pipeline_config::StageControl;

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigExportV1 {
    /// Optional on input so that a missing field gets its own error
    pub version: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stages: Option<StageControl>,
}
