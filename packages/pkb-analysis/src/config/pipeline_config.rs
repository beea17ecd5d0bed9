//! PipelineConfig
//!
//! Preset defaults plus per-stage overrides:
//!
//! ```rust
//! use pkb_analysis::config::{PipelineConfig, Preset};
//!
//! let config = PipelineConfig::preset(Preset::Full).affects_bip(false);
//! assert!(config.stages().next_bip);
//! assert!(!config.stages().affects_bip);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::error::{ConfigError, ConfigResult};
use super::io::ConfigExportV1;
use super::preset::Preset;

/// Schema versions `from_yaml` understands
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Stage on/off switches
///
/// Each toggle gates its whole branch of the pipeline: `next_bip` the
/// CFGBip build and NextBip/NextBipT, `affects_bip` the explosion and
/// AffectsBip/AffectsBipT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StageControl {
    pub next_bip: bool,
    pub affects_bip: bool,
}

impl Default for StageControl {
    fn default() -> Self {
        Self::all()
    }
}

impl StageControl {
    pub fn all() -> Self {
        Self {
            next_bip: true,
            affects_bip: true,
        }
    }

    pub fn intraprocedural() -> Self {
        Self {
            next_bip: false,
            affects_bip: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    preset: Preset,
    stages: StageControl,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::preset(Preset::Full)
    }
}

impl PipelineConfig {
    pub fn preset(preset: Preset) -> Self {
        let stages = match preset {
            Preset::Intraprocedural => StageControl::intraprocedural(),
            Preset::Full => StageControl::all(),
        };
        Self { preset, stages }
    }

    pub fn next_bip(mut self, enabled: bool) -> Self {
        self.stages.next_bip = enabled;
        self
    }

    pub fn affects_bip(mut self, enabled: bool) -> Self {
        self.stages.affects_bip = enabled;
        self
    }

    pub fn stages(&self) -> &StageControl {
        &self.stages
    }

    pub fn get_preset(&self) -> Preset {
        self.preset
    }

    /// Parse a v1 YAML document
    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let export: ConfigExportV1 = serde_yaml::from_str(content)?;

        let version = export.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset = match export.preset {
            Some(name) => name.parse::<Preset>()?,
            None => Preset::default(),
        };

        let mut config = Self::preset(preset);
        if let Some(stages) = export.stages {
            config.stages = stages;
        }
        Ok(config)
    }

    /// Load from YAML file (v1 schema)
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Export to YAML
    pub fn to_yaml(&self) -> ConfigResult<String> {
        let export = ConfigExportV1 {
            version: SUPPORTED_VERSIONS.last().copied(),
            preset: Some(self.preset.to_string()),
            stages: Some(self.stages),
        };
        Ok(serde_yaml::to_string(&export)?)
    }
}
