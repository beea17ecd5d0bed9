//! Preset configurations

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Next/NextT, Affects/AffectsT, Calls/CallsT, Modifies/Uses only
    ///
    /// Skips CFGBip, NextBip/NextBipT, explosion and AffectsBip/AffectsBipT.
    Intraprocedural,

    /// Every relation, interprocedural ones included
    Full,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intraprocedural => "intraprocedural",
            Self::Full => "full",
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "intraprocedural" => Ok(Self::Intraprocedural),
            "full" => Ok(Self::Full),
            _ => Err(ConfigError::UnknownPreset(s.to_string())),
        }
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::Full
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
