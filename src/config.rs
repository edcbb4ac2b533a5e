use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

pub const CONFIG_FILE: &str = "calibration_config.toml";

/// Upper bound on form rows; only three valid rows can ever be solved.
pub const MAX_VALUE_SETS: usize = 16;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("reading config file failed: {0}")]
    Read(#[from] std::io::Error),
    #[error("parsing config file failed: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("value_sets must be at least 1")]
    NoValueSets,
    #[error("value_sets must be at most {max}, got {0}", max = MAX_VALUE_SETS)]
    TooManyValueSets(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Number of (actual, measured) rows the form presents.
    pub value_sets: usize,
    /// Print the valid/invalid/empty state of every row with the result.
    pub show_status: bool,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            value_sets: 3,
            show_status: true,
        }
    }
}

impl CalibrationConfig {
    /// Loads `calibration_config.toml` from the working directory.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Falls back to defaults when the file is missing or unusable.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match Self::read(path) {
            Ok(config) => config,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "using default config");
                Self::default()
            }
        }
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;

        if config.value_sets == 0 {
            return Err(ConfigError::NoValueSets);
        }
        if config.value_sets > MAX_VALUE_SETS {
            return Err(ConfigError::TooManyValueSets(config.value_sets));
        }

        Ok(config)
    }
}
