//! Configuration loading for Grit.
//!
//! Settings live in a TOML file at `$XDG_CONFIG_HOME/grit/config.toml`.
//! Every field has a default, so a partial file (or no file at all)
//! still yields a working configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub goals: GoalsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the JSON state files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Daily goal numbers for the habit checklist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalsConfig {
    #[serde(default = "default_steps_goal")]
    pub steps_goal: f64,
    /// Daily water target in ounces.
    #[serde(default = "default_water_goal_oz")]
    pub water_goal_oz: f64,
    /// Ounces added per logged glass.
    #[serde(default = "default_water_glass_oz")]
    pub water_glass_oz: f64,
}

impl Default for GoalsConfig {
    fn default() -> Self {
        Self {
            steps_goal: default_steps_goal(),
            water_goal_oz: default_water_goal_oz(),
            water_glass_oz: default_water_glass_oz(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("grit")
}

fn default_steps_goal() -> f64 {
    10_000.0
}

fn default_water_goal_oz() -> f64 {
    128.0
}

fn default_water_glass_oz() -> f64 {
    8.0
}

/// Path of the user config file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("grit").join("config.toml"))
}

impl Config {
    /// Load the config file, falling back to defaults when it does not
    /// exist. A present but malformed file is an error; silently
    /// ignoring it would hide typos.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&raw)?;
        config.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.goals.steps_goal <= 0.0 {
            return Err(Error::Config("steps_goal must be positive".to_string()));
        }
        if self.goals.water_goal_oz <= 0.0 {
            return Err(Error::Config("water_goal_oz must be positive".to_string()));
        }
        if self.goals.water_glass_oz <= 0.0 {
            return Err(Error::Config("water_glass_oz must be positive".to_string()));
        }
        Ok(())
    }
}
