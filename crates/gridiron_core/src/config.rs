//! League configuration.
//!
//! ```rust
//! use gridiron_core::config::LeagueConfig;
//!
//! let config = LeagueConfig { num_teams: 4, ..LeagueConfig::default() };
//! assert!(config.check().is_ok());
//! ```

use crate::error::{LeagueError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{env, fs};
use validator::Validate;

pub const DEFAULT_DRAFT_PLAYERS: usize = 20;
pub const DEFAULT_NUMBER_OF_TEAMS: usize = 2;
/// Short demo season.
pub const DEFAULT_SEASON_WEEKS: usize = 3;
pub const DEFAULT_SAVE_DIR: &str = "saves";

/// Names an optional YAML/JSON file with a [`LeagueConfig`].
pub const CONFIG_PATH_ENV: &str = "GRIDIRON_CONFIG_PATH";

#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(default)]
pub struct LeagueConfig {
    /// Size of the generated draft pool
    #[validate(range(min = 1, max = 10000))]
    pub num_draft_players: usize,

    #[validate(range(min = 1, max = 64))]
    pub num_teams: usize,

    #[validate(range(min = 1, max = 52))]
    pub season_weeks: usize,

    /// Seeds both the player pool and the reference game simulator
    pub seed: u64,

    pub save_dir: PathBuf,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            num_draft_players: DEFAULT_DRAFT_PLAYERS,
            num_teams: DEFAULT_NUMBER_OF_TEAMS,
            season_weeks: DEFAULT_SEASON_WEEKS,
            seed: 0,
            save_dir: PathBuf::from(DEFAULT_SAVE_DIR),
        }
    }
}

impl LeagueConfig {
    pub fn check(&self) -> Result<()> {
        self.validate().map_err(|e| LeagueError::InvalidConfig(e.to_string()))
    }

    /// Load from a `.json` file, or YAML for any other extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let load_err = |message: String| LeagueError::ConfigLoad {
            path: path.display().to_string(),
            message,
        };

        let content = fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
        let is_json = path.extension().and_then(|ext| ext.to_str()) == Some("json");

        let config: LeagueConfig = if is_json {
            serde_json::from_str(&content).map_err(|e| load_err(e.to_string()))?
        } else {
            serde_yaml::from_str(&content).map_err(|e| load_err(e.to_string()))?
        };

        config.check()?;
        Ok(config)
    }

    /// Config named by [`CONFIG_PATH_ENV`], or `None` when the variable is unset or blank.
    pub fn from_env() -> Result<Option<Self>> {
        let Ok(path) = env::var(CONFIG_PATH_ENV) else {
            return Ok(None);
        };

        let path = path.trim();
        if path.is_empty() {
            return Ok(None);
        }

        Self::from_path(Path::new(path)).map(Some)
    }
}
