//! Client configuration.
//!
//! Provides a `JotterConfig` loaded from `config.json` in the platform config
//! directory. Every field is optional in the file; the database path can also
//! come from the command line or the `JOTTER_DB_PATH` environment variable.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::normalize_text_option;

const CONFIG_FILE_NAME: &str = "config.json";
const DB_FILE_NAME: &str = "jotter.db";
const APP_DIR_NAME: &str = "jotter";

/// Environment variable overriding the database location
pub const DB_PATH_ENV: &str = "JOTTER_DB_PATH";

/// Grace period a shared projection keeps running after its last observer leaves
pub const DEFAULT_IDLE_GRACE_MS: u64 = 5_000;

/// Persistent client configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct JotterConfig {
    #[serde(default)]
    pub db_path: Option<PathBuf>,
    #[serde(default = "default_idle_grace_ms")]
    pub idle_grace_ms: u64,
}

const fn default_idle_grace_ms() -> u64 {
    DEFAULT_IDLE_GRACE_MS
}

impl Default for JotterConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            idle_grace_ms: DEFAULT_IDLE_GRACE_MS,
        }
    }
}

impl JotterConfig {
    /// Load from the default config path; a missing file yields defaults.
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
            .map_err(|error| Error::Config(format!("{}: {error}", path.display())))
    }

    /// Parse a config document
    pub fn parse(raw: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Write this config to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Idle teardown window for shared projections
    pub const fn idle_grace(&self) -> Duration {
        Duration::from_millis(self.idle_grace_ms)
    }

    /// Resolve the database path: explicit flag, then environment, then
    /// config file, then the platform data directory.
    pub fn resolve_db_path(&self, cli_db_path: Option<PathBuf>) -> Result<PathBuf> {
        let from_env = normalize_text_option(std::env::var(DB_PATH_ENV).ok()).map(PathBuf::from);
        cli_db_path
            .or(from_env)
            .or_else(|| self.db_path.clone())
            .map_or_else(default_db_path, Ok)
    }
}

/// Default location of the config file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Default location of the note database
pub fn default_db_path() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(DB_FILE_NAME))
        .ok_or_else(|| Error::Config("could not resolve a data directory".to_string()))
}
