//! Runtime settings read from the environment

use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

const APP_NAME: &str = "stone-age-adventure";

/// RNG seed; unset means a random seed
pub const SEED_VAR: &str = "ADVENTURE_SEED";
/// Directory holding weapons.toml, armour.toml, enemies.toml and world.toml
pub const DATA_DIR_VAR: &str = "ADVENTURE_DATA_DIR";
/// Where client.log is written
pub const LOG_DIR_VAR: &str = "ADVENTURE_LOG_DIR";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("ADVENTURE_SEED must be an unsigned integer, got '{0}'")]
    InvalidSeed(String),
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub seed: u64,
    /// Overrides the built-in catalog and map
    pub data_dir: Option<PathBuf>,
    pub log_dir: PathBuf,
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let seed = match env::var(SEED_VAR) {
            Ok(raw) => parse_seed(&raw)?,
            Err(_) => random_seed(),
        };
        Ok(Settings {
            seed,
            data_dir: env::var_os(DATA_DIR_VAR).map(PathBuf::from),
            log_dir: env::var_os(LOG_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(default_log_directory),
        })
    }
}

fn parse_seed(raw: &str) -> Result<u64, SettingsError> {
    raw.trim()
        .parse()
        .map_err(|_| SettingsError::InvalidSeed(raw.to_string()))
}

/// Fresh seed for every launch
fn random_seed() -> u64 {
    rand::random()
}

/// Get the platform-specific log directory
///
/// - Linux: `~/.cache/stone-age-adventure/logs` (or `$XDG_CACHE_HOME/...`)
/// - macOS: `~/Library/Caches/stone-age-adventure/logs`
/// - Windows: `%LOCALAPPDATA%\stone-age-adventure\cache\logs`
fn default_log_directory() -> PathBuf {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| env::temp_dir().join(APP_NAME).join("logs"))
}
