//! Runtime configuration resolution.
//!
//! Precedence: explicit override > environment variable > default.
//! Blank environment values count as unset.

use crate::logging::default_log_level;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DATA_DIR: &str = "PHONEBOOK_DATA_DIR";
pub const ENV_LOG_LEVEL: &str = "PHONEBOOK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "PHONEBOOK_LOG_DIR";

const APP_DIR_NAME: &str = "phonebook";
const DEFAULT_DB_FILE_NAME: &str = "phonebook.sqlite3";
const LOG_DIR_NAME: &str = "logs";

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub db_file_name: String,
    pub log_level: String,
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Full path of the local storage database.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file_name)
    }
}

/// Caller-supplied values that win over environment and defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No override, no env value and no platform data directory.
    NoDataDir,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDataDir => write!(
                f,
                "cannot determine a data directory; set {ENV_DATA_DIR} or pass --data-dir"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Resolves configuration from overrides and the process environment.
pub fn resolve_config(overrides: ConfigOverrides) -> Result<AppConfig, ConfigError> {
    resolve_with_env(overrides, |name| std::env::var(name).ok())
}

fn resolve_with_env(
    overrides: ConfigOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> Result<AppConfig, ConfigError> {
    let non_blank = |name: &str| {
        env(name)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    let data_dir = match overrides
        .data_dir
        .or_else(|| non_blank(ENV_DATA_DIR).map(PathBuf::from))
    {
        Some(dir) => dir,
        None => dirs::data_dir()
            .map(|dir| dir.join(APP_DIR_NAME))
            .ok_or(ConfigError::NoDataDir)?,
    };

    let log_level = overrides
        .log_level
        .or_else(|| non_blank(ENV_LOG_LEVEL))
        .unwrap_or_else(|| default_log_level().to_string());

    let log_dir = overrides
        .log_dir
        .or_else(|| non_blank(ENV_LOG_DIR).map(PathBuf::from))
        .unwrap_or_else(|| data_dir.join(LOG_DIR_NAME));

    Ok(AppConfig {
        data_dir,
        db_file_name: DEFAULT_DB_FILE_NAME.to_string(),
        log_level,
        log_dir,
    })
}
