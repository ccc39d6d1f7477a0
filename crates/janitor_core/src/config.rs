//! Application configuration.
//!
//! # Responsibility
//! - Load and save the TOML config file shared by every front end.
//! - Supply defaults so a missing file still yields a runnable setup.
//!
//! # Invariants
//! - Passwords are stored only as lowercase SHA-256 hex digests.
//! - `validate()` must pass before the config is used to build services.

use crate::auth::Role;
use crate::logging::default_log_level;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "janitor";
const DATABASE_FILE_NAME: &str = "janitor.sqlite3";
const MAX_UTC_OFFSET_HOURS: i32 = 14;
const SHA256_HEX_LEN: usize = 64;

// SHA-256 digests of the two default dashboard passwords.
const DEFAULT_WORKER_DIGEST: &str =
    "fab00aea1a9b974bdea2dcb010cfeb5f76e72c71a87e1fafc95419e82ec45ce8";
const DEFAULT_SUPERVISOR_DIGEST: &str =
    "3a4042d9e3bcd3267ad927354169d81583a39f05f42b04efa8053a465bd967a0";

/// Configuration loading/validation failure.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "config io error: {err}"),
            Self::Parse(message) => write!(f, "config parse error: {message}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(_) | Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// One login account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountConfig {
    pub username: String,
    pub role: Role,
    /// Lowercase hex SHA-256 of the password.
    pub password_sha256: String,
}

/// Top-level configuration file shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    /// Must be absolute; see `init_logging`.
    pub log_dir: PathBuf,
    pub log_level: String,
    /// Fixed offset of the school's civil time. WIB is UTC+7 with no DST.
    pub utc_offset_hours: i32,
    pub timezone_label: String,
    pub accounts: Vec<AccountConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let data_dir = default_data_dir();
        Self {
            database_path: data_dir.join(DATABASE_FILE_NAME),
            log_dir: data_dir.join("logs"),
            log_level: default_log_level().to_string(),
            utc_offset_hours: 7,
            timezone_label: "WIB".to_string(),
            accounts: vec![
                AccountConfig {
                    username: "hanto".to_string(),
                    role: Role::Worker,
                    password_sha256: DEFAULT_WORKER_DIGEST.to_string(),
                },
                AccountConfig {
                    username: "pengawas".to_string(),
                    role: Role::Supervisor,
                    password_sha256: DEFAULT_SUPERVISOR_DIGEST.to_string(),
                },
            ],
        }
    }
}

impl AppConfig {
    /// Loads a TOML config; fields missing from the file keep their defaults.
    ///
    /// # Errors
    /// - `Io` when the file cannot be read.
    /// - `Parse` when the TOML is malformed.
    /// - `Invalid` when values fail `validate()`.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Writes the config as pretty TOML, creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|err| ConfigError::Parse(err.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// `$XDG_CONFIG_HOME/janitor/config.toml`, else `~/.config/janitor/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config_home) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config_home)
                .join(APP_DIR_NAME)
                .join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join(APP_DIR_NAME)
                .join("config.toml")
        } else {
            std::env::temp_dir()
                .join(format!("{APP_DIR_NAME}-config"))
                .join("config.toml")
        }
    }

    /// Checks cross-field invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.utc_offset_hours.abs() > MAX_UTC_OFFSET_HOURS {
            return Err(ConfigError::Invalid(format!(
                "utc_offset_hours must be within ±{MAX_UTC_OFFSET_HOURS}, got {}",
                self.utc_offset_hours
            )));
        }
        if self.accounts.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one account is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for account in &self.accounts {
            let username = account.username.trim();
            if username.is_empty() {
                return Err(ConfigError::Invalid(
                    "account username cannot be empty".to_string(),
                ));
            }
            if !seen.insert(username) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate account username `{username}`"
                )));
            }
            let digest = account.password_sha256.as_str();
            if digest.len() != SHA256_HEX_LEN || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(ConfigError::Invalid(format!(
                    "password_sha256 for `{username}` must be {SHA256_HEX_LEN} hex chars"
                )));
            }
        }
        Ok(())
    }
}

fn default_data_dir() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join(format!(".{APP_DIR_NAME}")),
        None => std::env::temp_dir().join(format!(".{APP_DIR_NAME}")),
    }
}
