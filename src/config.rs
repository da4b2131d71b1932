//! Application configuration, read from the environment.
//!
//! | Variable | Meaning | Default |
//! |---|---|---|
//! | `SHOTLINK_DATA_DIR` | directory holding `settings.json` / `secrets.json` | `<config dir>/shotlink` |
//! | `SHOTLINK_LOG_FORMAT` | `compact` or `json` | `compact` |

use crate::error::AppError;
use std::path::PathBuf;
use std::str::FromStr;

pub const DATA_DIR_ENV: &str = "SHOTLINK_DATA_DIR";
pub const LOG_FORMAT_ENV: &str = "SHOTLINK_LOG_FORMAT";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "compact" | "text" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::InvalidConfig(format!(
                "{} must be 'compact' or 'json', got '{}'",
                LOG_FORMAT_ENV, other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; `from_env` passes the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let data_dir = match lookup(DATA_DIR_ENV).filter(|v| !v.trim().is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };
        let log_format = match lookup(LOG_FORMAT_ENV) {
            Some(raw) => raw.parse()?,
            None => LogFormat::default(),
        };
        Ok(Self {
            data_dir,
            log_format,
        })
    }
}

pub fn default_data_dir() -> Result<PathBuf, AppError> {
    dirs::config_dir()
        .map(|dir| dir.join("shotlink"))
        .ok_or(AppError::NoDataDir(DATA_DIR_ENV))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn explicit_values_win() {
        let config = AppConfig::from_lookup(lookup(&[
            (DATA_DIR_ENV, "/var/lib/shotlink"),
            (LOG_FORMAT_ENV, "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/shotlink"));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn defaults_apply_when_unset() {
        let Ok(expected) = default_data_dir() else {
            return;
        };
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.data_dir, expected);
        assert_eq!(config.log_format, LogFormat::Compact);
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let result = AppConfig::from_lookup(lookup(&[
            (DATA_DIR_ENV, "/tmp/x"),
            (LOG_FORMAT_ENV, "xml"),
        ]));
        assert!(matches!(result, Err(AppError::InvalidConfig(_))));
    }
}
