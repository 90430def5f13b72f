//! Configuration handling for taskline
//!
//! Configuration is stored in `~/.config/taskline/config.toml` (or the
//! platform equivalent). Every key is optional.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Task file used when neither the command line nor the config names one
pub const DEFAULT_DATA_FILE: &str = "data/tasks.txt";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Task file location, relative to the working directory unless absolute
    pub data_file: Option<PathBuf>,

    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

impl Config {
    /// Returns the default config directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "taskline").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the default config file path
    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Loads configuration from `path`, or from the default location
    ///
    /// A missing file yields the default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to load config: {}", config_path.display()))?;

        Ok(config)
    }

    /// Parses configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

        if config
            .data_file
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            return Err(ConfigError::Invalid("data_file must not be empty".to_string()));
        }

        Ok(config)
    }

    /// Resolves the task file, preferring an explicit override
    pub fn data_file(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.data_file.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.data_file, None);
        assert_eq!(config.default_format, OutputFormat::Text);
        assert_eq!(config.data_file(None), PathBuf::from(DEFAULT_DATA_FILE));
    }

    #[test]
    fn parse_config() {
        let toml = r#"
data_file = "/home/me/tasks.txt"
default_format = "json"
"#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.data_file, Some(PathBuf::from("/home/me/tasks.txt")));
        assert_eq!(config.default_format, OutputFormat::Json);
    }

    #[test]
    fn parse_rejects_bad_toml() {
        let err = Config::parse("data_file = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn parse_rejects_empty_data_file() {
        let err = Config::parse("data_file = \"\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn explicit_file_wins() {
        let config = Config {
            data_file: Some(PathBuf::from("from-config.txt")),
            ..Config::default()
        };

        assert_eq!(
            config.data_file(Some(Path::new("explicit.txt"))),
            PathBuf::from("explicit.txt")
        );
        assert_eq!(config.data_file(None), PathBuf::from("from-config.txt"));
    }

    #[test]
    fn load_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("nope.toml"))).unwrap();

        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "data_file = \"tasks.txt\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();

        assert_eq!(config.data_file(None), PathBuf::from("tasks.txt"));
        assert_eq!(config.default_format, OutputFormat::Text);
    }
}
