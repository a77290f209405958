//! Global carecal configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_UPCOMING_LIMIT;
use crate::error::{CareCalError, CareCalResult};

static DEFAULT_DATA_DIR: &str = "~/.local/share/carecal";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

fn default_upcoming_limit() -> usize {
    DEFAULT_UPCOMING_LIMIT
}

fn is_default_upcoming_limit(n: &usize) -> bool {
    *n == DEFAULT_UPCOMING_LIMIT
}

/// Global configuration at ~/.config/carecal/config.toml
///
/// Any field can be overridden with a `CARECAL_`-prefixed environment variable,
/// e.g. `CARECAL_DATA_DIR`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CarecalConfig {
    /// Where events.json and profiles.toml are kept
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    /// How many events `upcoming` shows by default
    #[serde(default = "default_upcoming_limit", skip_serializing_if = "is_default_upcoming_limit")]
    pub upcoming_limit: usize,

    /// Profile (id or name) to filter by when none is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,
}

impl Default for CarecalConfig {
    fn default() -> Self {
        CarecalConfig {
            data_dir: default_data_dir(),
            upcoming_limit: DEFAULT_UPCOMING_LIMIT,
            default_profile: None,
        }
    }
}

impl CarecalConfig {
    pub fn config_path() -> CareCalResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CareCalError::Config("Could not determine config directory".into()))?
            .join("carecal");

        Ok(config_dir.join("config.toml"))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> CareCalResult<()> {
        let contents = format!(
            "\
# carecal configuration

# Where events and care profiles are stored:
# data_dir = \"{}\"

# How many events `carecal upcoming` lists:
# upcoming_limit = {}

# Only show this person's events unless --profile is given (id or name):
# default_profile = \"Mom\"
",
            DEFAULT_DATA_DIR, DEFAULT_UPCOMING_LIMIT
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                CareCalError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| CareCalError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: CarecalConfig = toml::from_str("").unwrap();
        assert_eq!(config, CarecalConfig::default());
    }

    #[test]
    fn default_fields_are_not_written() {
        let config = CarecalConfig {
            default_profile: Some("Mom".to_string()),
            ..Default::default()
        };
        let written = toml::to_string_pretty(&config).unwrap();
        assert_eq!(written.trim(), "default_profile = \"Mom\"");
    }

    #[test]
    fn generated_default_config_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        CarecalConfig::create_default_config(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let config: CarecalConfig = toml::from_str(&content).unwrap();
        assert_eq!(config, CarecalConfig::default());
    }
}
