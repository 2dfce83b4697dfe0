use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::{FEATURE_THRESHOLD, PATCH_THRESHOLD};

/// Runtime configuration for addon-bump.
///
/// Every field has a default matching the stock repository layout, so a
/// repository without an `addonbump.toml` works out of the box.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Remote holding the protected branches
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Message of the version-increment commit
    #[serde(default = "default_commit_message")]
    pub commit_message: String,

    /// File extensions counted towards an addon's change amount
    #[serde(default = "default_tracked_extensions")]
    pub tracked_extensions: Vec<String>,

    /// Changed-line count at which a change stops being a fix
    #[serde(default = "default_patch_threshold")]
    pub patch_threshold: u64,

    /// Changed-line count at which a change becomes breaking
    #[serde(default = "default_feature_threshold")]
    pub feature_threshold: u64,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_commit_message() -> String {
    "Increment version number for modified addons".to_string()
}

fn default_tracked_extensions() -> Vec<String> {
    vec![
        "py".to_string(),
        "xml".to_string(),
        "csv".to_string(),
        "po".to_string(),
    ]
}

fn default_patch_threshold() -> u64 {
    PATCH_THRESHOLD
}

fn default_feature_threshold() -> u64 {
    FEATURE_THRESHOLD
}

impl Default for Config {
    fn default() -> Self {
        Config {
            remote: default_remote(),
            commit_message: default_commit_message(),
            tracked_extensions: default_tracked_extensions(),
            patch_threshold: default_patch_threshold(),
            feature_threshold: default_feature_threshold(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `addonbump.toml` in the current directory
/// 3. `.addonbump.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./addonbump.toml").exists() {
        fs::read_to_string("./addonbump.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".addonbump.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.remote, "origin");
        assert_eq!(config.patch_threshold, 50);
        assert_eq!(config.feature_threshold, 100);
        assert_eq!(config.tracked_extensions, vec!["py", "xml", "csv", "po"]);
        assert!(config.commit_message.contains("Increment version"));
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str("remote = \"upstream\"").unwrap();
        assert_eq!(config.remote, "upstream");
        assert_eq!(config.patch_threshold, 50);
        assert_eq!(config.tracked_extensions.len(), 4);
    }

    #[test]
    fn test_full_toml_round_trip() {
        let config = Config {
            remote: "upstream".to_string(),
            commit_message: "bump".to_string(),
            tracked_extensions: vec!["py".to_string()],
            patch_threshold: 10,
            feature_threshold: 20,
        };
        let serialized = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed, config);
    }
}
