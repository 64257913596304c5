use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Result, SemvertagError};
use crate::version::BumpField;

/// Configuration for semvertag.
///
/// Everything lives under a `[defaults]` table; command-line arguments
/// override these values per invocation.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
}

/// Default values applied when the matching CLI argument is absent.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Defaults {
    /// Tag prefix, e.g. "v" or "app-". Empty means no prefix.
    #[serde(default)]
    pub prefix: String,

    /// Release stage, e.g. "alpha" or "rc". Absent means production.
    #[serde(default)]
    pub stage: Option<String>,

    /// Version segment bumped when none is named on the command line.
    #[serde(default = "default_field")]
    pub field: String,

    /// Remote that tags are pushed to.
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Annotation message for created tags.
    #[serde(default = "default_message")]
    pub message: String,
}

fn default_field() -> String {
    "build".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_message() -> String {
    "Release".to_string()
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            prefix: String::new(),
            stage: None,
            field: default_field(),
            remote: default_remote(),
            message: default_message(),
        }
    }
}

impl Config {
    /// The configured default bump field, validated against the known
    /// segment names. A typo in the config file surfaces here rather than
    /// deep inside the bump engine.
    pub fn default_field(&self) -> Result<BumpField> {
        self.defaults.field.parse()
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `semvertag.toml` in current directory
/// 3. `semvertag.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./semvertag.toml").exists() {
        fs::read_to_string("./semvertag.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("semvertag.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str).map_err(|e| SemvertagError::config(e.to_string()))?;
    Ok(config)
}
