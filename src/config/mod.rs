//
//  teamcity-cli
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Persistent settings of the `tcity` binary, stored as TOML in a
//! platform-specific directory. The codec library itself takes no
//! configuration; everything here affects how the CLI presents results.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/tcity/config.toml`
//! - **macOS**: `~/Library/Application Support/tcity/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\tcity\config.toml`
//!
//! The `TCITY_CONFIG` environment variable points the CLI at another file.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [core]
//! output = "yaml"
//! pretty = true
//! color = "never"
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use teamcity_cli::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("output", "json")?;
//! config.save()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the configuration file path.
pub const CONFIG_ENV: &str = "TCITY_CONFIG";

/// Every key accepted by [`Config::get`] and [`Config::set`].
pub const KEYS: &[&str] = &["output", "pretty", "color"];

/// Global configuration container.
///
/// # Examples
///
/// ```rust
/// use teamcity_cli::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.core.output, "table");
/// assert!(config.core.pretty);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Core CLI configuration options.
    #[serde(default)]
    pub core: CoreConfig,
}

/// Core configuration options.
///
/// # Default Values
///
/// | Field | Default |
/// |-------|---------|
/// | `output` | `"table"` |
/// | `pretty` | `true` |
/// | `color` | `"auto"` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Default output format: `table`, `json` or `yaml`.
    #[serde(default = "default_output")]
    pub output: String,

    /// Pretty-print JSON output.
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Terminal colors: `auto`, `always` or `never`.
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_output() -> String {
    "table".to_string()
}

fn default_pretty() -> bool {
    true
}

fn default_color() -> String {
    "auto".to_string()
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
            pretty: default_pretty(),
            color: default_color(),
        }
    }
}

impl Config {
    /// Loads configuration from the default location.
    ///
    /// A missing file is not an error; defaults are used.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not
    /// valid TOML for this schema.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to an explicit path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the path to the configuration file.
    ///
    /// `TCITY_CONFIG` wins over the platform directory.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Gets a core configuration value by key.
    ///
    /// ```rust
    /// use teamcity_cli::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.get("color"), Some("auto".to_string()));
    /// assert_eq!(config.get("unknown_key"), None);
    /// ```
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "output" => Some(self.core.output.clone()),
            "pretty" => Some(self.core.pretty.to_string()),
            "color" => Some(self.core.color.clone()),
            _ => None,
        }
    }

    /// Sets a core configuration value by key, validating it.
    ///
    /// Changes are only persisted when [`Config::save`] is called.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "output" => {
                if !matches!(value, "table" | "json" | "yaml") {
                    bail!("Invalid output format '{}'. Use table, json or yaml", value);
                }
                self.core.output = value.to_string();
            }
            "pretty" => {
                self.core.pretty = match value {
                    "true" => true,
                    "false" => false,
                    _ => bail!("Invalid value '{}' for pretty. Use true or false", value),
                };
            }
            "color" => {
                if !matches!(value, "auto" | "always" | "never") {
                    bail!("Invalid color mode '{}'. Use auto, always or never", value);
                }
                self.core.color = value.to_string();
            }
            _ => bail!("Unknown config key '{}'. Valid keys: {}", key, KEYS.join(", ")),
        }
        Ok(())
    }

    /// Restores a key to its default value.
    pub fn unset(&mut self, key: &str) -> Result<()> {
        let defaults = CoreConfig::default();
        match key {
            "output" => self.core.output = defaults.output,
            "pretty" => self.core.pretty = defaults.pretty,
            "color" => self.core.color = defaults.color,
            _ => bail!("Unknown config key '{}'. Valid keys: {}", key, KEYS.join(", ")),
        }
        Ok(())
    }

    /// Every key with its current value, in [`KEYS`] order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|key| self.get(key).map(|value| (*key, value)))
            .collect()
    }
}
