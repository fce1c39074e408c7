//! Translator settings read from `config.toml`

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::translate::{Placeholders, DEFAULT_EXECUTABLE, HOSTNAME_MACRO};

/// Directory name below the user config directory
const CONFIG_DIR_NAME: &str = "autodt";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Settings for translating rules outside the monitoring core
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Value of `--host_name`
    #[serde(default = "default_macro")]
    pub host_macro: String,
    /// Value of `--monitor_host` for rules monitoring the checking host
    #[serde(default = "default_macro")]
    pub self_host_macro: String,
    /// Downtime executable named in rendered command lines
    #[serde(default = "default_executable")]
    pub executable: String,
}

fn default_macro() -> String {
    HOSTNAME_MACRO.to_string()
}

fn default_executable() -> String {
    DEFAULT_EXECUTABLE.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host_macro: default_macro(),
            self_host_macro: default_macro(),
            executable: default_executable(),
        }
    }
}

impl Settings {
    pub fn placeholders(&self) -> Placeholders {
        Placeholders {
            host_macro: self.host_macro.clone(),
            self_host_macro: self.self_host_macro.clone(),
        }
    }

    /// Load settings from an explicit path, or from the user config
    /// directory when none is given. A missing default file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        Ok(settings)
    }
}

/// `<config dir>/autodt/config.toml`, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
