//! Configuration system for stars.
//!
//! TOML-backed, with typed sections.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Trait for types that can be loaded from configuration
///
/// # Example
///
/// ```ignore
/// use serde::Deserialize;
/// use helloworld::core::config::Configurable;
///
/// #[derive(Debug, Deserialize, Default)]
/// pub struct WeatherConfig {
///     pub city: String,
/// }
///
/// impl Configurable for WeatherConfig {
///     const PREFIX: &'static str = "weather";
/// }
/// ```
pub trait Configurable: DeserializeOwned + Default {
    /// TOML section the configuration is read from, e.g. `"help"` for `[help]`.
    const PREFIX: &'static str;
}

/// Configuration storage with TOML support
pub struct ConfigStore {
    data: toml::Value,
    path: Option<PathBuf>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl ConfigStore {
    pub fn empty() -> Self {
        Self {
            data: toml::Value::Table(Default::default()),
            path: None,
        }
    }

    /// Create a configuration store from a TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let data: toml::Value =
            toml::from_str(content).map_err(|e| anyhow!("Failed to parse TOML: {}", e))?;
        Ok(Self { data, path: None })
    }

    /// Create a configuration store from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file '{}': {}", path.display(), e))?;

        let data: toml::Value = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse TOML in '{}': {}", path.display(), e))?;

        Ok(Self {
            data,
            path: Some(path.to_path_buf()),
        })
    }

    /// Get a typed configuration section
    ///
    /// If the section doesn't exist, returns the default value.
    pub fn get<C: Configurable>(&self) -> Result<C> {
        let section = self
            .data
            .get(C::PREFIX)
            .cloned()
            .unwrap_or(toml::Value::Table(Default::default()));

        debug!("Loading config section: {}", C::PREFIX);

        section
            .try_into()
            .map_err(|e| anyhow!("Failed to deserialize config section '{}': {}", C::PREFIX, e))
    }

    pub fn has_section(&self, prefix: &str) -> bool {
        self.data.get(prefix).is_some()
    }

    /// Get the configuration file path (if loaded from file)
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

// ============================================================================
// Help configuration
// ============================================================================

/// `[help]` section
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct HelpConfig {
    /// Prefix users type before commands; shown in the hint line
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,

    /// Marker put in front of every listed plugin or command
    #[serde(default = "default_item_marker")]
    pub item_marker: String,
}

impl Default for HelpConfig {
    fn default() -> Self {
        Self {
            command_prefix: default_command_prefix(),
            item_marker: default_item_marker(),
        }
    }
}

fn default_command_prefix() -> String {
    "/".to_string()
}

fn default_item_marker() -> String {
    "  - ".to_string()
}

impl Configurable for HelpConfig {
    const PREFIX: &'static str = "help";
}
