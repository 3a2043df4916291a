//! TOML configuration loaded from the user config directory. Every field has
//! a default, so a missing file (or a file with only some fields) is fine.

use color_eyre::eyre::eyre;
use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::facets::{DEFAULT_INTAKE_MAX, DEFAULT_INTAKE_MIN};
use crate::sheet::DEFAULT_DATE_FORMAT;

/// Manages config directory and config file operations
#[derive(Clone)]
pub struct ConfigManager {
    pub(crate) config_dir: PathBuf,
}

impl ConfigManager {
    /// Create a ConfigManager with a custom config directory (primarily for testing)
    pub fn with_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Create a new ConfigManager for the given app name
    pub fn new(app_name: &str) -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| eyre!("Could not determine config directory"))?
            .join(app_name);

        Ok(Self { config_dir })
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Get path to a specific config file
    pub fn config_path(&self, filename: &str) -> PathBuf {
        self.config_dir.join(filename)
    }

    /// Ensure the config directory exists
    pub fn ensure_config_dir(&self) -> Result<()> {
        if !self.config_dir.exists() {
            std::fs::create_dir_all(&self.config_dir)?;
        }
        Ok(())
    }

    /// Render the default configuration as TOML with a short header
    pub fn generate_default_config(&self) -> Result<String> {
        let toml_str = toml::to_string_pretty(&AppConfig::default())
            .map_err(|e| eyre!("Failed to serialize default config: {}", e))?;
        Ok(format!(
            "# sheetview configuration file\n# This file uses TOML format. See https://toml.io/ for syntax reference.\n\n{}",
            toml_str
        ))
    }

    /// Write the default config file, creating the directory as needed.
    /// Returns the path written.
    pub fn write_default_config(&self) -> Result<PathBuf> {
        self.ensure_config_dir()?;
        let path = self.config_path("config.toml");
        std::fs::write(&path, self.generate_default_config()?)?;
        Ok(path)
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub display: DisplayConfig,
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// chrono format string used to render date cells
    pub date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Bounds reported for the intake range when the loaded dataset has no
    /// numeric intake values
    pub default_intake_min: f64,
    pub default_intake_max: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_intake_min: DEFAULT_INTAKE_MIN,
            default_intake_max: DEFAULT_INTAKE_MAX,
        }
    }
}

impl AppConfig {
    /// Load configuration for the given app name; a missing file means
    /// defaults.
    pub fn load(app_name: &str) -> Result<Self> {
        Self::load_from(&ConfigManager::new(app_name)?)
    }

    /// Load configuration from `config.toml` under the manager's directory.
    pub fn load_from(manager: &ConfigManager) -> Result<Self> {
        let config_path = manager.config_path("config.toml");

        if !config_path.exists() {
            return Ok(AppConfig::default());
        }

        let content = std::fs::read_to_string(&config_path).map_err(|e| {
            eyre!(
                "Failed to read config file at {}: {}",
                config_path.display(),
                e
            )
        })?;

        toml::from_str(&content).map_err(|e| {
            eyre!(
                "Failed to parse config file at {}: {}",
                config_path.display(),
                e
            )
        })
    }
}
