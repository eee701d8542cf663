//! Configuration loader with inheritance support.
//!
//! Loads configuration from multiple sources and merges them:
//! 1. Global config: `~/.arenagraph/config.toml`
//! 2. Local config: `.arenagraph/config.toml` (in the working directory)
//! 3. CLI overrides
//!
//! Later sources override earlier ones.

use crate::error::ConfigError;
use crate::{ArenaConfig, ConfigLayer, ConfigOverrides};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory holding the config file, both under `$HOME` and locally.
const CONFIG_DIR: &str = ".arenagraph";

/// Configuration loader with caching and inheritance support.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Global config directory (e.g., `~/.arenagraph`)
    global_config_dir: Option<PathBuf>,

    /// Cached global config file
    global_config: Option<ConfigLayer>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader rooted at `~/.arenagraph`.
    pub fn new() -> Self {
        Self {
            global_config_dir: dirs::home_dir().map(|h| h.join(CONFIG_DIR)),
            global_config: None,
        }
    }

    /// Create a loader with a custom global config directory.
    pub fn with_global_dir(global_dir: impl Into<PathBuf>) -> Self {
        Self {
            global_config_dir: Some(global_dir.into()),
            global_config: None,
        }
    }

    pub fn global_config_path(&self) -> Option<PathBuf> {
        self.global_config_dir
            .as_ref()
            .map(|d| d.join(CONFIG_FILE_NAME))
    }

    pub fn local_config_path(&self, root: &Path) -> PathBuf {
        root.join(CONFIG_DIR).join(CONFIG_FILE_NAME)
    }

    /// Load configuration for a directory with optional CLI overrides.
    ///
    /// Merges config in order: global → local → overrides, then validates
    /// the result.
    pub fn load(
        &mut self,
        root: &Path,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<ArenaConfig, ConfigError> {
        let mut config = ArenaConfig::default();

        if let Some(global_layer) = self.load_global()? {
            config.apply_layer(global_layer);
        }

        if let Some(local_layer) = self.load_local(root)? {
            config.apply_layer(local_layer);
        }

        if let Some(ovr) = overrides {
            config.apply_overrides(ovr);
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from one explicit file, skipping global and local.
    pub fn load_file(
        &self,
        path: &Path,
        overrides: Option<&ConfigOverrides>,
    ) -> Result<ArenaConfig, ConfigError> {
        debug!("Loading config from {:?}", path);
        let mut config = ArenaConfig::default();
        config.apply_layer(load_config_file(path)?);
        if let Some(ovr) = overrides {
            config.apply_overrides(ovr);
        }
        config.validate()?;
        Ok(config)
    }

    /// Load only the global configuration file.
    pub fn load_global(&mut self) -> Result<Option<ConfigLayer>, ConfigError> {
        if let Some(ref config) = self.global_config {
            return Ok(Some(config.clone()));
        }

        let Some(global_path) = self.global_config_path() else {
            debug!("No home directory found, skipping global config");
            return Ok(None);
        };

        if !global_path.exists() {
            trace!("Global config not found at {:?}", global_path);
            return Ok(None);
        }

        debug!("Loading global config from {:?}", global_path);
        let config = load_config_file(&global_path)?;
        self.global_config = Some(config.clone());

        Ok(Some(config))
    }

    /// Load only the local configuration file.
    pub fn load_local(&self, root: &Path) -> Result<Option<ConfigLayer>, ConfigError> {
        let local_path = self.local_config_path(root);

        if !local_path.exists() {
            trace!("Local config not found at {:?}", local_path);
            return Ok(None);
        }

        debug!("Loading local config from {:?}", local_path);
        load_config_file(&local_path).map(Some)
    }

    /// Create `.arenagraph/config.toml` with every key at its default.
    ///
    /// An existing file is left untouched.
    pub fn init_local(&self, root: &Path) -> Result<PathBuf, ConfigError> {
        let config_path = self.local_config_path(root);
        if !config_path.exists() {
            save_config_file(&config_path, &ConfigLayer::from(&ArenaConfig::default()))?;
        }
        Ok(config_path)
    }
}

fn load_config_file(path: &Path) -> Result<ConfigLayer, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

    toml::from_str(&content).map_err(|e| ConfigError::parse_toml(path, e))
}

fn save_config_file(path: &Path, layer: &ConfigLayer) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }
    }

    let content = toml::to_string_pretty(layer)?;
    std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))
}
