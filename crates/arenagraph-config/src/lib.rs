//! arenagraph configuration management
//!
//! Provides configuration loading with support for:
//! - Global config: `~/.arenagraph/config.toml`
//! - Local config: `.arenagraph/config.toml` (in the working directory)
//! - CLI overrides via `ConfigOverrides`
//!
//! Configuration is merged in order: global → local → CLI overrides.

mod error;
mod loader;

pub use error::ConfigError;
pub use loader::ConfigLoader;

use arenagraph_core::{Language, WriteOptions};
use serde::{Deserialize, Serialize};

/// Log levels accepted by `logging.level`.
const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Root configuration.
///
/// Represents the fully merged configuration from all sources.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ArenaConfig {
    /// Graph file output settings
    pub codec: CodecConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Graph file output settings.
///
/// # Example TOML
///
/// ```toml
/// [codec]
/// language = "german"
/// annotate = true
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CodecConfig {
    /// Vocabulary for the directedness token and annotations
    pub language: Language,

    /// Write count labels and block comments
    pub annotate: bool,
}

impl CodecConfig {
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions::new(self.language).annotated(self.annotate)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// One configuration file as written on disk.
///
/// Keys absent from the file stay `None` and leave earlier sources alone; a
/// key that is present always wins, even when it repeats the default.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ConfigLayer {
    pub codec: CodecLayer,
    pub logging: LoggingLayer,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct CodecLayer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotate: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingLayer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl From<&ArenaConfig> for ConfigLayer {
    /// A layer that sets every key, used when writing a fresh config file.
    fn from(config: &ArenaConfig) -> Self {
        Self {
            codec: CodecLayer {
                language: Some(config.codec.language),
                annotate: Some(config.codec.annotate),
            },
            logging: LoggingLayer {
                level: Some(config.logging.level.clone()),
            },
        }
    }
}

/// CLI overrides for configuration values.
///
/// Used to apply command-line arguments over file-based config.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override output language
    pub language: Option<Language>,

    /// Force annotated output
    pub annotate: Option<bool>,

    /// Override log level (set by `--verbose`/`--quiet`)
    pub log_level: Option<String>,
}

impl ArenaConfig {
    /// Apply the keys a config file sets.
    pub fn apply_layer(&mut self, layer: ConfigLayer) {
        if let Some(language) = layer.codec.language {
            self.codec.language = language;
        }
        if let Some(annotate) = layer.codec.annotate {
            self.codec.annotate = annotate;
        }
        if let Some(level) = layer.logging.level {
            self.logging.level = level;
        }
    }

    /// Apply CLI overrides to this configuration.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(language) = overrides.language {
            self.codec.language = language;
        }

        if let Some(annotate) = overrides.annotate {
            self.codec.annotate = annotate;
        }

        if let Some(ref level) = overrides.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::invalid_value(
                "logging.level",
                format!(
                    "unknown level '{}', expected one of {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            ));
        }
        Ok(())
    }
}
