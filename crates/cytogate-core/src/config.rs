use crate::error::{CytogateError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Layered configuration for Cytogate
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// Pixel radius around the first vertex that closes a gate
    pub closure_threshold: ConfigValue<f64>,
    /// Busy period before a dye result is applied
    pub dye_delay_ms: ConfigValue<u64>,
    /// Color for unclassified points and hidden groups
    pub default_color: ConfigValue<String>,
    /// JSON file backing the session store
    pub store_path: ConfigValue<PathBuf>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            closure_threshold: ConfigValue::new(20.0, ConfigSource::Default),
            dye_delay_ms: ConfigValue::new(1000, ConfigSource::Default),
            default_color: ConfigValue::new("gray".to_string(), ConfigSource::Default),
            store_path: ConfigValue::new(
                PathBuf::from("cytogate_saves.json"),
                ConfigSource::Default,
            ),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| CytogateError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| CytogateError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(threshold) = file_config.closure_threshold {
            self.closure_threshold.update(parse_threshold(threshold)?, ConfigSource::File);
        }

        if let Some(delay) = file_config.dye_delay_ms {
            self.dye_delay_ms.update(delay, ConfigSource::File);
        }

        if let Some(color) = file_config.default_color {
            self.default_color.update(color, ConfigSource::File);
        }

        if let Some(store_path) = file_config.store_path {
            self.store_path.update(store_path, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // CYTOGATE_CLOSURE_THRESHOLD
        if let Ok(raw) = env::var("CYTOGATE_CLOSURE_THRESHOLD") {
            match raw.parse::<f64>().ok().and_then(|v| parse_threshold(v).ok()) {
                Some(threshold) => {
                    self.closure_threshold.update(threshold, ConfigSource::Environment)
                }
                None => tracing::warn!(
                    "Invalid CYTOGATE_CLOSURE_THRESHOLD value '{}': expected a positive number of pixels",
                    raw
                ),
            }
        }

        // CYTOGATE_DYE_DELAY_MS
        if let Ok(raw) = env::var("CYTOGATE_DYE_DELAY_MS") {
            match raw.parse::<u64>() {
                Ok(delay) => self.dye_delay_ms.update(delay, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CYTOGATE_DYE_DELAY_MS value '{}': expected milliseconds",
                    raw
                ),
            }
        }

        // CYTOGATE_DEFAULT_COLOR
        if let Ok(color) = env::var("CYTOGATE_DEFAULT_COLOR") {
            self.default_color.update(color, ConfigSource::Environment);
        }

        // CYTOGATE_STORE_PATH
        if let Ok(path) = env::var("CYTOGATE_STORE_PATH") {
            self.store_path.update(PathBuf::from(path), ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(threshold) = overrides.closure_threshold {
            self.closure_threshold.update(threshold, ConfigSource::Cli);
        }

        if let Some(delay) = overrides.dye_delay_ms {
            self.dye_delay_ms.update(delay, ConfigSource::Cli);
        }

        if let Some(color) = overrides.default_color {
            self.default_color.update(color, ConfigSource::Cli);
        }

        if let Some(store_path) = overrides.store_path {
            self.store_path.update(store_path, ConfigSource::Cli);
        }
    }

    pub fn dye_delay(&self) -> Duration {
        Duration::from_millis(self.dye_delay_ms.value)
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "closure_threshold".to_string(),
            (format!("{}px", self.closure_threshold.value), self.closure_threshold.source),
        );

        map.insert(
            "dye_delay_ms".to_string(),
            (format!("{}ms", self.dye_delay_ms.value), self.dye_delay_ms.source),
        );

        map.insert(
            "default_color".to_string(),
            (self.default_color.value.clone(), self.default_color.source),
        );

        map.insert(
            "store_path".to_string(),
            (self.store_path.value.display().to_string(), self.store_path.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    closure_threshold: Option<f64>,
    dye_delay_ms: Option<u64>,
    default_color: Option<String>,
    store_path: Option<PathBuf>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub closure_threshold: Option<f64>,
    pub dye_delay_ms: Option<u64>,
    pub default_color: Option<String>,
    pub store_path: Option<PathBuf>,
}

/// Validate a closure threshold in pixels
pub fn parse_threshold(value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CytogateError::ConfigInvalid {
            key: "closure_threshold".to_string(),
            reason: format!("Threshold must be a positive number of pixels, got {}", value),
        })
    }
}
