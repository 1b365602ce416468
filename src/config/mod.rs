//! Configuration loading and management

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default code value format: three uppercase letters, a hyphen, three digits
pub const DEFAULT_CODE_VALUE_PATTERN: &str = r"^[A-Z]{3}-[0-9]{3}$";

/// Default tracing directive when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Business rule configuration for the validating repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Regular expression every product code value must match
    pub code_value_pattern: String,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            code_value_pattern: DEFAULT_CODE_VALUE_PATTERN.to_string(),
        }
    }
}

impl ValidationConfig {
    /// Compile the code value pattern
    pub fn code_value_regex(&self) -> Result<Regex, regex::Error> {
        Regex::new(&self.code_value_pattern)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is absent
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Complete configuration for the catalog core
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub validation: ValidationConfig,
    pub logging: LoggingConfig,
}

impl CatalogConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path))?;
        Self::from_yaml_str(&content).with_context(|| format!("invalid config file '{}'", path))
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }
}
