//! Configuration management
//!
//! TOML configuration with a default for every field, so a partial file
//! only overrides what it names.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::indicators::{IndicatorParams, DEFAULT_PRICE_COLUMN};
use crate::sentiment::ScoringMethod;
use crate::topics::TopicParams;

/// Indicator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorSettings {
    /// Column the indicators read
    pub price_column: String,
    #[serde(flatten)]
    pub params: IndicatorParams,
}

impl Default for IndicatorSettings {
    fn default() -> Self {
        Self {
            price_column: DEFAULT_PRICE_COLUMN.to_string(),
            params: IndicatorParams::default(),
        }
    }
}

/// Correlation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationSettings {
    /// Closing price column used for daily returns
    pub close_column: String,
    /// Headline scorer
    pub method: ScoringMethod,
}

impl Default for CorrelationSettings {
    fn default() -> Self {
        Self {
            close_column: DEFAULT_PRICE_COLUMN.to_string(),
            method: ScoringMethod::Polarity,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub indicators: IndicatorSettings,
    pub correlation: CorrelationSettings,
    pub topics: TopicParams,
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Load configuration from file or use default
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write config {}", path.display()))?;
        Ok(())
    }
}
