//! Configuration and logging utilities

pub mod config;
pub mod logging;

pub use config::{AppConfig, CorrelationSettings, IndicatorSettings, LoggingSettings};
pub use logging::setup_logging;
