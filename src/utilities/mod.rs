//! Utility modules.

pub mod config;

pub use config::{AppConfig, ConfigError};
