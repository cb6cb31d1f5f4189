//! Configuration management

use crate::error::{BooklyError, BooklyResult};
use crate::types::BooklyConfig;

use std::path::Path;

impl Default for BooklyConfig {
    fn default() -> Self {
        Self {
            api: crate::types::ApiConfig {
                base_url: "https://api.bookly.app".to_string(),
                timeout_seconds: 30,
                user_agent: "bookly/0.1".to_string(),
            },
            storage: crate::types::StorageConfig {
                data_dir: "~/.bookly/data".to_string(),
                namespace: "@Bookly".to_string(),
            },
        }
    }
}

impl BooklyConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> BooklyResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BooklyError::Config {
            message: format!("Failed to read config file: {}", e),
            source: Some(Box::new(e)),
            context: crate::ErrorContext::new("config")
                .with_operation("read_file")
                .with_suggestion("Check if the config file exists and is readable"),
        })?;

        let config: BooklyConfig = toml::from_str(&content).map_err(|e| BooklyError::Config {
            message: format!("Failed to parse config: {}", e),
            source: Some(Box::new(e)),
            context: crate::ErrorContext::new("config")
                .with_operation("parse_toml")
                .with_suggestion("Check TOML syntax in config file"),
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> BooklyResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| BooklyError::Config {
            message: format!("Failed to serialize config: {}", e),
            source: Some(Box::new(e)),
            context: crate::ErrorContext::new("config").with_operation("serialize_toml"),
        })?;

        std::fs::write(path, content).map_err(|e| BooklyError::Config {
            message: format!("Failed to write config file: {}", e),
            source: Some(Box::new(e)),
            context: crate::ErrorContext::new("config")
                .with_operation("write_file")
                .with_suggestion("Check if the directory exists and is writable"),
        })?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> BooklyResult<()> {
        if self.api.base_url.is_empty() {
            return Err(BooklyError::Config {
                message: "API base_url must not be empty".to_string(),
                source: None,
                context: crate::ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set api.base_url to the Bookly API endpoint"),
            });
        }

        if self.api.timeout_seconds == 0 {
            return Err(BooklyError::Config {
                message: "API timeout_seconds must be greater than 0".to_string(),
                source: None,
                context: crate::ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set api.timeout_seconds to a positive value"),
            });
        }

        if self.storage.namespace.is_empty() {
            return Err(BooklyError::Config {
                message: "Storage namespace must not be empty".to_string(),
                source: None,
                context: crate::ErrorContext::new("config")
                    .with_operation("validate")
                    .with_suggestion("Set storage.namespace to the application key prefix"),
            });
        }

        Ok(())
    }
}
