//! Application configuration module
//! Handles environment variable loading and configuration validation

use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    /// Request timeout in seconds. This is the single source of
    /// request-level cancellation for every backend call.
    pub timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log format options
#[derive(Debug, Clone)]
pub enum LogFormat {
    Json,
    Plain,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        let _ = dotenv::dotenv().ok();

        Ok(AppConfig {
            backend: BackendConfig::from_env()?,
            logging: LoggingConfig::from_env()?,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.backend.validate()
    }
}

impl BackendConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(BackendConfig {
            base_url: env::var("BACKEND_BASE_URL")
                .map_err(|_| ConfigError::MissingVar("BACKEND_BASE_URL".to_string()))?,
            timeout_secs: env::var("BACKEND_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("BACKEND_TIMEOUT_SECS".to_string()))?,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "BACKEND_BASE_URL cannot be empty".to_string(),
            ));
        }

        url::Url::parse(&self.base_url).map_err(|_| {
            ConfigError::InvalidValue(format!("BACKEND_BASE_URL is not a valid URL: {}", self.base_url))
        })?;

        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "BACKEND_TIMEOUT_SECS cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl LoggingConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let format = match env::var("LOG_FORMAT")
            .unwrap_or_else(|_| "plain".to_string())
            .to_lowercase()
            .as_str()
        {
            "json" => LogFormat::Json,
            _ => LogFormat::Plain,
        };

        Ok(LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format,
        })
    }
}
