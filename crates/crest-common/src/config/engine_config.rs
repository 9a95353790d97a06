//! Engine configuration
//!
//! Loads configuration from environment variables with a `.env` fallback.

use std::env;
use thiserror::Error;

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Entity cache tuning
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Number of recent messages retained per client; 0 disables caching
    pub message_capacity: usize,
}

/// Main engine configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub app: AppSettings,
    pub cache: CacheConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: default_app_name(),
                env: Environment::default(),
            },
            cache: CacheConfig {
                message_capacity: default_message_capacity(),
            },
        }
    }
}

fn default_app_name() -> String {
    "crest".to_string()
}

fn default_message_capacity() -> usize {
    0
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is present but unparseable
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let message_capacity = match env::var("CREST_MESSAGE_CACHE_CAPACITY") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidVar("CREST_MESSAGE_CACHE_CAPACITY"))?,
            Err(_) => default_message_capacity(),
        };

        Ok(Self {
            app: AppSettings {
                name: env::var("CREST_APP_NAME").unwrap_or_else(|_| default_app_name()),
                env: env::var("CREST_APP_ENV")
                    .ok()
                    .and_then(|s| match s.to_lowercase().as_str() {
                        "production" => Some(Environment::Production),
                        "staging" => Some(Environment::Staging),
                        "development" => Some(Environment::Development),
                        _ => None,
                    })
                    .unwrap_or_default(),
            },
            cache: CacheConfig { message_capacity },
        })
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidVar(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.app.name, "crest");
        assert_eq!(config.cache.message_capacity, 0);
        assert!(config.app.env.is_development());
    }

    #[test]
    fn test_environment_flags() {
        assert!(Environment::Production.is_production());
        assert!(!Environment::Staging.is_production());
        assert!(!Environment::Staging.is_development());
    }
}
