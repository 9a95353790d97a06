//! Configuration structs

mod engine_config;

pub use engine_config::{AppSettings, CacheConfig, ConfigError, EngineConfig, Environment};
