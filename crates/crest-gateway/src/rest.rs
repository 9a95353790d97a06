//! Request-client collaborator interface
//!
//! The engine only calls these endpoints during initialization, never on
//! the dispatch hot path. Transport and authentication live behind the
//! trait.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crest_core::{Snowflake, User, VoiceRegion};

/// Request-client failure
#[derive(Debug, Error)]
pub enum RestError {
    #[error("request failed with status {0}")]
    Status(u16),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("response decode error")]
    Decode(#[from] serde_json::Error),
}

/// The application the client is authenticated as
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CurrentApplication {
    pub id: Snowflake,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub flags: u64,
}

/// Initialization-time lookups against the remote REST API
#[async_trait]
pub trait RestClient: Send + Sync {
    /// The user the client is authenticated as
    async fn fetch_current_user(&self) -> Result<User, RestError>;

    /// The application the client is authenticated as
    async fn fetch_current_application(&self) -> Result<CurrentApplication, RestError>;

    /// Available voice regions; the engine memoizes the result
    async fn list_voice_regions(&self) -> Result<Vec<VoiceRegion>, RestError>;
}
