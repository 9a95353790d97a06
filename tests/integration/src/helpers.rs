//! Test helpers: stub collaborators and an engine harness

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crest_common::EngineConfig;
use crest_core::{Snowflake, User, VoiceRegion};
use crest_gateway::{
    CurrentApplication, EventKind, GatewayEngine, GatewayEvent, RestClient, RestError,
};

/// REST collaborator serving canned identity data
pub struct StubRest;

#[async_trait]
impl RestClient for StubRest {
    async fn fetch_current_user(&self) -> Result<User, RestError> {
        Ok(User::new(Snowflake::new(1), "bot".to_string()))
    }

    async fn fetch_current_application(&self) -> Result<CurrentApplication, RestError> {
        Ok(CurrentApplication {
            id: Snowflake::new(99),
            name: "integration".to_string(),
            description: String::new(),
            flags: 0,
        })
    }

    async fn list_voice_regions(&self) -> Result<Vec<VoiceRegion>, RestError> {
        Ok(vec![VoiceRegion {
            id: "eu-central".to_string(),
            name: "Central Europe".to_string(),
            optimal: true,
            deprecated: false,
        }])
    }
}

/// Engine wrapper used by every integration test
pub struct TestEngine {
    pub engine: GatewayEngine,
}

impl TestEngine {
    /// Engine with defaults and a stub REST collaborator
    pub fn new() -> Self {
        Self::with_config(&config_with_capacity(128))
    }

    /// Engine with an explicit configuration
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            engine: GatewayEngine::new(config, Arc::new(StubRest)),
        }
    }

    /// Engine that already completed `startup`
    pub async fn started() -> Self {
        let harness = Self::new();
        harness
            .engine
            .startup()
            .await
            .expect("stub startup never fails");
        harness
    }

    /// Record every notification of one kind
    pub fn record(&self, kind: EventKind) -> Arc<Mutex<Vec<Arc<GatewayEvent>>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        self.engine.subscribe(kind, move |event| {
            let sink = sink.clone();
            Box::pin(async move {
                sink.lock().push(event);
                Ok(())
            })
        });
        seen
    }
}

impl Default for TestEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Engine configuration with a given message cache capacity
pub fn config_with_capacity(message_capacity: usize) -> EngineConfig {
    let mut config = EngineConfig::default();
    config.cache.message_capacity = message_capacity;
    config
}
