//! Shared fixtures for handler unit tests

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crest_core::{Snowflake, User, VoiceRegion};
use crest_state::BoundedMessageCache;

use crate::engine::GatewayEngine;
use crate::events::{EventKind, GatewayEvent};
use crate::rest::{CurrentApplication, RestClient, RestError};

/// REST collaborator returning canned data
pub(crate) struct StubRest;

#[async_trait]
impl RestClient for StubRest {
    async fn fetch_current_user(&self) -> Result<User, RestError> {
        Ok(User::new(Snowflake::new(1), "bot".to_string()))
    }

    async fn fetch_current_application(&self) -> Result<CurrentApplication, RestError> {
        Ok(CurrentApplication {
            id: Snowflake::new(99),
            name: "stub".to_string(),
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

/// Engine with a stub REST collaborator and a small message cache
pub(crate) fn engine() -> GatewayEngine {
    GatewayEngine::with_message_store(Arc::new(StubRest), Arc::new(BoundedMessageCache::new(64)))
}

/// Record every notification of one kind as it is dispatched
pub(crate) fn collect_events(
    engine: &GatewayEngine,
    kind: EventKind,
) -> Arc<Mutex<Vec<Arc<GatewayEvent>>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    engine.subscribe(kind, move |event| {
        let sink = sink.clone();
        Box::pin(async move {
            sink.lock().push(event);
            Ok(())
        })
    });
    seen
}
