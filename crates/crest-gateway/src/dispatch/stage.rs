//! Stage instance handlers: create, update, delete

use serde_json::Value;

use crest_core::EngineResult;

use super::decode;
use crate::engine::GatewayEngine;
use crate::events::payloads::StageInstancePayload;
use crate::events::{EventName, GatewayEvent};

impl GatewayEngine {
    pub(super) async fn handle_stage_create(&self, payload: Value) -> EngineResult<()> {
        let incoming: StageInstancePayload = decode(EventName::StageInstanceCreate, payload)?;
        let guild_id = incoming.guild_id.unwrap_or_default();
        let stage = incoming.into_stage(guild_id);

        if let Some(guild) = self.store.guild(guild_id) {
            guild.stage_instances.insert(stage.id, stage.clone());
        }

        self.bus
            .dispatch(GatewayEvent::StageInstanceCreate { stage })
            .await;
        Ok(())
    }

    pub(super) async fn handle_stage_update(&self, payload: Value) -> EngineResult<()> {
        let incoming: StageInstancePayload = decode(EventName::StageInstanceUpdate, payload)?;
        let guild_id = incoming.guild_id.unwrap_or_default();
        let after = incoming.into_stage(guild_id);

        let before = self
            .store
            .guild(guild_id)
            .and_then(|guild| guild.stage_instances.insert(after.id, after.clone()));

        self.bus
            .dispatch(GatewayEvent::StageInstanceUpdate { before, after })
            .await;
        Ok(())
    }

    pub(super) async fn handle_stage_delete(&self, payload: Value) -> EngineResult<()> {
        let incoming: StageInstancePayload = decode(EventName::StageInstanceDelete, payload)?;
        let guild_id = incoming.guild_id.unwrap_or_default();
        let fallback = incoming.into_stage(guild_id);

        let evicted = self
            .store
            .guild(guild_id)
            .and_then(|guild| guild.stage_instances.remove(&fallback.id).map(|(_, s)| s));

        self.bus
            .dispatch(GatewayEvent::StageInstanceDelete {
                stage: evicted.unwrap_or(fallback),
            })
            .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{collect_events, engine};
    use crate::events::{EventKind, GatewayEvent};
    use crest_core::Snowflake;
    use serde_json::json;

    #[tokio::test]
    async fn test_stage_lifecycle() {
        let engine = engine();
        engine
            .dispatch(
                "GUILD_CREATE",
                json!({ "id": "1", "name": "g", "owner_id": "9" }),
            )
            .await;

        engine
            .dispatch(
                "STAGE_INSTANCE_CREATE",
                json!({ "id": "30", "guild_id": "1", "channel_id": "2", "topic": "launch" }),
            )
            .await;
        let guild = engine.guild(Snowflake::new(1)).unwrap();
        assert!(guild.stage_instances.contains_key(&Snowflake::new(30)));

        let updates = collect_events(&engine, EventKind::StageInstanceUpdate);
        engine
            .dispatch(
                "STAGE_INSTANCE_UPDATE",
                json!({ "id": "30", "guild_id": "1", "channel_id": "2", "topic": "q&a" }),
            )
            .await;
        let updates = updates.lock();
        match updates.first().map(std::sync::Arc::as_ref) {
            Some(GatewayEvent::StageInstanceUpdate { before, after }) => {
                assert_eq!(before.as_ref().unwrap().topic, "launch");
                assert_eq!(after.topic, "q&a");
            }
            other => panic!("unexpected event: {other:?}"),
        }
        drop(updates);

        engine
            .dispatch(
                "STAGE_INSTANCE_DELETE",
                json!({ "id": "30", "guild_id": "1", "channel_id": "2" }),
            )
            .await;
        assert!(guild.stage_instances.is_empty());
    }
}
