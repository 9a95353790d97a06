//! Presence and typing handlers

use serde_json::Value;

use crest_core::EngineResult;

use super::decode;
use crate::engine::GatewayEngine;
use crate::events::payloads::{PresencePayload, TypingStartPayload};
use crate::events::{EventName, GatewayEvent};

impl GatewayEngine {
    pub(super) async fn handle_presence_update(&self, payload: Value) -> EngineResult<()> {
        let incoming: PresencePayload = decode(EventName::PresenceUpdate, payload)?;
        let guild_id = incoming.guild_id;

        // Presence payloads often carry bare user ids; only full copies
        // may touch the identity cache
        if incoming.user.is_full() {
            self.users.merge_update(incoming.user.clone().into_user());
        }
        if let Some(guild) = guild_id.and_then(|id| self.store.guild(id)) {
            let user = self.users.get_or_create(incoming.user.id);
            guild.get_or_create_member(user);
        }

        let after = incoming.into_presence();
        let before = self.presences.update(after.clone());

        self.bus
            .dispatch(GatewayEvent::PresenceUpdate {
                guild_id,
                before,
                after,
            })
            .await;
        Ok(())
    }

    pub(super) async fn handle_typing_start(&self, payload: Value) -> EngineResult<()> {
        let incoming: TypingStartPayload = decode(EventName::TypingStart, payload)?;

        let member = incoming
            .guild_id
            .and_then(|id| self.store.guild(id))
            .map(|guild| {
                let user = match incoming.member.as_ref().and_then(|m| m.user.clone()) {
                    Some(user_payload) => self.canonical_user(user_payload),
                    None => self.users.get_or_create(incoming.user_id),
                };
                let member = guild.get_or_create_member(user);
                if let Some(member_payload) = &incoming.member {
                    member_payload.apply_to(&mut member.write());
                }
                member
            });

        self.bus
            .dispatch(GatewayEvent::TypingStart {
                channel_id: incoming.channel_id,
                guild_id: incoming.guild_id,
                user_id: incoming.user_id,
                timestamp: incoming.timestamp,
                member,
            })
            .await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{collect_events, engine};
    use crate::events::{EventKind, GatewayEvent};
    use crest_core::{Snowflake, UserStatus};
    use serde_json::json;

    async fn seed_guild(engine: &crate::engine::GatewayEngine) {
        engine
            .dispatch(
                "GUILD_CREATE",
                json!({ "id": "1", "name": "g", "owner_id": "9" }),
            )
            .await;
    }

    #[tokio::test]
    async fn test_presence_update_returns_replaced_snapshot() {
        let engine = engine();
        seed_guild(&engine).await;
        let updates = collect_events(&engine, EventKind::PresenceUpdate);

        engine
            .dispatch(
                "PRESENCE_UPDATE",
                json!({ "user": { "id": "5" }, "guild_id": "1", "status": "online" }),
            )
            .await;
        engine
            .dispatch(
                "PRESENCE_UPDATE",
                json!({ "user": { "id": "5" }, "guild_id": "1", "status": "idle" }),
            )
            .await;

        let updates = updates.lock();
        match updates.get(1).map(std::sync::Arc::as_ref) {
            Some(GatewayEvent::PresenceUpdate { before, after, .. }) => {
                assert_eq!(before.as_ref().unwrap().status, UserStatus::Online);
                assert_eq!(after.status, UserStatus::Idle);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_presence_synthesizes_phantom_member() {
        let engine = engine();
        seed_guild(&engine).await;

        engine
            .dispatch(
                "PRESENCE_UPDATE",
                json!({ "user": { "id": "5" }, "guild_id": "1", "status": "online" }),
            )
            .await;

        let guild = engine.guild(Snowflake::new(1)).unwrap();
        let member = guild.member(Snowflake::new(5)).unwrap();
        assert!(member.read().user.read().is_phantom());
    }

    #[tokio::test]
    async fn test_typing_synthesizes_phantom_member() {
        let engine = engine();
        seed_guild(&engine).await;
        let typing = collect_events(&engine, EventKind::TypingStart);

        engine
            .dispatch(
                "TYPING_START",
                json!({
                    "channel_id": "2",
                    "guild_id": "1",
                    "user_id": "5",
                    "timestamp": 1714564800
                }),
            )
            .await;

        let guild = engine.guild(Snowflake::new(1)).unwrap();
        assert!(guild.member(Snowflake::new(5)).is_some());

        let typing = typing.lock();
        match typing.first().map(std::sync::Arc::as_ref) {
            Some(GatewayEvent::TypingStart { member, .. }) => {
                assert!(member.is_some());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
