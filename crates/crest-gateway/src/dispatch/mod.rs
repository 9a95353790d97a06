//! Event router and per-event handlers
//!
//! The transport collaborator feeds named JSON payloads in arrival order;
//! the router decodes and applies each one, then emits exactly one
//! notification through the bus. No failure escapes `dispatch`: malformed
//! payloads are logged and skipped, unknown names are forwarded raw.

mod channel;
mod connection;
mod guild;
mod interaction;
mod invite;
mod member;
mod message;
mod presence;
mod reaction;
mod role;
mod stage;
mod voice;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crest_core::{EngineError, EngineResult};

use crate::engine::GatewayEngine;
use crate::events::{EventName, GatewayEvent};

impl GatewayEngine {
    /// Apply one gateway event to the cache and notify subscribers
    ///
    /// Suspends until every subscriber for the emitted notification has
    /// completed, keeping the event stream ordered end to end.
    pub async fn dispatch(&self, name: &str, payload: Value) {
        if !payload.is_object() {
            tracing::debug!(event = name, "discarding non-object payload");
            return;
        }

        let Some(event) = EventName::parse(name) else {
            tracing::warn!(event = name, "unknown event name");
            self.bus
                .dispatch(GatewayEvent::Unknown {
                    name: name.to_string(),
                    payload,
                })
                .await;
            return;
        };

        tracing::trace!(event = %event, "dispatching");
        let result = match event {
            EventName::Ready => self.handle_ready(payload).await,
            EventName::Resumed => self.handle_resumed().await,
            EventName::UserUpdate => self.handle_user_update(payload).await,

            EventName::GuildCreate => self.handle_guild_create(payload).await,
            EventName::GuildUpdate => self.handle_guild_update(payload).await,
            EventName::GuildDelete => self.handle_guild_delete(payload).await,
            EventName::GuildEmojisUpdate => self.handle_guild_emojis_update(payload).await,
            EventName::GuildStickersUpdate => self.handle_guild_stickers_update(payload).await,

            EventName::GuildRoleCreate => self.handle_role_create(payload).await,
            EventName::GuildRoleUpdate => self.handle_role_update(payload).await,
            EventName::GuildRoleDelete => self.handle_role_delete(payload).await,

            EventName::ChannelCreate => self.handle_channel_create(payload).await,
            EventName::ChannelUpdate => self.handle_channel_update(payload).await,
            EventName::ChannelDelete => self.handle_channel_delete(payload).await,

            EventName::GuildMemberAdd => self.handle_member_add(payload).await,
            EventName::GuildMemberUpdate => self.handle_member_update(payload).await,
            EventName::GuildMemberRemove => self.handle_member_remove(payload).await,
            EventName::GuildMembersChunk => self.handle_member_chunk(payload).await,

            EventName::MessageCreate => self.handle_message_create(payload).await,
            EventName::MessageUpdate => self.handle_message_update(payload).await,
            EventName::MessageDelete => self.handle_message_delete(payload).await,
            EventName::MessageDeleteBulk => self.handle_message_delete_bulk(payload).await,

            EventName::MessageReactionAdd => self.handle_reaction_add(payload).await,
            EventName::MessageReactionRemove => self.handle_reaction_remove(payload).await,
            EventName::MessageReactionRemoveAll => {
                self.handle_reaction_remove_all(payload).await
            }
            EventName::MessageReactionRemoveEmoji => {
                self.handle_reaction_remove_emoji(payload).await
            }

            EventName::PresenceUpdate => self.handle_presence_update(payload).await,
            EventName::TypingStart => self.handle_typing_start(payload).await,

            EventName::VoiceStateUpdate => self.handle_voice_state_update(payload).await,

            EventName::InviteCreate => self.handle_invite_create(payload).await,
            EventName::InviteDelete => self.handle_invite_delete(payload).await,

            EventName::StageInstanceCreate => self.handle_stage_create(payload).await,
            EventName::StageInstanceUpdate => self.handle_stage_update(payload).await,
            EventName::StageInstanceDelete => self.handle_stage_delete(payload).await,

            EventName::IntegrationCreate => self.handle_integration_create(payload).await,
            EventName::IntegrationUpdate => self.handle_integration_update(payload).await,
            EventName::IntegrationDelete => self.handle_integration_delete(payload).await,

            EventName::InteractionCreate => self.handle_interaction_create(payload).await,
            EventName::ApplicationCommandCreate => self.handle_command_create(payload).await,
            EventName::ApplicationCommandUpdate => self.handle_command_update(payload).await,
            EventName::ApplicationCommandDelete => self.handle_command_delete(payload).await,
        };

        if let Err(error) = result {
            tracing::error!(event = %event, %error, "event handler failed");
        }
    }

    /// Recompute aggregate guild availability, firing the one-shot
    /// download-complete notification on the first all-available transition
    pub(crate) async fn sync_availability(&self) {
        if self.availability.note_sync(&self.store) {
            tracing::info!(guilds = self.store.guild_count(), "guild download complete");
            self.bus
                .dispatch(GatewayEvent::GuildDownloadComplete {
                    guilds: self.store.guilds(),
                })
                .await;
        }
    }
}

/// Decode one event payload, tagging failures with the event name
pub(crate) fn decode<T: DeserializeOwned>(event: EventName, payload: Value) -> EngineResult<T> {
    serde_json::from_value(payload).map_err(|source| EngineError::malformed(event.as_str(), source))
}

#[cfg(test)]
mod tests {
    use crate::testing::{collect_events, engine};
    use crate::events::{EventKind, GatewayEvent};
    use serde_json::json;

    #[tokio::test]
    async fn test_unknown_event_is_forwarded_raw_exactly_once() {
        let engine = engine();
        let unknowns = collect_events(&engine, EventKind::Unknown);

        engine
            .dispatch("foo_bar_baz", json!({ "anything": true }))
            .await;

        let unknowns = unknowns.lock();
        assert_eq!(unknowns.len(), 1);
        match unknowns.first().map(std::sync::Arc::as_ref) {
            Some(GatewayEvent::Unknown { name, payload }) => {
                assert_eq!(name, "foo_bar_baz");
                assert_eq!(payload["anything"], true);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_payload_is_absorbed() {
        let engine = engine();
        let creates = collect_events(&engine, EventKind::GuildCreate);

        // "id" must be a snowflake, not an object
        engine
            .dispatch("GUILD_CREATE", json!({ "id": { "nested": true } }))
            .await;

        assert!(engine.guilds().is_empty());
        assert!(creates.lock().is_empty());
    }

    #[tokio::test]
    async fn test_non_object_payload_is_discarded() {
        let engine = engine();
        let unknowns = collect_events(&engine, EventKind::Unknown);

        engine.dispatch("GUILD_CREATE", json!(null)).await;
        engine.dispatch("foo_bar_baz", json!(42)).await;

        assert!(engine.guilds().is_empty());
        assert!(unknowns.lock().is_empty());
    }

    #[tokio::test]
    async fn test_case_insensitive_routing() {
        let engine = engine();
        engine
            .dispatch(
                "guild_create",
                json!({ "id": "1", "name": "g", "owner_id": "9" }),
            )
            .await;
        assert_eq!(engine.guilds().len(), 1);
    }
}
