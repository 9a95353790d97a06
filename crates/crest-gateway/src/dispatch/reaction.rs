//! Reaction handlers: add, remove, remove-all, remove-emoji
//!
//! Reaction counts only exist on cached messages; for evicted messages the
//! notification still carries the raw event coordinates.

use serde_json::Value;

use crest_core::EngineResult;

use super::decode;
use crate::engine::GatewayEngine;
use crate::events::payloads::{
    ReactionPayload, ReactionRemoveAllPayload, ReactionRemoveEmojiPayload,
};
use crate::events::{EventName, GatewayEvent};

impl GatewayEngine {
    pub(super) async fn handle_reaction_add(&self, payload: Value) -> EngineResult<()> {
        let incoming: ReactionPayload = decode(EventName::MessageReactionAdd, payload)?;
        let emote = incoming.emoji.into_emote();
        let me = self.current_user_id() == Some(incoming.user_id);

        let message_id = incoming.message_id;
        let message = self.messages.try_get(&|m| m.id == message_id);
        if let Some(handle) = &message {
            handle.write().add_reaction(&emote, me);
        }

        self.bus
            .dispatch(GatewayEvent::ReactionAdd {
                user_id: incoming.user_id,
                channel_id: incoming.channel_id,
                message_id: incoming.message_id,
                guild_id: incoming.guild_id,
                emote,
                message,
            })
            .await;
        Ok(())
    }

    pub(super) async fn handle_reaction_remove(&self, payload: Value) -> EngineResult<()> {
        let incoming: ReactionPayload = decode(EventName::MessageReactionRemove, payload)?;
        let emote = incoming.emoji.into_emote();
        let me = self.current_user_id() == Some(incoming.user_id);

        let message_id = incoming.message_id;
        let message = self.messages.try_get(&|m| m.id == message_id);
        match &message {
            Some(handle) => handle.write().remove_reaction(&emote, me),
            // Only worth a log line when the race involves someone else
            None if !me => {
                tracing::debug!(message = %message_id, "reaction removed from uncached message");
            }
            None => {}
        }

        self.bus
            .dispatch(GatewayEvent::ReactionRemove {
                user_id: incoming.user_id,
                channel_id: incoming.channel_id,
                message_id: incoming.message_id,
                guild_id: incoming.guild_id,
                emote,
                message,
            })
            .await;
        Ok(())
    }

    pub(super) async fn handle_reaction_remove_all(&self, payload: Value) -> EngineResult<()> {
        let incoming: ReactionRemoveAllPayload =
            decode(EventName::MessageReactionRemoveAll, payload)?;

        let message_id = incoming.message_id;
        let message = self.messages.try_get(&|m| m.id == message_id);
        if let Some(handle) = &message {
            handle.write().clear_reactions();
        }

        self.bus
            .dispatch(GatewayEvent::ReactionRemoveAll {
                channel_id: incoming.channel_id,
                message_id: incoming.message_id,
                guild_id: incoming.guild_id,
                message,
            })
            .await;
        Ok(())
    }

    pub(super) async fn handle_reaction_remove_emoji(&self, payload: Value) -> EngineResult<()> {
        let incoming: ReactionRemoveEmojiPayload =
            decode(EventName::MessageReactionRemoveEmoji, payload)?;
        let emote = incoming.emoji.into_emote();

        let message_id = incoming.message_id;
        let message = self.messages.try_get(&|m| m.id == message_id);
        if let Some(handle) = &message {
            handle.write().remove_reaction_emote(&emote);
        }

        self.bus
            .dispatch(GatewayEvent::ReactionRemoveEmoji {
                channel_id: incoming.channel_id,
                message_id: incoming.message_id,
                guild_id: incoming.guild_id,
                emote,
                message,
            })
            .await;
        Ok(())
    }
}
