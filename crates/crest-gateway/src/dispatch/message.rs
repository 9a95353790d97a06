//! Message handlers: create, update, delete, bulk delete
//!
//! Messages live in the bounded cache collaborator; everything here
//! tolerates the cache having already evicted the message in question.

use serde_json::Value;

use crest_core::{shared, EngineResult, Message};

use super::decode;
use crate::engine::GatewayEngine;
use crate::events::payloads::{MessageDeleteBulkPayload, MessageDeletePayload, MessagePayload};
use crate::events::{EventName, GatewayEvent};

impl GatewayEngine {
    pub(super) async fn handle_message_create(&self, payload: Value) -> EngineResult<()> {
        let incoming: MessagePayload = decode(EventName::MessageCreate, payload)?;
        if let Some(author) = incoming.author.clone() {
            self.canonical_user(author);
        }

        let message = shared(incoming.into_message());
        self.messages.insert(message.clone());

        self.bus
            .dispatch(GatewayEvent::MessageCreate { message })
            .await;
        Ok(())
    }

    pub(super) async fn handle_message_update(&self, payload: Value) -> EngineResult<()> {
        let incoming: MessagePayload = decode(EventName::MessageUpdate, payload)?;
        let id = incoming.id;

        let (before, after) = match self.messages.try_get(&|m| m.id == id) {
            Some(handle) => {
                let before = handle.read().clone();
                incoming.apply_to(&mut handle.write());
                (Some(before), handle.read().clone())
            }
            // Evicted or never cached: the partial payload is all we have
            None => (None, incoming.into_message()),
        };

        self.bus
            .dispatch(GatewayEvent::MessageUpdate { before, after })
            .await;
        Ok(())
    }

    pub(super) async fn handle_message_delete(&self, payload: Value) -> EngineResult<()> {
        let incoming: MessageDeletePayload = decode(EventName::MessageDelete, payload)?;
        let id = incoming.id;

        let evicted: Option<Message> = self
            .messages
            .remove(&|m| m.id == id)
            .map(|handle| handle.read().clone());

        self.bus
            .dispatch(GatewayEvent::MessageDelete {
                message_id: incoming.id,
                channel_id: incoming.channel_id,
                guild_id: incoming.guild_id,
                message: evicted,
            })
            .await;
        Ok(())
    }

    pub(super) async fn handle_message_delete_bulk(&self, payload: Value) -> EngineResult<()> {
        let incoming: MessageDeleteBulkPayload = decode(EventName::MessageDeleteBulk, payload)?;

        let mut recovered = Vec::new();
        for id in &incoming.ids {
            let id = *id;
            if let Some(handle) = self.messages.remove(&|m| m.id == id) {
                recovered.push(handle.read().clone());
            }
        }

        self.bus
            .dispatch(GatewayEvent::MessageDeleteBulk {
                ids: incoming.ids,
                channel_id: incoming.channel_id,
                guild_id: incoming.guild_id,
                messages: recovered,
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

    fn message(id: u64, content: &str) -> serde_json::Value {
        json!({
            "id": id.to_string(),
            "channel_id": "2",
            "author": { "id": "3", "username": "alice" },
            "content": content,
            "timestamp": "2024-05-01T12:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_message_update_carries_before_and_after() {
        let engine = engine();
        engine.dispatch("MESSAGE_CREATE", message(1, "hello")).await;

        let updates = collect_events(&engine, EventKind::MessageUpdate);
        engine
            .dispatch(
                "MESSAGE_UPDATE",
                json!({ "id": "1", "channel_id": "2", "content": "edited" }),
            )
            .await;

        let updates = updates.lock();
        match updates.first().map(std::sync::Arc::as_ref) {
            Some(GatewayEvent::MessageUpdate { before, after }) => {
                assert_eq!(before.as_ref().unwrap().content, "hello");
                assert_eq!(after.content, "edited");
                // The pre-edit snapshot keeps fields the update omitted
                assert!(after.timestamp.is_some());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bulk_delete_recovers_cached_subset() {
        let engine = engine();
        engine.dispatch("MESSAGE_CREATE", message(1, "a")).await;
        engine.dispatch("MESSAGE_CREATE", message(2, "b")).await;

        let deletes = collect_events(&engine, EventKind::MessageDeleteBulk);
        engine
            .dispatch(
                "MESSAGE_DELETE_BULK",
                json!({ "ids": ["1", "2", "3"], "channel_id": "2" }),
            )
            .await;

        let deletes = deletes.lock();
        match deletes.first().map(std::sync::Arc::as_ref) {
            Some(GatewayEvent::MessageDeleteBulk { ids, messages, .. }) => {
                assert_eq!(ids.len(), 3);
                assert_eq!(messages.len(), 2);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert!(engine.messages.try_get(&|m| m.id == Snowflake::new(1)).is_none());
    }

    #[tokio::test]
    async fn test_delete_of_uncached_message_still_notifies() {
        let engine = engine();
        let deletes = collect_events(&engine, EventKind::MessageDelete);

        engine
            .dispatch(
                "MESSAGE_DELETE",
                json!({ "id": "404", "channel_id": "2" }),
            )
            .await;

        let deletes = deletes.lock();
        match deletes.first().map(std::sync::Arc::as_ref) {
            Some(GatewayEvent::MessageDelete { message_id, message, .. }) => {
                assert_eq!(*message_id, Snowflake::new(404));
                assert!(message.is_none());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
