//! Channel handlers: create, update, delete
//!
//! Private channels live on the engine-level store; guild channels live in
//! their owning aggregate.

use serde_json::Value;

use crest_core::{shared, Channel, EngineResult, Shared, Snowflake};

use super::decode;
use crate::engine::GatewayEngine;
use crate::events::payloads::ChannelPayload;
use crate::events::{EventName, GatewayEvent};

impl GatewayEngine {
    pub(super) async fn handle_channel_create(&self, payload: Value) -> EngineResult<()> {
        let incoming: ChannelPayload = decode(EventName::ChannelCreate, payload)?;
        let channel = incoming.into_channel(None);
        let handle = shared(channel);
        self.cache_channel(&handle);

        self.bus
            .dispatch(GatewayEvent::ChannelCreate { channel: handle })
            .await;
        Ok(())
    }

    pub(super) async fn handle_channel_update(&self, payload: Value) -> EngineResult<()> {
        let incoming: ChannelPayload = decode(EventName::ChannelUpdate, payload)?;
        let channel = incoming.into_channel(None);

        let (before, handle) = match self.lookup_channel(channel.guild_id, channel.id) {
            Some(existing) => {
                let before = existing.read().clone();
                *existing.write() = channel;
                (Some(before), existing)
            }
            None => {
                // First sighting; cache it and report no prior state
                let handle = shared(channel);
                self.cache_channel(&handle);
                (None, handle)
            }
        };

        self.bus
            .dispatch(GatewayEvent::ChannelUpdate {
                before,
                channel: handle,
            })
            .await;
        Ok(())
    }

    pub(super) async fn handle_channel_delete(&self, payload: Value) -> EngineResult<()> {
        let incoming: ChannelPayload = decode(EventName::ChannelDelete, payload)?;
        let fallback = incoming.into_channel(None);

        let evicted = match fallback.guild_id {
            Some(guild_id) => self
                .store
                .guild(guild_id)
                .and_then(|g| g.channels.remove(&fallback.id).map(|(_, c)| c)),
            None => self.store.remove_private_channel(fallback.id),
        };

        // An uncached channel still produces a payload-built notification
        let channel = evicted.map_or(fallback, |handle| handle.read().clone());
        self.bus
            .dispatch(GatewayEvent::ChannelDelete { channel })
            .await;
        Ok(())
    }

    fn cache_channel(&self, handle: &Shared<Channel>) {
        let (id, guild_id) = {
            let channel = handle.read();
            (channel.id, channel.guild_id)
        };
        match guild_id {
            Some(guild_id) => match self.store.guild(guild_id) {
                Some(guild) => {
                    guild.channels.insert(id, handle.clone());
                }
                None => {
                    tracing::debug!(channel = %id, guild = %guild_id, "channel for unknown guild");
                }
            },
            None => self.store.insert_private_channel(handle.clone()),
        }
    }

    fn lookup_channel(
        &self,
        guild_id: Option<Snowflake>,
        id: Snowflake,
    ) -> Option<Shared<Channel>> {
        match guild_id {
            Some(guild_id) => self
                .store
                .guild(guild_id)?
                .channels
                .get(&id)
                .map(|c| c.value().clone()),
            None => self.store.private_channel(id),
        }
    }
}
