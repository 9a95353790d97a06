//! Guild lifecycle handlers: create, update, delete, emoji/sticker sync

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use serde_json::Value;

use crest_core::{shared, EngineResult, Guild};
use crest_state::CachedGuild;

use super::decode;
use crate::engine::GatewayEngine;
use crate::events::payloads::{
    GuildDeletePayload, GuildEmojisUpdatePayload, GuildPayload, GuildStickersUpdatePayload,
};
use crate::events::{EventName, GatewayEvent};

impl GatewayEngine {
    pub(super) async fn handle_guild_create(&self, payload: Value) -> EngineResult<()> {
        let incoming: GuildPayload = decode(EventName::GuildCreate, payload)?;
        let unavailable = incoming.unavailable.unwrap_or(false);

        let (cached, known_before) = match self.store.guild(incoming.id) {
            Some(existing) => {
                existing.update(|g| *g = incoming.to_guild());
                existing.set_unavailable(unavailable);
                (existing, true)
            }
            None => {
                let created = Arc::new(CachedGuild::new(incoming.to_guild(), unavailable));
                self.store.insert_guild(created.clone());
                (created, false)
            }
        };

        self.link_guild(&cached, incoming);

        // A create for a guild announced at READY is a sync, not a join
        let event = if known_before {
            GatewayEvent::GuildAvailable { guild: cached }
        } else {
            GatewayEvent::GuildCreate { guild: cached }
        };
        self.bus.dispatch(event).await;
        self.sync_availability().await;
        Ok(())
    }

    pub(super) async fn handle_guild_update(&self, payload: Value) -> EngineResult<()> {
        let incoming: GuildPayload = decode(EventName::GuildUpdate, payload)?;

        let (before, cached) = match self.store.guild(incoming.id) {
            Some(existing) => {
                let before = existing.snapshot();
                existing.update(|g| *g = incoming.to_guild());
                (Some(before), existing)
            }
            None => {
                tracing::debug!(guild = %incoming.id, "update for unknown guild");
                let created = Arc::new(CachedGuild::new(incoming.to_guild(), false));
                self.store.insert_guild(created.clone());
                (None, created)
            }
        };

        self.link_guild(&cached, incoming);
        self.bus
            .dispatch(GatewayEvent::GuildUpdate {
                before,
                guild: cached,
            })
            .await;
        Ok(())
    }

    pub(super) async fn handle_guild_delete(&self, payload: Value) -> EngineResult<()> {
        let incoming: GuildDeletePayload = decode(EventName::GuildDelete, payload)?;

        if incoming.unavailable {
            match self.store.guild(incoming.id) {
                Some(existing) => existing.set_unavailable(true),
                None => self.store.insert_guild(Arc::new(CachedGuild::new(
                    Guild::phantom(incoming.id),
                    true,
                ))),
            }
            tracing::debug!(guild = %incoming.id, "guild became unavailable");
            self.bus
                .dispatch(GatewayEvent::GuildUnavailable {
                    guild_id: incoming.id,
                })
                .await;
            return Ok(());
        }

        let guild = self.store.remove_guild(incoming.id);
        if guild.is_none() {
            // Tolerated race: the guild already departed
            tracing::debug!(guild = %incoming.id, "delete for unknown guild");
        }
        self.bus
            .dispatch(GatewayEvent::GuildDelete {
                guild_id: incoming.id,
                guild,
            })
            .await;
        Ok(())
    }

    pub(super) async fn handle_guild_emojis_update(&self, payload: Value) -> EngineResult<()> {
        let incoming: GuildEmojisUpdatePayload = decode(EventName::GuildEmojisUpdate, payload)?;

        let after: Vec<_> = incoming
            .emojis
            .into_iter()
            .filter_map(|e| e.into_emoji(incoming.guild_id))
            .collect();
        let before = match self.store.guild(incoming.guild_id) {
            Some(guild) => guild.replace_emojis(after.clone()),
            None => Vec::new(),
        };

        self.bus
            .dispatch(GatewayEvent::EmojisUpdate {
                guild_id: incoming.guild_id,
                before,
                after,
            })
            .await;
        Ok(())
    }

    pub(super) async fn handle_guild_stickers_update(&self, payload: Value) -> EngineResult<()> {
        let incoming: GuildStickersUpdatePayload = decode(EventName::GuildStickersUpdate, payload)?;

        let after: Vec<_> = incoming
            .stickers
            .into_iter()
            .map(|s| s.into_sticker(incoming.guild_id))
            .collect();
        let before = match self.store.guild(incoming.guild_id) {
            Some(guild) => guild.replace_stickers(after.clone()),
            None => Vec::new(),
        };

        self.bus
            .dispatch(GatewayEvent::StickersUpdate {
                guild_id: incoming.guild_id,
                before,
                after,
            })
            .await;
        Ok(())
    }

    /// Link a guild payload's child collections into the cached aggregate
    ///
    /// Existing entries are mutated in place so external holders observe
    /// the sync; unseen entries are inserted fresh.
    fn link_guild(&self, cached: &Arc<CachedGuild>, payload: GuildPayload) {
        let guild_id = cached.id();

        for role_payload in payload.roles {
            let role = role_payload.into_role(guild_id);
            match cached.roles.entry(role.id) {
                Entry::Occupied(entry) => *entry.get().write() = role,
                Entry::Vacant(entry) => {
                    entry.insert(shared(role));
                }
            }
        }

        for channel_payload in payload.channels {
            let channel = channel_payload.into_channel(Some(guild_id));
            match cached.channels.entry(channel.id) {
                Entry::Occupied(entry) => *entry.get().write() = channel,
                Entry::Vacant(entry) => {
                    entry.insert(shared(channel));
                }
            }
        }

        for member_payload in payload.members {
            let Some(user_payload) = member_payload.user.clone() else {
                continue;
            };
            let user = if user_payload.is_full() {
                self.users.merge_update(user_payload.into_user())
            } else {
                self.users.get_or_create(user_payload.id)
            };
            let member = cached.get_or_create_member(user);
            member_payload.apply_to(&mut member.write());
        }

        for voice_payload in payload.voice_states {
            let state = voice_payload.into_state(Some(guild_id));
            cached.voice_states.insert(state.user_id, state);
        }

        for presence_payload in payload.presences {
            if presence_payload.user.is_full() {
                self.users
                    .merge_update(presence_payload.user.clone().into_user());
            }
            self.presences.update(presence_payload.into_presence());
        }

        for stage_payload in payload.stage_instances {
            let stage = stage_payload.into_stage(guild_id);
            cached.stage_instances.insert(stage.id, stage);
        }

        if !payload.emojis.is_empty() {
            cached.replace_emojis(
                payload
                    .emojis
                    .into_iter()
                    .filter_map(|e| e.into_emoji(guild_id))
                    .collect(),
            );
        }
        if !payload.stickers.is_empty() {
            cached.replace_stickers(
                payload
                    .stickers
                    .into_iter()
                    .map(|s| s.into_sticker(guild_id))
                    .collect(),
            );
        }

        match payload.member_count {
            Some(count) => cached.set_member_count(count),
            None if !cached.members.is_empty() => cached.reconcile_member_count(),
            None => {}
        }
    }
}
