//! Member handlers: add, update, remove, chunk merge

use serde_json::Value;

use crest_core::{shared, EngineResult, Member, Shared, SharedUser};

use super::decode;
use crate::engine::GatewayEngine;
use crate::events::payloads::{
    GuildMemberEventPayload, GuildMemberRemovePayload, MemberChunkPayload, UserPayload,
};
use crate::events::{EventName, GatewayEvent, MemberChunk};

impl GatewayEngine {
    pub(super) async fn handle_member_add(&self, payload: Value) -> EngineResult<()> {
        let incoming: GuildMemberEventPayload = decode(EventName::GuildMemberAdd, payload)?;
        let Some(user_payload) = incoming.member.user.clone() else {
            tracing::debug!(guild = %incoming.guild_id, "member add without user");
            return Ok(());
        };

        let user = self.canonical_user(user_payload);
        let member = match self.store.guild(incoming.guild_id) {
            Some(guild) => {
                let newly_joined = guild.member(user.read().id).is_none();
                let member = guild.get_or_create_member(user);
                if newly_joined {
                    guild.increment_member_count();
                }
                member
            }
            // Referential miss: surface the member without caching it
            None => shared(Member::new(incoming.guild_id, user)),
        };
        incoming.member.apply_to(&mut member.write());

        self.bus
            .dispatch(GatewayEvent::MemberAdd {
                guild_id: incoming.guild_id,
                member,
            })
            .await;
        Ok(())
    }

    pub(super) async fn handle_member_update(&self, payload: Value) -> EngineResult<()> {
        let incoming: GuildMemberEventPayload = decode(EventName::GuildMemberUpdate, payload)?;
        let Some(user_payload) = incoming.member.user.clone() else {
            tracing::debug!(guild = %incoming.guild_id, "member update without user");
            return Ok(());
        };

        let user = self.canonical_user(user_payload);
        let (before, member) = match self.store.guild(incoming.guild_id) {
            Some(guild) => {
                let before = guild.member(user.read().id).map(|m| m.read().clone());
                (before, guild.get_or_create_member(user))
            }
            None => (None, shared(Member::new(incoming.guild_id, user))),
        };
        incoming.member.apply_to(&mut member.write());

        self.bus
            .dispatch(GatewayEvent::MemberUpdate {
                guild_id: incoming.guild_id,
                before,
                member,
            })
            .await;
        Ok(())
    }

    pub(super) async fn handle_member_remove(&self, payload: Value) -> EngineResult<()> {
        let incoming: GuildMemberRemovePayload = decode(EventName::GuildMemberRemove, payload)?;
        let user = self.canonical_user(incoming.user);

        let evicted = self.store.guild(incoming.guild_id).and_then(|guild| {
            let evicted = guild
                .members
                .remove(&user.read().id)
                .map(|(_, member)| member);
            if evicted.is_some() {
                guild.decrement_member_count();
            }
            evicted
        });

        self.bus
            .dispatch(GatewayEvent::MemberRemove {
                guild_id: incoming.guild_id,
                user,
                member: evicted,
            })
            .await;
        Ok(())
    }

    pub(super) async fn handle_member_chunk(&self, payload: Value) -> EngineResult<()> {
        let incoming: MemberChunkPayload = decode(EventName::GuildMembersChunk, payload)?;
        let guild = self.store.guild(incoming.guild_id);

        let mut members: Vec<Shared<Member>> = Vec::with_capacity(incoming.members.len());
        for member_payload in incoming.members {
            let Some(user_payload) = member_payload.user.clone() else {
                continue;
            };
            let user = self.canonical_user(user_payload);
            let member = match &guild {
                Some(guild) => guild.get_or_create_member(user),
                None => shared(Member::new(incoming.guild_id, user)),
            };
            member_payload.apply_to(&mut member.write());
            members.push(member);
        }

        for presence_payload in incoming.presences {
            self.presences.update(presence_payload.into_presence());
        }

        // The member map is authoritative after a merge
        if let Some(guild) = &guild {
            guild.reconcile_member_count();
        } else {
            tracing::debug!(guild = %incoming.guild_id, "chunk for unknown guild");
        }

        let chunk = MemberChunk {
            guild_id: incoming.guild_id,
            index: incoming.chunk_index,
            count: incoming.chunk_count,
            nonce: incoming.nonce,
            not_found: incoming.not_found,
            members,
        };
        tracing::debug!(
            guild = %chunk.guild_id,
            index = chunk.index,
            count = chunk.count,
            merged = chunk.members.len(),
            "member chunk merged"
        );
        self.bus.dispatch(GatewayEvent::MemberChunk(chunk)).await;
        Ok(())
    }

    /// Resolve the canonical user handle for an event-borne user payload
    ///
    /// Full payloads merge into the identity cache; partial ones only get a
    /// stand-in so they never overwrite durable display fields.
    pub(crate) fn canonical_user(&self, payload: UserPayload) -> SharedUser {
        if payload.is_full() {
            self.users.merge_update(payload.into_user())
        } else {
            self.users.get_or_create(payload.id)
        }
    }
}
