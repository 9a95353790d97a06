//! Invite handlers: create, delete

use serde_json::Value;

use crest_core::EngineResult;

use super::decode;
use crate::engine::GatewayEngine;
use crate::events::payloads::{InviteDeletePayload, InvitePayload};
use crate::events::{EventName, GatewayEvent};

impl GatewayEngine {
    pub(super) async fn handle_invite_create(&self, payload: Value) -> EngineResult<()> {
        let incoming: InvitePayload = decode(EventName::InviteCreate, payload)?;
        if let Some(inviter) = incoming.inviter.clone() {
            self.canonical_user(inviter);
        }

        let invite = incoming.into_invite();
        if let Some(guild) = invite.guild_id.and_then(|id| self.store.guild(id)) {
            guild.invites.insert(invite.code.clone(), invite.clone());
        }

        self.bus
            .dispatch(GatewayEvent::InviteCreate { invite })
            .await;
        Ok(())
    }

    pub(super) async fn handle_invite_delete(&self, payload: Value) -> EngineResult<()> {
        let incoming: InviteDeletePayload = decode(EventName::InviteDelete, payload)?;

        let evicted = incoming
            .guild_id
            .and_then(|id| self.store.guild(id))
            .and_then(|guild| guild.invites.remove(&incoming.code).map(|(_, i)| i));

        self.bus
            .dispatch(GatewayEvent::InviteDelete {
                guild_id: incoming.guild_id,
                channel_id: incoming.channel_id,
                code: incoming.code,
                invite: evicted,
            })
            .await;
        Ok(())
    }
}
