//! Role handlers: create, update, delete

use serde_json::Value;

use crest_core::{shared, EngineResult};

use super::decode;
use crate::engine::GatewayEngine;
use crate::events::payloads::{RoleDeletePayload, RoleEventPayload};
use crate::events::{EventName, GatewayEvent};

impl GatewayEngine {
    pub(super) async fn handle_role_create(&self, payload: Value) -> EngineResult<()> {
        let incoming: RoleEventPayload = decode(EventName::GuildRoleCreate, payload)?;
        let role = incoming.role.into_role(incoming.guild_id);
        let handle = shared(role);

        match self.store.guild(incoming.guild_id) {
            Some(guild) => {
                guild.roles.insert(handle.read().id, handle.clone());
            }
            None => {
                tracing::debug!(guild = %incoming.guild_id, "role create for unknown guild");
            }
        }

        self.bus
            .dispatch(GatewayEvent::RoleCreate {
                guild_id: incoming.guild_id,
                role: handle,
            })
            .await;
        Ok(())
    }

    pub(super) async fn handle_role_update(&self, payload: Value) -> EngineResult<()> {
        let incoming: RoleEventPayload = decode(EventName::GuildRoleUpdate, payload)?;
        let role = incoming.role.into_role(incoming.guild_id);

        let existing = self
            .store
            .guild(incoming.guild_id)
            .and_then(|g| g.roles.get(&role.id).map(|r| r.value().clone()));

        let (before, handle) = match existing {
            Some(handle) => {
                let before = handle.read().clone();
                *handle.write() = role;
                (Some(before), handle)
            }
            None => {
                let handle = shared(role);
                if let Some(guild) = self.store.guild(incoming.guild_id) {
                    guild.roles.insert(handle.read().id, handle.clone());
                }
                (None, handle)
            }
        };

        self.bus
            .dispatch(GatewayEvent::RoleUpdate {
                guild_id: incoming.guild_id,
                before,
                role: handle,
            })
            .await;
        Ok(())
    }

    pub(super) async fn handle_role_delete(&self, payload: Value) -> EngineResult<()> {
        let incoming: RoleDeletePayload = decode(EventName::GuildRoleDelete, payload)?;

        let evicted = self
            .store
            .guild(incoming.guild_id)
            .and_then(|g| g.roles.remove(&incoming.role_id).map(|(_, r)| r));

        self.bus
            .dispatch(GatewayEvent::RoleDelete {
                guild_id: incoming.guild_id,
                role_id: incoming.role_id,
                role: evicted.map(|r| r.read().clone()),
            })
            .await;
        Ok(())
    }
}
