//! Interaction, application command and integration handlers
//!
//! Interactions and integrations are surfaced without caching; commands
//! live in the engine-level command map.

use serde_json::Value;

use crest_core::EngineResult;

use super::decode;
use crate::engine::GatewayEngine;
use crate::events::payloads::{
    CommandPayload, IntegrationDeletePayload, IntegrationPayload, InteractionPayload,
};
use crate::events::{EventName, GatewayEvent};

impl GatewayEngine {
    pub(super) async fn handle_interaction_create(&self, payload: Value) -> EngineResult<()> {
        let incoming: InteractionPayload = decode(EventName::InteractionCreate, payload)?;

        if let Some(user) = incoming.user.clone() {
            self.canonical_user(user);
        }
        if let (Some(guild), Some(member_payload)) = (
            incoming.guild_id.and_then(|id| self.store.guild(id)),
            incoming.member.clone(),
        ) {
            if let Some(user_payload) = member_payload.user.clone() {
                let user = self.canonical_user(user_payload);
                let member = guild.get_or_create_member(user);
                member_payload.apply_to(&mut member.write());
            }
        }

        self.bus
            .dispatch(GatewayEvent::InteractionCreate {
                interaction: incoming.into_interaction(),
            })
            .await;
        Ok(())
    }

    pub(super) async fn handle_command_create(&self, payload: Value) -> EngineResult<()> {
        let incoming: CommandPayload = decode(EventName::ApplicationCommandCreate, payload)?;
        let command = incoming.into_command();
        self.store.upsert_command(command.clone());

        self.bus
            .dispatch(GatewayEvent::CommandCreate { command })
            .await;
        Ok(())
    }

    pub(super) async fn handle_command_update(&self, payload: Value) -> EngineResult<()> {
        let incoming: CommandPayload = decode(EventName::ApplicationCommandUpdate, payload)?;
        let command = incoming.into_command();
        let before = self.store.upsert_command(command.clone());

        self.bus
            .dispatch(GatewayEvent::CommandUpdate { before, command })
            .await;
        Ok(())
    }

    pub(super) async fn handle_command_delete(&self, payload: Value) -> EngineResult<()> {
        let incoming: CommandPayload = decode(EventName::ApplicationCommandDelete, payload)?;
        let fallback = incoming.into_command();
        let command = self.store.remove_command(fallback.id).unwrap_or(fallback);

        self.bus
            .dispatch(GatewayEvent::CommandDelete { command })
            .await;
        Ok(())
    }

    pub(super) async fn handle_integration_create(&self, payload: Value) -> EngineResult<()> {
        let incoming: IntegrationPayload = decode(EventName::IntegrationCreate, payload)?;
        self.bus
            .dispatch(GatewayEvent::IntegrationCreate {
                integration: incoming.into_integration(),
            })
            .await;
        Ok(())
    }

    pub(super) async fn handle_integration_update(&self, payload: Value) -> EngineResult<()> {
        let incoming: IntegrationPayload = decode(EventName::IntegrationUpdate, payload)?;
        self.bus
            .dispatch(GatewayEvent::IntegrationUpdate {
                integration: incoming.into_integration(),
            })
            .await;
        Ok(())
    }

    pub(super) async fn handle_integration_delete(&self, payload: Value) -> EngineResult<()> {
        let incoming: IntegrationDeletePayload = decode(EventName::IntegrationDelete, payload)?;
        self.bus
            .dispatch(GatewayEvent::IntegrationDelete {
                guild_id: incoming.guild_id,
                integration_id: incoming.id,
                application_id: incoming.application_id,
            })
            .await;
        Ok(())
    }
}
