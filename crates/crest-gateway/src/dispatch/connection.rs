//! Session lifecycle handlers: READY, RESUMED, USER_UPDATE

use std::sync::Arc;

use serde_json::Value;

use crest_core::{EngineResult, Guild};
use crest_state::CachedGuild;

use super::decode;
use crate::engine::GatewayEngine;
use crate::events::payloads::{ReadyPayload, UserPayload};
use crate::events::{EventName, GatewayEvent};

impl GatewayEngine {
    pub(super) async fn handle_ready(&self, payload: Value) -> EngineResult<()> {
        let ready: ReadyPayload = decode(EventName::Ready, payload)?;

        let user = self.users.merge_update(ready.user.into_user());
        *self.current_user.write() = Some(user.clone());

        // A READY starts a fresh session; the download latch starts over
        self.availability.reset();

        let mut guild_ids = Vec::with_capacity(ready.guilds.len());
        for stub in &ready.guilds {
            guild_ids.push(stub.id);
            match self.store.guild(stub.id) {
                Some(existing) => existing.set_unavailable(stub.unavailable),
                None => self.store.insert_guild(Arc::new(CachedGuild::new(
                    Guild::phantom(stub.id),
                    stub.unavailable,
                ))),
            }
        }

        tracing::info!(
            user = %user.read().tag(),
            guilds = guild_ids.len(),
            "session ready"
        );
        self.bus
            .dispatch(GatewayEvent::Ready {
                user,
                session_id: ready.session_id,
                guild_ids,
            })
            .await;

        // With no guilds announced, the download is vacuously complete
        self.sync_availability().await;
        Ok(())
    }

    pub(super) async fn handle_resumed(&self) -> EngineResult<()> {
        tracing::debug!("session resumed");
        self.bus.dispatch(GatewayEvent::Resumed).await;
        Ok(())
    }

    pub(super) async fn handle_user_update(&self, payload: Value) -> EngineResult<()> {
        let incoming: UserPayload = decode(EventName::UserUpdate, payload)?;

        let before = self.users.get(incoming.id).map(|u| u.read().clone());
        let user = self.users.merge_update(incoming.into_user());
        *self.current_user.write() = Some(user.clone());

        self.bus
            .dispatch(GatewayEvent::UserUpdate { before, user })
            .await;
        Ok(())
    }
}
