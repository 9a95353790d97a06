//! Voice state handler
//!
//! Any existing (guild, user) entry is removed and captured before the new
//! state lands; a null channel id records a leave, so nothing is
//! reinserted for it.

use serde_json::Value;

use crest_core::EngineResult;

use super::decode;
use crate::engine::GatewayEngine;
use crate::events::payloads::VoiceStatePayload;
use crate::events::{EventName, GatewayEvent};

impl GatewayEngine {
    pub(super) async fn handle_voice_state_update(&self, payload: Value) -> EngineResult<()> {
        let incoming: VoiceStatePayload = decode(EventName::VoiceStateUpdate, payload)?;
        let after = incoming.into_state(None);

        let before = match after.guild_id.and_then(|id| self.store.guild(id)) {
            Some(guild) => {
                let before = guild.take_voice_state(after.user_id);
                if after.is_connected() {
                    guild.voice_states.insert(after.user_id, after.clone());
                }
                before
            }
            None => None,
        };

        self.bus
            .dispatch(GatewayEvent::VoiceStateUpdate { before, after })
            .await;
        Ok(())
    }
}
