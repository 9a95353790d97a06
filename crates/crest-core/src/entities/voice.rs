//! Voice state and voice region entities

use crate::value_objects::Snowflake;

/// A user's voice connection state within a guild
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceState {
    /// Non-owning back-reference; `None` for private calls
    pub guild_id: Option<Snowflake>,
    /// `None` means the user is not connected to any channel
    pub channel_id: Option<Snowflake>,
    pub user_id: Snowflake,
    pub session_id: String,
    pub deaf: bool,
    pub mute: bool,
    pub self_deaf: bool,
    pub self_mute: bool,
    pub suppress: bool,
}

impl VoiceState {
    /// Whether this state represents an active channel connection
    #[inline]
    pub fn is_connected(&self) -> bool {
        self.channel_id.is_some()
    }
}

/// A voice region offered by the remote service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceRegion {
    pub id: String,
    pub name: String,
    pub optimal: bool,
    pub deprecated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_state_connection() {
        let mut state = VoiceState {
            guild_id: Some(Snowflake::new(1)),
            channel_id: Some(Snowflake::new(2)),
            user_id: Snowflake::new(3),
            session_id: "abc".to_string(),
            deaf: false,
            mute: false,
            self_deaf: false,
            self_mute: false,
            suppress: false,
        };
        assert!(state.is_connected());

        state.channel_id = None;
        assert!(!state.is_connected());
    }
}
