//! Stage instance entity

use crate::value_objects::Snowflake;

/// Stage privacy level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrivacyLevel {
    Public,
    #[default]
    GuildOnly,
    Unknown(u8),
}

impl PrivacyLevel {
    /// Decode the numeric wire discriminator
    pub fn from_wire(value: u8) -> Self {
        match value {
            1 => Self::Public,
            2 => Self::GuildOnly,
            other => Self::Unknown(other),
        }
    }
}

/// A live stage inside a stage channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageInstance {
    pub id: Snowflake,
    /// Non-owning back-reference to the owning guild
    pub guild_id: Snowflake,
    pub channel_id: Snowflake,
    pub topic: String,
    pub privacy_level: PrivacyLevel,
}

impl StageInstance {
    /// Create a new StageInstance
    pub fn new(id: Snowflake, guild_id: Snowflake, channel_id: Snowflake, topic: String) -> Self {
        Self {
            id,
            guild_id,
            channel_id,
            topic,
            privacy_level: PrivacyLevel::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privacy_level_from_wire() {
        assert_eq!(PrivacyLevel::from_wire(1), PrivacyLevel::Public);
        assert_eq!(PrivacyLevel::from_wire(2), PrivacyLevel::GuildOnly);
        assert_eq!(PrivacyLevel::from_wire(7), PrivacyLevel::Unknown(7));
    }
}
