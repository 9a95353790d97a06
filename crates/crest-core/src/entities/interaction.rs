//! Interaction, application command and integration entities

use crate::value_objects::Snowflake;

/// Interaction kind discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionKind {
    Ping,
    #[default]
    ApplicationCommand,
    MessageComponent,
    Autocomplete,
    ModalSubmit,
    Unknown(u8),
}

impl InteractionKind {
    /// Decode the numeric wire discriminator
    pub fn from_wire(value: u8) -> Self {
        match value {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            3 => Self::MessageComponent,
            4 => Self::Autocomplete,
            5 => Self::ModalSubmit,
            other => Self::Unknown(other),
        }
    }
}

/// An incoming interaction (surfaced to subscribers, never cached)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    pub id: Snowflake,
    pub application_id: Snowflake,
    pub kind: InteractionKind,
    pub guild_id: Option<Snowflake>,
    pub channel_id: Option<Snowflake>,
    pub user_id: Option<Snowflake>,
}

/// A registered application command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationCommand {
    pub id: Snowflake,
    pub application_id: Snowflake,
    /// `None` for globally registered commands
    pub guild_id: Option<Snowflake>,
    pub name: String,
    pub description: String,
}

/// A third-party integration attached to a guild
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integration {
    pub id: Snowflake,
    /// Non-owning back-reference to the owning guild
    pub guild_id: Snowflake,
    pub name: String,
    pub kind: String,
    pub enabled: bool,
    pub application_id: Option<Snowflake>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interaction_kind_from_wire() {
        assert_eq!(InteractionKind::from_wire(2), InteractionKind::ApplicationCommand);
        assert_eq!(InteractionKind::from_wire(5), InteractionKind::ModalSubmit);
        assert_eq!(InteractionKind::from_wire(77), InteractionKind::Unknown(77));
    }
}
