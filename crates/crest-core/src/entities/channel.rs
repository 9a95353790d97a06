//! Channel entity and permission overwrites

use crate::value_objects::{Permissions, Snowflake};

/// Channel type discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChannelType {
    #[default]
    Text,
    Private,
    Voice,
    Category,
    News,
    Stage,
    /// Unrecognized wire value, preserved for forward compatibility
    Unknown(u8),
}

impl ChannelType {
    /// Decode the numeric wire discriminator
    pub fn from_wire(value: u8) -> Self {
        match value {
            0 => Self::Text,
            1 => Self::Private,
            2 => Self::Voice,
            4 => Self::Category,
            5 => Self::News,
            13 => Self::Stage,
            other => Self::Unknown(other),
        }
    }

    /// Whether this channel lives outside any guild
    #[inline]
    pub fn is_private(&self) -> bool {
        matches!(self, Self::Private)
    }
}

/// Target of a permission overwrite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteTarget {
    Role,
    Member,
}

/// A single permission overwrite on a channel
///
/// Back-references the owning channel by id; the overwrite never owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionOverwrite {
    pub channel_id: Snowflake,
    pub target_id: Snowflake,
    pub target: OverwriteTarget,
    pub allow: Permissions,
    pub deny: Permissions,
}

/// Channel entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub id: Snowflake,
    /// Non-owning back-reference; `None` for private channels
    pub guild_id: Option<Snowflake>,
    pub name: String,
    pub kind: ChannelType,
    pub position: i32,
    pub topic: Option<String>,
    pub parent_id: Option<Snowflake>,
    pub nsfw: bool,
    pub overwrites: Vec<PermissionOverwrite>,
}

impl Channel {
    /// Create a new Channel
    pub fn new(id: Snowflake, guild_id: Option<Snowflake>, name: String, kind: ChannelType) -> Self {
        Self {
            id,
            guild_id,
            name,
            kind,
            position: 0,
            topic: None,
            parent_id: None,
            nsfw: false,
            overwrites: Vec::new(),
        }
    }

    /// Look up the overwrite for a given target, if any
    pub fn overwrite_for(&self, target_id: Snowflake) -> Option<&PermissionOverwrite> {
        self.overwrites.iter().find(|o| o.target_id == target_id)
    }
}
