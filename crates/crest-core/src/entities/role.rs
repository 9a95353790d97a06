//! Role entity

use crate::value_objects::{Permissions, Snowflake};

/// Guild role entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: Snowflake,
    /// Non-owning back-reference to the owning guild
    pub guild_id: Snowflake,
    pub name: String,
    pub color: u32,
    pub position: i32,
    pub permissions: Permissions,
    pub hoist: bool,
    pub mentionable: bool,
    pub managed: bool,
}

impl Role {
    /// Create a new Role
    pub fn new(id: Snowflake, guild_id: Snowflake, name: String) -> Self {
        Self {
            id,
            guild_id,
            name,
            color: 0,
            position: 0,
            permissions: Permissions::empty(),
            hoist: false,
            mentionable: false,
            managed: false,
        }
    }

    /// The `@everyone` role shares its id with the guild
    #[inline]
    pub fn is_everyone(&self) -> bool {
        self.id == self.guild_id
    }
}
