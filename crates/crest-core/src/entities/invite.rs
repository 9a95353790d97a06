//! Invite entity - keyed by code within its guild

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Guild invite entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invite {
    pub code: String,
    /// Non-owning back-reference; `None` for group-call invites
    pub guild_id: Option<Snowflake>,
    pub channel_id: Snowflake,
    pub inviter_id: Option<Snowflake>,
    pub uses: u32,
    pub max_uses: u32,
    pub max_age: u32,
    pub temporary: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl Invite {
    /// Create a new Invite
    pub fn new(code: String, channel_id: Snowflake) -> Self {
        Self {
            code,
            guild_id: None,
            channel_id,
            inviter_id: None,
            uses: 0,
            max_uses: 0,
            max_age: 0,
            temporary: false,
            created_at: None,
        }
    }

    /// Whether the invite has a use limit and has reached it
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.max_uses > 0 && self.uses >= self.max_uses
    }
}
