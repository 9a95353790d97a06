//! Presence entity - a user's status and activity snapshot
//!
//! Presences live in a global map keyed by user id, last write wins.

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// User online status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Online,
    Idle,
    Dnd,
    #[default]
    Offline,
}

impl UserStatus {
    /// Check if this status should be visible to others
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !matches!(self, Self::Offline)
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Idle => write!(f, "idle"),
            Self::Dnd => write!(f, "dnd"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

/// Activity kind discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityKind {
    #[default]
    Playing,
    Streaming,
    Listening,
    Watching,
    Custom,
    Unknown(u8),
}

impl ActivityKind {
    /// Decode the numeric wire discriminator
    pub fn from_wire(value: u8) -> Self {
        match value {
            0 => Self::Playing,
            1 => Self::Streaming,
            2 => Self::Listening,
            3 => Self::Watching,
            4 => Self::Custom,
            other => Self::Unknown(other),
        }
    }
}

/// A single activity a user is engaged in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub name: String,
    pub kind: ActivityKind,
    pub url: Option<String>,
}

/// Presence snapshot for one user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presence {
    pub user_id: Snowflake,
    pub status: UserStatus,
    pub activities: Vec<Activity>,
}

impl Presence {
    /// Create a new Presence
    pub fn new(user_id: Snowflake, status: UserStatus) -> Self {
        Self {
            user_id,
            status,
            activities: Vec::new(),
        }
    }
}
