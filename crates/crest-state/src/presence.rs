//! Presence store - global user id to presence snapshot, last write wins

use dashmap::DashMap;

use crest_core::{Presence, Snowflake};

/// Global presence map, decoupled from guilds
#[derive(Debug, Default)]
pub struct PresenceStore {
    presences: DashMap<Snowflake, Presence>,
}

impl PresenceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the current presence snapshot for a user
    pub fn get(&self, user_id: Snowflake) -> Option<Presence> {
        self.presences.get(&user_id).map(|p| p.value().clone())
    }

    /// Record a presence, returning the replaced snapshot if any
    pub fn update(&self, presence: Presence) -> Option<Presence> {
        self.presences.insert(presence.user_id, presence)
    }

    /// Number of tracked users
    pub fn len(&self) -> usize {
        self.presences.len()
    }

    /// Whether no presences are tracked
    pub fn is_empty(&self) -> bool {
        self.presences.is_empty()
    }

    /// Drop every presence (engine disposal)
    pub fn clear(&self) {
        self.presences.clear();
    }
}
