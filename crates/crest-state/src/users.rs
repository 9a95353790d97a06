//! Identity cache - the single canonical User instance per id
//!
//! Process-scoped mutable state with an explicit lifecycle: created with the
//! engine, cleared at shutdown. Only `get_or_create` and `merge_update` are
//! exposed; direct map indexing would break the one-instance-per-id
//! invariant.

use dashmap::DashMap;

use crest_core::{shared, SharedUser, Snowflake, User};

/// Global, deduplicated map of users with merge-on-update semantics
#[derive(Debug, Default)]
pub struct UserCache {
    users: DashMap<Snowflake, SharedUser>,
}

impl UserCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the cached user, or a transient stand-in carrying only the id
    ///
    /// The stand-in is not inserted; a user only becomes durable once a
    /// full copy arrives through `merge_update`.
    pub fn get_or_create(&self, id: Snowflake) -> SharedUser {
        match self.users.get(&id) {
            Some(entry) => entry.value().clone(),
            None => shared(User::phantom(id)),
        }
    }

    /// Fetch the cached user without synthesizing a stand-in
    pub fn get(&self, id: Snowflake) -> Option<SharedUser> {
        self.users.get(&id).map(|entry| entry.value().clone())
    }

    /// Atomic upsert: absent inserts, present merges display fields in place
    ///
    /// Returns the canonical handle. Concurrent merges on the same id
    /// serialize on the map shard entry, so no update is lost.
    pub fn merge_update(&self, incoming: User) -> SharedUser {
        let entry = self
            .users
            .entry(incoming.id)
            .and_modify(|existing| existing.write().merge_from(&incoming))
            .or_insert_with(|| shared(incoming));
        entry.value().clone()
    }

    /// Number of durable users
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the cache holds no durable users
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Drop every cached user (engine disposal)
    pub fn clear(&self) {
        self.users.clear();
    }
}
