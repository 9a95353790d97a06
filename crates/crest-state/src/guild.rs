//! Cached guild aggregate
//!
//! Owns concurrent child maps (channels, roles, members, ...) and an
//! advisory member counter. The maps are created with the aggregate and
//! live for as long as it does; they are never replaced wholesale, only
//! mutated entry by entry.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use dashmap::DashMap;
use parking_lot::RwLock;

use crest_core::{
    shared, Emoji, Guild, Invite, Member, Shared, SharedUser, Snowflake, StageInstance, Sticker,
    VoiceState,
};

/// A guild and everything it owns, safe for concurrent reads while a
/// single event handler mutates it
#[derive(Debug)]
pub struct CachedGuild {
    id: Snowflake,
    data: RwLock<Guild>,
    /// Channels by id
    pub channels: DashMap<Snowflake, Shared<crest_core::Channel>>,
    /// Roles by id
    pub roles: DashMap<Snowflake, Shared<crest_core::Role>>,
    /// Members by user id
    pub members: DashMap<Snowflake, Shared<Member>>,
    /// Voice states by user id
    pub voice_states: DashMap<Snowflake, VoiceState>,
    /// Stage instances by id
    pub stage_instances: DashMap<Snowflake, StageInstance>,
    /// Invites by code
    pub invites: DashMap<String, Invite>,
    emojis: RwLock<Vec<Emoji>>,
    stickers: RwLock<Vec<Sticker>>,
    member_count: AtomicI64,
    unavailable: AtomicBool,
}

impl CachedGuild {
    /// Create a cached aggregate around decoded scalar fields
    pub fn new(guild: Guild, unavailable: bool) -> Self {
        Self {
            id: guild.id,
            data: RwLock::new(guild),
            channels: DashMap::new(),
            roles: DashMap::new(),
            members: DashMap::new(),
            voice_states: DashMap::new(),
            stage_instances: DashMap::new(),
            invites: DashMap::new(),
            emojis: RwLock::new(Vec::new()),
            stickers: RwLock::new(Vec::new()),
            member_count: AtomicI64::new(0),
            unavailable: AtomicBool::new(unavailable),
        }
    }

    /// Guild id
    #[inline]
    pub fn id(&self) -> Snowflake {
        self.id
    }

    /// Detached copy of the scalar fields
    pub fn snapshot(&self) -> Guild {
        self.data.read().clone()
    }

    /// Mutate the scalar fields in place
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Guild),
    {
        f(&mut self.data.write());
    }

    // === Members ===

    /// Fetch a member, or insert a minimally populated stand-in around the
    /// given canonical user handle
    pub fn get_or_create_member(&self, user: SharedUser) -> Shared<Member> {
        let user_id = user.read().id;
        self.members
            .entry(user_id)
            .or_insert_with(|| shared(Member::new(self.id, user)))
            .value()
            .clone()
    }

    /// Fetch a member by user id
    pub fn member(&self, user_id: Snowflake) -> Option<Shared<Member>> {
        self.members.get(&user_id).map(|m| m.value().clone())
    }

    /// Advisory member count
    pub fn member_count(&self) -> i64 {
        self.member_count.load(Ordering::SeqCst)
    }

    /// Seed the advisory counter from an authoritative payload value
    pub fn set_member_count(&self, count: i64) {
        self.member_count.store(count, Ordering::SeqCst);
    }

    /// Note one joined member
    pub fn increment_member_count(&self) {
        self.member_count.fetch_add(1, Ordering::SeqCst);
    }

    /// Note one departed member; the counter never drops below zero
    pub fn decrement_member_count(&self) {
        let _ = self
            .member_count
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
                Some(count.saturating_sub(1).max(0))
            });
    }

    /// Reconcile the advisory counter to the authoritative map size
    pub fn reconcile_member_count(&self) {
        self.member_count
            .store(self.members.len() as i64, Ordering::SeqCst);
    }

    // === Emojis & stickers ===

    /// Replace the emoji list wholesale, returning the previous one
    pub fn replace_emojis(&self, emojis: Vec<Emoji>) -> Vec<Emoji> {
        std::mem::replace(&mut self.emojis.write(), emojis)
    }

    /// Replace the sticker list wholesale, returning the previous one
    pub fn replace_stickers(&self, stickers: Vec<Sticker>) -> Vec<Sticker> {
        std::mem::replace(&mut self.stickers.write(), stickers)
    }

    /// Detached copy of the emoji list
    pub fn emojis(&self) -> Vec<Emoji> {
        self.emojis.read().clone()
    }

    /// Detached copy of the sticker list
    pub fn stickers(&self) -> Vec<Sticker> {
        self.stickers.read().clone()
    }

    // === Voice states ===

    /// Remove and return the voice state for a user, if any
    pub fn take_voice_state(&self, user_id: Snowflake) -> Option<VoiceState> {
        self.voice_states.remove(&user_id).map(|(_, state)| state)
    }

    // === Availability ===

    /// Whether the remote service reported this guild unavailable
    pub fn is_unavailable(&self) -> bool {
        self.unavailable.load(Ordering::SeqCst)
    }

    /// Flip the unavailable flag
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crest_core::User;

    fn guild() -> CachedGuild {
        CachedGuild::new(
            Guild::new(Snowflake::new(1), "test".to_string(), Snowflake::new(9)),
            false,
        )
    }

    #[test]
    fn test_update_in_place_is_visible() {
        let cached = guild();
        cached.update(|g| g.name = "renamed".to_string());
        assert_eq!(cached.snapshot().name, "renamed");
    }

    #[test]
    fn test_member_count_floor() {
        let cached = guild();
        cached.decrement_member_count();
        assert_eq!(cached.member_count(), 0);

        cached.increment_member_count();
        cached.increment_member_count();
        cached.decrement_member_count();
        assert_eq!(cached.member_count(), 1);
    }

    #[test]
    fn test_reconcile_member_count() {
        let cached = guild();
        cached.set_member_count(50);

        let user = shared(User::new(Snowflake::new(7), "a".to_string()));
        cached.get_or_create_member(user);
        cached.reconcile_member_count();
        assert_eq!(cached.member_count(), 1);
    }

    #[test]
    fn test_get_or_create_member_is_idempotent() {
        let cached = guild();
        let user = shared(User::new(Snowflake::new(7), "a".to_string()));
        let first = cached.get_or_create_member(user.clone());
        let second = cached.get_or_create_member(user);
        assert!(std::sync::Arc::ptr_eq(&first, &second));
        assert_eq!(cached.members.len(), 1);
    }

    #[test]
    fn test_replace_emojis_returns_previous() {
        let cached = guild();
        let old = cached.replace_emojis(vec![Emoji::new(
            Snowflake::new(3),
            Snowflake::new(1),
            "blob".to_string(),
        )]);
        assert!(old.is_empty());

        let old = cached.replace_emojis(Vec::new());
        assert_eq!(old.len(), 1);
        assert_eq!(old[0].name, "blob");
    }
}
