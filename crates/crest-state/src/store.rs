//! Entity store - per-guild and global concurrent maps

use std::sync::Arc;

use dashmap::DashMap;

use crest_core::{ApplicationCommand, Channel, Shared, Snowflake};

use crate::guild::CachedGuild;

/// Root of the cached object graph
#[derive(Debug, Default)]
pub struct EntityStore {
    guilds: DashMap<Snowflake, Arc<CachedGuild>>,
    private_channels: DashMap<Snowflake, Shared<Channel>>,
    commands: DashMap<Snowflake, ApplicationCommand>,
}

impl EntityStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // === Guilds ===

    /// Fetch a guild by id
    pub fn guild(&self, id: Snowflake) -> Option<Arc<CachedGuild>> {
        self.guilds.get(&id).map(|g| g.value().clone())
    }

    /// Insert or replace a guild aggregate
    pub fn insert_guild(&self, guild: Arc<CachedGuild>) {
        self.guilds.insert(guild.id(), guild);
    }

    /// Remove a guild and everything it owns
    pub fn remove_guild(&self, id: Snowflake) -> Option<Arc<CachedGuild>> {
        self.guilds.remove(&id).map(|(_, guild)| guild)
    }

    /// Snapshot of all cached guilds
    pub fn guilds(&self) -> Vec<Arc<CachedGuild>> {
        self.guilds.iter().map(|g| g.value().clone()).collect()
    }

    /// Number of cached guilds
    pub fn guild_count(&self) -> usize {
        self.guilds.len()
    }

    // === Private channels ===

    /// Fetch a private channel by id
    pub fn private_channel(&self, id: Snowflake) -> Option<Shared<Channel>> {
        self.private_channels.get(&id).map(|c| c.value().clone())
    }

    /// Insert or replace a private channel
    pub fn insert_private_channel(&self, channel: Shared<Channel>) {
        let id = channel.read().id;
        self.private_channels.insert(id, channel);
    }

    /// Remove a private channel by id
    pub fn remove_private_channel(&self, id: Snowflake) -> Option<Shared<Channel>> {
        self.private_channels.remove(&id).map(|(_, c)| c)
    }

    // === Application commands (global, not guild-owned) ===

    /// Fetch a command by id
    pub fn command(&self, id: Snowflake) -> Option<ApplicationCommand> {
        self.commands.get(&id).map(|c| c.value().clone())
    }

    /// Insert or replace a command, returning the previous entry
    pub fn upsert_command(&self, command: ApplicationCommand) -> Option<ApplicationCommand> {
        self.commands.insert(command.id, command)
    }

    /// Remove a command by id
    pub fn remove_command(&self, id: Snowflake) -> Option<ApplicationCommand> {
        self.commands.remove(&id).map(|(_, c)| c)
    }

    /// Drop everything (engine disposal)
    pub fn clear(&self) {
        self.guilds.clear();
        self.private_channels.clear();
        self.commands.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crest_core::{shared, ChannelType, Guild};

    #[test]
    fn test_guild_round_trip() {
        let store = EntityStore::new();
        let guild = Arc::new(CachedGuild::new(
            Guild::new(Snowflake::new(1), "g".to_string(), Snowflake::new(2)),
            false,
        ));
        store.insert_guild(guild);

        assert_eq!(store.guild_count(), 1);
        assert!(store.guild(Snowflake::new(1)).is_some());

        let removed = store.remove_guild(Snowflake::new(1)).unwrap();
        assert_eq!(removed.id(), Snowflake::new(1));
        assert!(store.guild(Snowflake::new(1)).is_none());
    }

    #[test]
    fn test_private_channels() {
        let store = EntityStore::new();
        let channel = shared(Channel::new(
            Snowflake::new(10),
            None,
            "dm".to_string(),
            ChannelType::Private,
        ));
        store.insert_private_channel(channel);

        assert!(store.private_channel(Snowflake::new(10)).is_some());
        assert!(store.remove_private_channel(Snowflake::new(10)).is_some());
        assert!(store.private_channel(Snowflake::new(10)).is_none());
    }

    #[test]
    fn test_clear() {
        let store = EntityStore::new();
        store.insert_guild(Arc::new(CachedGuild::new(
            Guild::phantom(Snowflake::new(1)),
            true,
        )));
        store.clear();
        assert_eq!(store.guild_count(), 0);
    }
}
