//! Notifications delivered to subscribers
//!
//! Each dispatched event produces exactly one [`GatewayEvent`]. Update
//! variants carry the detached pre-mutation snapshot alongside the live
//! (already mutated) handle, so subscribers can diff without racing the
//! cache.

use std::sync::Arc;

use crest_core::{
    ApplicationCommand, Channel, Guild, Integration, Interaction, Invite, Member, Message,
    Presence, ReactionEmote, Role, Shared, SharedUser, Snowflake, StageInstance, User, VoiceState,
};
use crest_state::CachedGuild;

/// Member chunk surface for external chunk-completion logic
#[derive(Debug, Clone)]
pub struct MemberChunk {
    pub guild_id: Snowflake,
    /// Zero-based index of this chunk
    pub index: u32,
    /// Total number of chunks in the response
    pub count: u32,
    pub nonce: Option<String>,
    /// Requested ids the remote service could not resolve
    pub not_found: Vec<Snowflake>,
    /// Canonical member handles merged by this chunk
    pub members: Vec<Shared<Member>>,
}

impl MemberChunk {
    /// Whether this is the final chunk of its response
    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.count
    }
}

/// A notification emitted by the dispatch path
#[derive(Debug)]
pub enum GatewayEvent {
    /// Initial session handshake completed
    Ready {
        user: SharedUser,
        session_id: Option<String>,
        /// Guilds announced as pending download
        guild_ids: Vec<Snowflake>,
    },
    /// Dropped session resumed without replay loss
    Resumed,
    /// The client's own user changed
    UserUpdate { before: Option<User>, user: SharedUser },

    /// The client joined a guild
    GuildCreate { guild: Arc<CachedGuild> },
    /// A guild previously marked unavailable came back
    GuildAvailable { guild: Arc<CachedGuild> },
    GuildUpdate {
        before: Option<Guild>,
        guild: Arc<CachedGuild>,
    },
    /// The client left (or was removed from) a guild
    GuildDelete {
        guild_id: Snowflake,
        /// Evicted aggregate; `None` if the guild was never cached
        guild: Option<Arc<CachedGuild>>,
    },
    /// A guild went down without the client leaving it
    GuildUnavailable { guild_id: Snowflake },
    /// Every guild announced at READY has arrived; fired once per session
    GuildDownloadComplete { guilds: Vec<Arc<CachedGuild>> },

    ChannelCreate { channel: Shared<Channel> },
    ChannelUpdate {
        before: Option<Channel>,
        channel: Shared<Channel>,
    },
    /// Carries the evicted entry, or the payload-decoded channel when the
    /// cache never held it
    ChannelDelete { channel: Channel },

    RoleCreate {
        guild_id: Snowflake,
        role: Shared<Role>,
    },
    RoleUpdate {
        guild_id: Snowflake,
        before: Option<Role>,
        role: Shared<Role>,
    },
    RoleDelete {
        guild_id: Snowflake,
        role_id: Snowflake,
        role: Option<Role>,
    },

    EmojisUpdate {
        guild_id: Snowflake,
        before: Vec<crest_core::Emoji>,
        after: Vec<crest_core::Emoji>,
    },
    StickersUpdate {
        guild_id: Snowflake,
        before: Vec<crest_core::Sticker>,
        after: Vec<crest_core::Sticker>,
    },

    MemberAdd {
        guild_id: Snowflake,
        member: Shared<Member>,
    },
    MemberUpdate {
        guild_id: Snowflake,
        before: Option<Member>,
        member: Shared<Member>,
    },
    MemberRemove {
        guild_id: Snowflake,
        user: SharedUser,
        /// Evicted membership, when the member was cached
        member: Option<Shared<Member>>,
    },
    MemberChunk(MemberChunk),

    MessageCreate { message: Shared<Message> },
    MessageUpdate {
        /// Pre-edit snapshot, when the message was still cached
        before: Option<Message>,
        after: Message,
    },
    MessageDelete {
        message_id: Snowflake,
        channel_id: Snowflake,
        guild_id: Option<Snowflake>,
        /// Evicted entry, when the message was still cached
        message: Option<Message>,
    },
    MessageDeleteBulk {
        ids: Vec<Snowflake>,
        channel_id: Snowflake,
        guild_id: Option<Snowflake>,
        /// Evicted entries, for the subset that was still cached
        messages: Vec<Message>,
    },

    ReactionAdd {
        user_id: Snowflake,
        channel_id: Snowflake,
        message_id: Snowflake,
        guild_id: Option<Snowflake>,
        emote: ReactionEmote,
        /// Cached message the reaction was applied to, if any
        message: Option<Shared<Message>>,
    },
    ReactionRemove {
        user_id: Snowflake,
        channel_id: Snowflake,
        message_id: Snowflake,
        guild_id: Option<Snowflake>,
        emote: ReactionEmote,
        message: Option<Shared<Message>>,
    },
    ReactionRemoveAll {
        channel_id: Snowflake,
        message_id: Snowflake,
        guild_id: Option<Snowflake>,
        message: Option<Shared<Message>>,
    },
    ReactionRemoveEmoji {
        channel_id: Snowflake,
        message_id: Snowflake,
        guild_id: Option<Snowflake>,
        emote: ReactionEmote,
        message: Option<Shared<Message>>,
    },

    PresenceUpdate {
        guild_id: Option<Snowflake>,
        before: Option<Presence>,
        after: Presence,
    },
    TypingStart {
        channel_id: Snowflake,
        guild_id: Option<Snowflake>,
        user_id: Snowflake,
        timestamp: i64,
        member: Option<Shared<Member>>,
    },

    VoiceStateUpdate {
        /// State removed from the map before the new one landed
        before: Option<VoiceState>,
        after: VoiceState,
    },

    InviteCreate { invite: Invite },
    InviteDelete {
        guild_id: Option<Snowflake>,
        channel_id: Snowflake,
        code: String,
        /// Evicted entry, when the invite was cached
        invite: Option<Invite>,
    },

    StageInstanceCreate { stage: StageInstance },
    StageInstanceUpdate {
        before: Option<StageInstance>,
        after: StageInstance,
    },
    StageInstanceDelete { stage: StageInstance },

    IntegrationCreate { integration: Integration },
    IntegrationUpdate { integration: Integration },
    IntegrationDelete {
        guild_id: Snowflake,
        integration_id: Snowflake,
        application_id: Option<Snowflake>,
    },

    InteractionCreate { interaction: Interaction },
    CommandCreate { command: ApplicationCommand },
    CommandUpdate {
        before: Option<ApplicationCommand>,
        command: ApplicationCommand,
    },
    CommandDelete { command: ApplicationCommand },

    /// Event name the dispatcher does not recognize, forwarded raw
    Unknown {
        name: String,
        payload: serde_json::Value,
    },
}

impl GatewayEvent {
    /// Subscription key for this notification
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Ready { .. } => EventKind::Ready,
            Self::Resumed => EventKind::Resumed,
            Self::UserUpdate { .. } => EventKind::UserUpdate,
            Self::GuildCreate { .. } => EventKind::GuildCreate,
            Self::GuildAvailable { .. } => EventKind::GuildAvailable,
            Self::GuildUpdate { .. } => EventKind::GuildUpdate,
            Self::GuildDelete { .. } => EventKind::GuildDelete,
            Self::GuildUnavailable { .. } => EventKind::GuildUnavailable,
            Self::GuildDownloadComplete { .. } => EventKind::GuildDownloadComplete,
            Self::ChannelCreate { .. } => EventKind::ChannelCreate,
            Self::ChannelUpdate { .. } => EventKind::ChannelUpdate,
            Self::ChannelDelete { .. } => EventKind::ChannelDelete,
            Self::RoleCreate { .. } => EventKind::RoleCreate,
            Self::RoleUpdate { .. } => EventKind::RoleUpdate,
            Self::RoleDelete { .. } => EventKind::RoleDelete,
            Self::EmojisUpdate { .. } => EventKind::EmojisUpdate,
            Self::StickersUpdate { .. } => EventKind::StickersUpdate,
            Self::MemberAdd { .. } => EventKind::MemberAdd,
            Self::MemberUpdate { .. } => EventKind::MemberUpdate,
            Self::MemberRemove { .. } => EventKind::MemberRemove,
            Self::MemberChunk(_) => EventKind::MemberChunk,
            Self::MessageCreate { .. } => EventKind::MessageCreate,
            Self::MessageUpdate { .. } => EventKind::MessageUpdate,
            Self::MessageDelete { .. } => EventKind::MessageDelete,
            Self::MessageDeleteBulk { .. } => EventKind::MessageDeleteBulk,
            Self::ReactionAdd { .. } => EventKind::ReactionAdd,
            Self::ReactionRemove { .. } => EventKind::ReactionRemove,
            Self::ReactionRemoveAll { .. } => EventKind::ReactionRemoveAll,
            Self::ReactionRemoveEmoji { .. } => EventKind::ReactionRemoveEmoji,
            Self::PresenceUpdate { .. } => EventKind::PresenceUpdate,
            Self::TypingStart { .. } => EventKind::TypingStart,
            Self::VoiceStateUpdate { .. } => EventKind::VoiceStateUpdate,
            Self::InviteCreate { .. } => EventKind::InviteCreate,
            Self::InviteDelete { .. } => EventKind::InviteDelete,
            Self::StageInstanceCreate { .. } => EventKind::StageInstanceCreate,
            Self::StageInstanceUpdate { .. } => EventKind::StageInstanceUpdate,
            Self::StageInstanceDelete { .. } => EventKind::StageInstanceDelete,
            Self::IntegrationCreate { .. } => EventKind::IntegrationCreate,
            Self::IntegrationUpdate { .. } => EventKind::IntegrationUpdate,
            Self::IntegrationDelete { .. } => EventKind::IntegrationDelete,
            Self::InteractionCreate { .. } => EventKind::InteractionCreate,
            Self::CommandCreate { .. } => EventKind::CommandCreate,
            Self::CommandUpdate { .. } => EventKind::CommandUpdate,
            Self::CommandDelete { .. } => EventKind::CommandDelete,
            Self::Unknown { .. } => EventKind::Unknown,
        }
    }
}

/// Fieldless mirror of [`GatewayEvent`] used as the subscription key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Ready,
    Resumed,
    UserUpdate,
    GuildCreate,
    GuildAvailable,
    GuildUpdate,
    GuildDelete,
    GuildUnavailable,
    GuildDownloadComplete,
    ChannelCreate,
    ChannelUpdate,
    ChannelDelete,
    RoleCreate,
    RoleUpdate,
    RoleDelete,
    EmojisUpdate,
    StickersUpdate,
    MemberAdd,
    MemberUpdate,
    MemberRemove,
    MemberChunk,
    MessageCreate,
    MessageUpdate,
    MessageDelete,
    MessageDeleteBulk,
    ReactionAdd,
    ReactionRemove,
    ReactionRemoveAll,
    ReactionRemoveEmoji,
    PresenceUpdate,
    TypingStart,
    VoiceStateUpdate,
    InviteCreate,
    InviteDelete,
    StageInstanceCreate,
    StageInstanceUpdate,
    StageInstanceDelete,
    IntegrationCreate,
    IntegrationUpdate,
    IntegrationDelete,
    InteractionCreate,
    CommandCreate,
    CommandUpdate,
    CommandDelete,
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        let event = GatewayEvent::Resumed;
        assert_eq!(event.kind(), EventKind::Resumed);

        let event = GatewayEvent::Unknown {
            name: "FOO".to_string(),
            payload: serde_json::Value::Null,
        };
        assert_eq!(event.kind(), EventKind::Unknown);
    }

    #[test]
    fn test_chunk_last_detection() {
        let chunk = MemberChunk {
            guild_id: Snowflake::new(1),
            index: 1,
            count: 2,
            nonce: None,
            not_found: Vec::new(),
            members: Vec::new(),
        };
        assert!(chunk.is_last());
    }
}
