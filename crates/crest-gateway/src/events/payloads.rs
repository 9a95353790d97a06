//! Wire payload definitions
//!
//! Loosely-typed DTOs decoded from the gateway's JSON frames. The `into_*`
//! conversions are the single normalization pass that stamps owner
//! back-references (guild id, channel id) onto every nested object before
//! anything is linked into the cache or handed to subscribers.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crest_core::{
    Activity, ActivityKind, ApplicationCommand, Attachment, Channel, ChannelType, Emoji, Guild,
    Integration, Interaction, InteractionKind, Invite, Member, Message, OverwriteTarget,
    Permissions, PermissionOverwrite, Presence, PrivacyLevel, ReactionEmote, Role, Snowflake,
    StageInstance, Sticker, StickerFormat, User, UserStatus, VoiceState,
};

// === Users & members ===

/// User data included in events, possibly partial
#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    pub id: Snowflake,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub discriminator: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bot: Option<bool>,
}

impl UserPayload {
    /// Whether this carries enough fields to merge into the identity cache
    pub fn is_full(&self) -> bool {
        self.username.is_some()
    }

    /// Build the entity; missing fields stay empty
    pub fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username.unwrap_or_default(),
            discriminator: self.discriminator.unwrap_or_default(),
            avatar: self.avatar,
            bot: self.bot.unwrap_or(false),
        }
    }
}

/// Member data included in events
#[derive(Debug, Clone, Deserialize)]
pub struct MemberPayload {
    #[serde(default)]
    pub user: Option<UserPayload>,
    #[serde(default)]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<Snowflake>,
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub deaf: bool,
    #[serde(default)]
    pub mute: bool,
}

impl MemberPayload {
    /// Copy the membership fields onto an existing member in place
    ///
    /// The user handle is untouched; user merging goes through the
    /// identity cache.
    pub fn apply_to(&self, member: &mut Member) {
        member.nick.clone_from(&self.nick);
        member.roles.clone_from(&self.roles);
        if self.joined_at.is_some() {
            member.joined_at = self.joined_at;
        }
        member.deaf = self.deaf;
        member.mute = self.mute;
    }
}

// === Channels ===

/// A permission overwrite on the wire
#[derive(Debug, Clone, Deserialize)]
pub struct OverwritePayload {
    pub id: Snowflake,
    #[serde(rename = "type", default)]
    pub kind: u8,
    #[serde(default)]
    pub allow: Permissions,
    #[serde(default)]
    pub deny: Permissions,
}

impl OverwritePayload {
    /// Build the entity, stamping the owning channel id
    pub fn into_overwrite(self, channel_id: Snowflake) -> PermissionOverwrite {
        PermissionOverwrite {
            channel_id,
            target_id: self.id,
            target: if self.kind == 0 {
                OverwriteTarget::Role
            } else {
                OverwriteTarget::Member
            },
            allow: self.allow,
            deny: self.deny,
        }
    }
}

/// Channel data included in events
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelPayload {
    pub id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: u8,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub parent_id: Option<Snowflake>,
    #[serde(default)]
    pub nsfw: bool,
    #[serde(default)]
    pub permission_overwrites: Vec<OverwritePayload>,
}

impl ChannelPayload {
    /// Build the entity, stamping the owning guild and channel ids
    ///
    /// An explicit `guild_id` (from the enclosing aggregate) wins over the
    /// one embedded in the payload.
    pub fn into_channel(self, guild_id: Option<Snowflake>) -> Channel {
        let id = self.id;
        Channel {
            id,
            guild_id: guild_id.or(self.guild_id),
            name: self.name.unwrap_or_default(),
            kind: ChannelType::from_wire(self.kind),
            position: self.position,
            topic: self.topic,
            parent_id: self.parent_id,
            nsfw: self.nsfw,
            overwrites: self
                .permission_overwrites
                .into_iter()
                .map(|o| o.into_overwrite(id))
                .collect(),
        }
    }
}

// === Roles ===

/// Role data included in events
#[derive(Debug, Clone, Deserialize)]
pub struct RolePayload {
    pub id: Snowflake,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: u32,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub permissions: Permissions,
    #[serde(default)]
    pub hoist: bool,
    #[serde(default)]
    pub mentionable: bool,
    #[serde(default)]
    pub managed: bool,
}

impl RolePayload {
    /// Build the entity, stamping the owning guild id
    pub fn into_role(self, guild_id: Snowflake) -> Role {
        Role {
            id: self.id,
            guild_id,
            name: self.name,
            color: self.color,
            position: self.position,
            permissions: self.permissions,
            hoist: self.hoist,
            mentionable: self.mentionable,
            managed: self.managed,
        }
    }
}

// === Emojis & stickers ===

/// Emoji data in guild payloads
#[derive(Debug, Clone, Deserialize)]
pub struct EmojiPayload {
    /// `None` for unicode emotes in reaction payloads
    pub id: Option<Snowflake>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub roles: Vec<Snowflake>,
    #[serde(default)]
    pub animated: bool,
    #[serde(default)]
    pub managed: bool,
    #[serde(default = "default_true")]
    pub available: bool,
}

impl EmojiPayload {
    /// Build the entity, stamping the owning guild id; unicode entries
    /// (no id) do not become guild emojis
    pub fn into_emoji(self, guild_id: Snowflake) -> Option<Emoji> {
        Some(Emoji {
            id: self.id?,
            guild_id,
            name: self.name.unwrap_or_default(),
            roles: self.roles,
            animated: self.animated,
            managed: self.managed,
            available: self.available,
        })
    }
}

/// The emote reference carried by reaction events
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionEmotePayload {
    pub id: Option<Snowflake>,
    #[serde(default)]
    pub name: Option<String>,
}

impl ReactionEmotePayload {
    pub fn into_emote(self) -> ReactionEmote {
        ReactionEmote {
            id: self.id,
            name: self.name.unwrap_or_default(),
        }
    }
}

/// Sticker data in guild payloads
#[derive(Debug, Clone, Deserialize)]
pub struct StickerPayload {
    pub id: Snowflake,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tags: String,
    #[serde(rename = "format_type", default = "default_sticker_format")]
    pub format: u8,
}

impl StickerPayload {
    /// Build the entity, stamping the owning guild id
    pub fn into_sticker(self, guild_id: Snowflake) -> Sticker {
        Sticker {
            id: self.id,
            guild_id,
            name: self.name,
            description: self.description,
            tags: self.tags,
            format: StickerFormat::from_wire(self.format),
        }
    }
}

// === Presence ===

/// Activity data inside presence payloads
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityPayload {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: u8,
    #[serde(default)]
    pub url: Option<String>,
}

impl ActivityPayload {
    pub fn into_activity(self) -> Activity {
        Activity {
            name: self.name,
            kind: ActivityKind::from_wire(self.kind),
            url: self.url,
        }
    }
}

/// Presence data, both standalone and nested in guild payloads
#[derive(Debug, Clone, Deserialize)]
pub struct PresencePayload {
    pub user: UserPayload,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    #[serde(default)]
    pub status: UserStatus,
    #[serde(default)]
    pub activities: Vec<ActivityPayload>,
}

impl PresencePayload {
    /// Build the snapshot keyed by the carried user id
    pub fn into_presence(self) -> Presence {
        Presence {
            user_id: self.user.id,
            status: self.status,
            activities: self
                .activities
                .into_iter()
                .map(ActivityPayload::into_activity)
                .collect(),
        }
    }
}

// === Voice ===

/// Voice state data, both standalone and nested in guild payloads
#[derive(Debug, Clone, Deserialize)]
pub struct VoiceStatePayload {
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    #[serde(default)]
    pub channel_id: Option<Snowflake>,
    pub user_id: Snowflake,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub deaf: bool,
    #[serde(default)]
    pub mute: bool,
    #[serde(default)]
    pub self_deaf: bool,
    #[serde(default)]
    pub self_mute: bool,
    #[serde(default)]
    pub suppress: bool,
}

impl VoiceStatePayload {
    /// Build the entity, stamping the owning guild id
    pub fn into_state(self, guild_id: Option<Snowflake>) -> VoiceState {
        VoiceState {
            guild_id: guild_id.or(self.guild_id),
            channel_id: self.channel_id,
            user_id: self.user_id,
            session_id: self.session_id,
            deaf: self.deaf,
            mute: self.mute,
            self_deaf: self.self_deaf,
            self_mute: self.self_mute,
            suppress: self.suppress,
        }
    }
}

// === Stage instances ===

/// Stage instance data
#[derive(Debug, Clone, Deserialize)]
pub struct StageInstancePayload {
    pub id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    pub channel_id: Snowflake,
    #[serde(default)]
    pub topic: String,
    #[serde(default = "default_privacy_level")]
    pub privacy_level: u8,
}

impl StageInstancePayload {
    /// Build the entity, stamping the owning guild id
    pub fn into_stage(self, guild_id: Snowflake) -> StageInstance {
        StageInstance {
            id: self.id,
            guild_id,
            channel_id: self.channel_id,
            topic: self.topic,
            privacy_level: PrivacyLevel::from_wire(self.privacy_level),
        }
    }
}

// === Invites ===

/// INVITE_CREATE payload
#[derive(Debug, Clone, Deserialize)]
pub struct InvitePayload {
    pub code: String,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    pub channel_id: Snowflake,
    #[serde(default)]
    pub inviter: Option<UserPayload>,
    #[serde(default)]
    pub uses: u32,
    #[serde(default)]
    pub max_uses: u32,
    #[serde(default)]
    pub max_age: u32,
    #[serde(default)]
    pub temporary: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl InvitePayload {
    /// Build the entity; the inviter is referenced by id only
    pub fn into_invite(self) -> Invite {
        Invite {
            code: self.code,
            guild_id: self.guild_id,
            channel_id: self.channel_id,
            inviter_id: self.inviter.map(|u| u.id),
            uses: self.uses,
            max_uses: self.max_uses,
            max_age: self.max_age,
            temporary: self.temporary,
            created_at: self.created_at,
        }
    }
}

/// INVITE_DELETE payload
#[derive(Debug, Clone, Deserialize)]
pub struct InviteDeletePayload {
    pub channel_id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    pub code: String,
}

// === Guilds ===

/// GUILD_CREATE / GUILD_UPDATE payload
#[derive(Debug, Clone, Deserialize)]
pub struct GuildPayload {
    pub id: Snowflake,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner_id: Option<Snowflake>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub member_count: Option<i64>,
    #[serde(default)]
    pub unavailable: Option<bool>,
    #[serde(default)]
    pub channels: Vec<ChannelPayload>,
    #[serde(default)]
    pub roles: Vec<RolePayload>,
    #[serde(default)]
    pub members: Vec<MemberPayload>,
    #[serde(default)]
    pub voice_states: Vec<VoiceStatePayload>,
    #[serde(default)]
    pub presences: Vec<PresencePayload>,
    #[serde(default)]
    pub emojis: Vec<EmojiPayload>,
    #[serde(default)]
    pub stickers: Vec<StickerPayload>,
    #[serde(default)]
    pub stage_instances: Vec<StageInstancePayload>,
}

impl GuildPayload {
    /// Build the scalar entity; child collections are linked separately
    pub fn to_guild(&self) -> Guild {
        Guild {
            id: self.id,
            name: self.name.clone().unwrap_or_default(),
            icon: self.icon.clone(),
            description: self.description.clone(),
            owner_id: self.owner_id.unwrap_or_default(),
            features: self.features.clone(),
        }
    }
}

/// Stub guild entry in the READY payload
#[derive(Debug, Clone, Deserialize)]
pub struct UnavailableGuildPayload {
    pub id: Snowflake,
    #[serde(default = "default_true")]
    pub unavailable: bool,
}

/// READY payload
#[derive(Debug, Clone, Deserialize)]
pub struct ReadyPayload {
    pub user: UserPayload,
    #[serde(default)]
    pub guilds: Vec<UnavailableGuildPayload>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// GUILD_DELETE payload
#[derive(Debug, Clone, Deserialize)]
pub struct GuildDeletePayload {
    pub id: Snowflake,
    /// True marks a temporary outage, not a departure
    #[serde(default)]
    pub unavailable: bool,
}

/// GUILD_EMOJIS_UPDATE payload
#[derive(Debug, Clone, Deserialize)]
pub struct GuildEmojisUpdatePayload {
    pub guild_id: Snowflake,
    #[serde(default)]
    pub emojis: Vec<EmojiPayload>,
}

/// GUILD_STICKERS_UPDATE payload
#[derive(Debug, Clone, Deserialize)]
pub struct GuildStickersUpdatePayload {
    pub guild_id: Snowflake,
    #[serde(default)]
    pub stickers: Vec<StickerPayload>,
}

// === Member events ===

/// GUILD_MEMBER_ADD / GUILD_MEMBER_UPDATE payload
#[derive(Debug, Clone, Deserialize)]
pub struct GuildMemberEventPayload {
    pub guild_id: Snowflake,
    #[serde(flatten)]
    pub member: MemberPayload,
}

/// GUILD_MEMBER_REMOVE payload
#[derive(Debug, Clone, Deserialize)]
pub struct GuildMemberRemovePayload {
    pub guild_id: Snowflake,
    pub user: UserPayload,
}

/// GUILD_MEMBERS_CHUNK payload
#[derive(Debug, Clone, Deserialize)]
pub struct MemberChunkPayload {
    pub guild_id: Snowflake,
    #[serde(default)]
    pub members: Vec<MemberPayload>,
    #[serde(default)]
    pub chunk_index: u32,
    #[serde(default = "default_chunk_count")]
    pub chunk_count: u32,
    #[serde(default)]
    pub not_found: Vec<Snowflake>,
    #[serde(default)]
    pub presences: Vec<PresencePayload>,
    #[serde(default)]
    pub nonce: Option<String>,
}

// === Messages ===

/// Attachment data inside message payloads
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentPayload {
    pub id: Snowflake,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub url: String,
}

impl AttachmentPayload {
    pub fn into_attachment(self) -> Attachment {
        Attachment {
            id: self.id,
            filename: self.filename,
            size: self.size,
            url: self.url,
        }
    }
}

/// MESSAGE_CREATE / MESSAGE_UPDATE payload; updates may be partial
#[derive(Debug, Clone, Deserialize)]
pub struct MessagePayload {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    #[serde(default)]
    pub author: Option<UserPayload>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub edited_timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pinned: Option<bool>,
    #[serde(default)]
    pub attachments: Option<Vec<AttachmentPayload>>,
}

impl MessagePayload {
    /// Build the entity from a full create payload
    pub fn into_message(self) -> Message {
        let author_id = self.author.as_ref().map(|u| u.id).unwrap_or_default();
        Message {
            id: self.id,
            channel_id: self.channel_id,
            guild_id: self.guild_id,
            author_id,
            content: self.content.unwrap_or_default(),
            timestamp: self.timestamp,
            edited_timestamp: self.edited_timestamp,
            pinned: self.pinned.unwrap_or(false),
            attachments: self
                .attachments
                .unwrap_or_default()
                .into_iter()
                .map(AttachmentPayload::into_attachment)
                .collect(),
            reactions: Vec::new(),
        }
    }

    /// Copy the present fields onto an existing message in place
    pub fn apply_to(&self, message: &mut Message) {
        if let Some(content) = &self.content {
            message.content.clone_from(content);
        }
        if self.edited_timestamp.is_some() {
            message.edited_timestamp = self.edited_timestamp;
        }
        if let Some(pinned) = self.pinned {
            message.pinned = pinned;
        }
        if let Some(attachments) = &self.attachments {
            message.attachments = attachments
                .iter()
                .cloned()
                .map(AttachmentPayload::into_attachment)
                .collect();
        }
    }
}

/// MESSAGE_DELETE payload
#[derive(Debug, Clone, Deserialize)]
pub struct MessageDeletePayload {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
}

/// MESSAGE_DELETE_BULK payload
#[derive(Debug, Clone, Deserialize)]
pub struct MessageDeleteBulkPayload {
    #[serde(default)]
    pub ids: Vec<Snowflake>,
    pub channel_id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
}

// === Reactions ===

/// MESSAGE_REACTION_ADD / MESSAGE_REACTION_REMOVE payload
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionPayload {
    pub user_id: Snowflake,
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    pub emoji: ReactionEmotePayload,
}

/// MESSAGE_REACTION_REMOVE_ALL payload
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionRemoveAllPayload {
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
}

/// MESSAGE_REACTION_REMOVE_EMOJI payload
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionRemoveEmojiPayload {
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    pub emoji: ReactionEmotePayload,
}

// === Presence & typing events ===

/// TYPING_START payload
#[derive(Debug, Clone, Deserialize)]
pub struct TypingStartPayload {
    pub channel_id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    pub user_id: Snowflake,
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub member: Option<MemberPayload>,
}

// === Role events ===

/// GUILD_ROLE_CREATE / GUILD_ROLE_UPDATE payload
#[derive(Debug, Clone, Deserialize)]
pub struct RoleEventPayload {
    pub guild_id: Snowflake,
    pub role: RolePayload,
}

/// GUILD_ROLE_DELETE payload
#[derive(Debug, Clone, Deserialize)]
pub struct RoleDeletePayload {
    pub guild_id: Snowflake,
    pub role_id: Snowflake,
}

// === Integrations, interactions & commands ===

/// INTEGRATION_CREATE / INTEGRATION_UPDATE payload
#[derive(Debug, Clone, Deserialize)]
pub struct IntegrationPayload {
    pub id: Snowflake,
    pub guild_id: Snowflake,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub application_id: Option<Snowflake>,
}

impl IntegrationPayload {
    pub fn into_integration(self) -> Integration {
        Integration {
            id: self.id,
            guild_id: self.guild_id,
            name: self.name,
            kind: self.kind,
            enabled: self.enabled,
            application_id: self.application_id,
        }
    }
}

/// INTEGRATION_DELETE payload
#[derive(Debug, Clone, Deserialize)]
pub struct IntegrationDeletePayload {
    pub id: Snowflake,
    pub guild_id: Snowflake,
    #[serde(default)]
    pub application_id: Option<Snowflake>,
}

/// INTERACTION_CREATE payload
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionPayload {
    pub id: Snowflake,
    pub application_id: Snowflake,
    #[serde(rename = "type", default = "default_interaction_kind")]
    pub kind: u8,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    #[serde(default)]
    pub channel_id: Option<Snowflake>,
    #[serde(default)]
    pub user: Option<UserPayload>,
    #[serde(default)]
    pub member: Option<MemberPayload>,
}

impl InteractionPayload {
    /// Build the entity, resolving the acting user from either the direct
    /// user field (private channels) or the member envelope (guilds)
    pub fn into_interaction(self) -> Interaction {
        let user_id = self
            .user
            .as_ref()
            .map(|u| u.id)
            .or_else(|| self.member.as_ref().and_then(|m| m.user.as_ref()).map(|u| u.id));
        Interaction {
            id: self.id,
            application_id: self.application_id,
            kind: InteractionKind::from_wire(self.kind),
            guild_id: self.guild_id,
            channel_id: self.channel_id,
            user_id,
        }
    }
}

/// APPLICATION_COMMAND_* payload
#[derive(Debug, Clone, Deserialize)]
pub struct CommandPayload {
    pub id: Snowflake,
    #[serde(default)]
    pub application_id: Snowflake,
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl CommandPayload {
    pub fn into_command(self) -> ApplicationCommand {
        ApplicationCommand {
            id: self.id,
            application_id: self.application_id,
            guild_id: self.guild_id,
            name: self.name,
            description: self.description,
        }
    }
}

// Default value functions

fn default_true() -> bool {
    true
}

fn default_sticker_format() -> u8 {
    1
}

fn default_privacy_level() -> u8 {
    2
}

fn default_chunk_count() -> u32 {
    1
}

fn default_interaction_kind() -> u8 {
    2
}
