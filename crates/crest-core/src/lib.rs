//! # crest-core
//!
//! Domain layer containing entities, value objects, and engine error types.
//! This crate has zero dependencies on infrastructure (transport, REST
//! client, stores).

pub mod entities;
pub mod error;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    shared, Activity, ActivityKind, ApplicationCommand, Attachment, Channel, ChannelType, Emoji,
    Guild, Integration, Interaction, InteractionKind, Invite, Member, Message, OverwriteTarget,
    PermissionOverwrite, Presence, PrivacyLevel, Reaction, ReactionEmote, Role, Shared, SharedUser,
    StageInstance, Sticker, StickerFormat, User, UserStatus, VoiceRegion, VoiceState,
};
pub use error::{EngineError, EngineResult};
pub use value_objects::{Permissions, Snowflake, SnowflakeParseError};
