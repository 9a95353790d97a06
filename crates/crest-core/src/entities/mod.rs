//! Domain entities mirrored from the remote service

mod channel;
mod emoji;
mod guild;
mod interaction;
mod invite;
mod member;
mod message;
mod presence;
mod role;
mod stage;
mod user;
mod voice;

pub use channel::{Channel, ChannelType, OverwriteTarget, PermissionOverwrite};
pub use emoji::{Emoji, Sticker, StickerFormat};
pub use guild::Guild;
pub use interaction::{ApplicationCommand, Integration, Interaction, InteractionKind};
pub use invite::Invite;
pub use member::Member;
pub use message::{Attachment, Message, Reaction, ReactionEmote};
pub use presence::{Activity, ActivityKind, Presence, UserStatus};
pub use role::Role;
pub use stage::{PrivacyLevel, StageInstance};
pub use user::{shared, Shared, SharedUser, User};
pub use voice::{VoiceRegion, VoiceState};
