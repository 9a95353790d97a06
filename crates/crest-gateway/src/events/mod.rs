//! Event vocabulary: wire names, payload DTOs, and subscriber notifications

pub mod event_types;
pub mod notifications;
pub mod payloads;

pub use event_types::EventName;
pub use notifications::{EventKind, GatewayEvent, MemberChunk};
