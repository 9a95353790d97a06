//! # crest-state
//!
//! State layer: concurrent entity stores, the global identity cache, the
//! presence map, and the bounded recent-message cache interface. All maps
//! support concurrent reads while a single event handler mutates entries.

mod guild;
mod messages;
mod presence;
mod store;
mod users;

pub use guild::CachedGuild;
pub use messages::{BoundedMessageCache, MessageStore};
pub use presence::PresenceStore;
pub use store::EntityStore;
pub use users::UserCache;
