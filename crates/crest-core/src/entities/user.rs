//! User entity - a globally unique identity

use parking_lot::RwLock;
use std::sync::Arc;

use crate::value_objects::Snowflake;

/// A cached entity shared behind a lock.
///
/// Updates mutate the entity in place, so every holder of the handle
/// observes the change. A single event handler is in flight at a time,
/// which keeps write locks uncontended on the dispatch path.
pub type Shared<T> = Arc<RwLock<T>>;

/// Wrap an entity into a shared handle
pub fn shared<T>(value: T) -> Shared<T> {
    Arc::new(RwLock::new(value))
}

/// Canonical handle to a user in the identity cache
pub type SharedUser = Shared<User>;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub discriminator: String,
    pub avatar: Option<String>,
    pub bot: bool,
}

impl User {
    /// Create a new User
    pub fn new(id: Snowflake, username: String) -> Self {
        Self {
            id,
            username,
            discriminator: String::new(),
            avatar: None,
            bot: false,
        }
    }

    /// Create a minimally populated stand-in carrying only the id
    pub fn phantom(id: Snowflake) -> Self {
        Self::new(id, String::new())
    }

    /// Check whether this user carries more than a bare id
    #[inline]
    pub fn is_phantom(&self) -> bool {
        self.username.is_empty()
    }

    /// Merge mutable display fields from a newer copy of the same user
    ///
    /// Only the display fields move; id and bot flag are immutable.
    pub fn merge_from(&mut self, incoming: &User) {
        debug_assert_eq!(self.id, incoming.id);
        if !incoming.username.is_empty() {
            self.username.clone_from(&incoming.username);
        }
        if !incoming.discriminator.is_empty() {
            self.discriminator.clone_from(&incoming.discriminator);
        }
        if incoming.avatar.is_some() {
            self.avatar.clone_from(&incoming.avatar);
        }
    }

    /// Tag in `username#discriminator` form
    pub fn tag(&self) -> String {
        if self.discriminator.is_empty() {
            self.username.clone()
        } else {
            format!("{}#{}", self.username, self.discriminator)
        }
    }
}
