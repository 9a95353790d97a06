//! Member entity - a user's membership in a guild
//!
//! Holds a shared handle to the canonical User in the identity cache;
//! a member never owns its user.

use chrono::{DateTime, Utc};

use crate::entities::user::{shared, SharedUser, User};
use crate::value_objects::Snowflake;

/// Guild member entity
#[derive(Debug, Clone)]
pub struct Member {
    /// Non-owning back-reference to the owning guild
    pub guild_id: Snowflake,
    pub user: SharedUser,
    pub nick: Option<String>,
    pub roles: Vec<Snowflake>,
    pub joined_at: Option<DateTime<Utc>>,
    pub deaf: bool,
    pub mute: bool,
}

impl Member {
    /// Create a new Member around a canonical user handle
    pub fn new(guild_id: Snowflake, user: SharedUser) -> Self {
        Self {
            guild_id,
            user,
            nick: None,
            roles: Vec::new(),
            joined_at: None,
            deaf: false,
            mute: false,
        }
    }

    /// Create a minimally populated stand-in for an uncached member
    pub fn phantom(guild_id: Snowflake, user_id: Snowflake) -> Self {
        Self::new(guild_id, shared(User::phantom(user_id)))
    }

    /// Id of the referenced user
    pub fn user_id(&self) -> Snowflake {
        self.user.read().id
    }

    /// Display name (nickname if set, otherwise the username)
    pub fn display_name(&self) -> String {
        match &self.nick {
            Some(nick) => nick.clone(),
            None => self.user.read().username.clone(),
        }
    }

    /// Check if the member has a specific role
    #[inline]
    pub fn has_role(&self, role_id: Snowflake) -> bool {
        self.roles.contains(&role_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_creation() {
        let user = shared(User::new(Snowflake::new(200), "alice".to_string()));
        let member = Member::new(Snowflake::new(100), user);
        assert_eq!(member.guild_id, Snowflake::new(100));
        assert_eq!(member.user_id(), Snowflake::new(200));
        assert!(member.roles.is_empty());
    }

    #[test]
    fn test_display_name_prefers_nick() {
        let user = shared(User::new(Snowflake::new(2), "alice".to_string()));
        let mut member = Member::new(Snowflake::new(1), user);
        assert_eq!(member.display_name(), "alice");

        member.nick = Some("Ally".to_string());
        assert_eq!(member.display_name(), "Ally");
    }

    #[test]
    fn test_member_sees_user_updates() {
        let user = shared(User::new(Snowflake::new(2), "old".to_string()));
        let member = Member::new(Snowflake::new(1), user.clone());

        user.write().username = "new".to_string();
        assert_eq!(member.display_name(), "new");
    }

    #[test]
    fn test_phantom_member() {
        let member = Member::phantom(Snowflake::new(1), Snowflake::new(9));
        assert_eq!(member.user_id(), Snowflake::new(9));
        assert!(member.user.read().is_phantom());
    }
}
