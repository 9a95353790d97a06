//! Guild entity - scalar fields of a community container
//!
//! Child collections (channels, roles, members, ...) live on the cached
//! aggregate in the state layer; this struct only carries the fields that
//! update events mutate in place.

use crate::value_objects::Snowflake;

/// Guild (server) entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guild {
    pub id: Snowflake,
    pub name: String,
    pub icon: Option<String>,
    pub description: Option<String>,
    pub owner_id: Snowflake,
    pub features: Vec<String>,
}

impl Guild {
    /// Create a new Guild
    pub fn new(id: Snowflake, name: String, owner_id: Snowflake) -> Self {
        Self {
            id,
            name,
            icon: None,
            description: None,
            owner_id,
            features: Vec::new(),
        }
    }

    /// Create a minimally populated stand-in carrying only the id
    pub fn phantom(id: Snowflake) -> Self {
        Self::new(id, String::new(), Snowflake::default())
    }

    /// Check if a user is the guild owner
    #[inline]
    pub fn is_owner(&self, user_id: Snowflake) -> bool {
        self.owner_id == user_id
    }

    /// Get the guild icon URL if set
    pub fn icon_url(&self) -> Option<String> {
        self.icon
            .as_ref()
            .map(|hash| format!("/icons/{}/{}.png", self.id, hash))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guild_creation() {
        let guild = Guild::new(
            Snowflake::new(1),
            "Test Guild".to_string(),
            Snowflake::new(100),
        );
        assert_eq!(guild.name, "Test Guild");
        assert!(guild.is_owner(Snowflake::new(100)));
        assert!(!guild.is_owner(Snowflake::new(200)));
    }

    #[test]
    fn test_guild_icon_url() {
        let mut guild = Guild::new(Snowflake::new(123), "Test".to_string(), Snowflake::new(1));
        assert!(guild.icon_url().is_none());

        guild.icon = Some("abc123".to_string());
        assert_eq!(guild.icon_url(), Some("/icons/123/abc123.png".to_string()));
    }

    #[test]
    fn test_phantom_guild() {
        let guild = Guild::phantom(Snowflake::new(7));
        assert_eq!(guild.id, Snowflake::new(7));
        assert!(guild.name.is_empty());
    }
}
