//! Emoji and sticker entities

use crate::value_objects::Snowflake;

/// Custom guild emoji
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emoji {
    pub id: Snowflake,
    /// Non-owning back-reference to the owning guild
    pub guild_id: Snowflake,
    pub name: String,
    pub roles: Vec<Snowflake>,
    pub animated: bool,
    pub managed: bool,
    pub available: bool,
}

impl Emoji {
    /// Create a new Emoji
    pub fn new(id: Snowflake, guild_id: Snowflake, name: String) -> Self {
        Self {
            id,
            guild_id,
            name,
            roles: Vec::new(),
            animated: false,
            managed: false,
            available: true,
        }
    }
}

/// Sticker format discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StickerFormat {
    #[default]
    Png,
    Apng,
    Lottie,
    Unknown(u8),
}

impl StickerFormat {
    /// Decode the numeric wire discriminator
    pub fn from_wire(value: u8) -> Self {
        match value {
            1 => Self::Png,
            2 => Self::Apng,
            3 => Self::Lottie,
            other => Self::Unknown(other),
        }
    }
}

/// Custom guild sticker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sticker {
    pub id: Snowflake,
    /// Non-owning back-reference to the owning guild
    pub guild_id: Snowflake,
    pub name: String,
    pub description: Option<String>,
    pub tags: String,
    pub format: StickerFormat,
}

impl Sticker {
    /// Create a new Sticker
    pub fn new(id: Snowflake, guild_id: Snowflake, name: String) -> Self {
        Self {
            id,
            guild_id,
            name,
            description: None,
            tags: String::new(),
            format: StickerFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sticker_format_from_wire() {
        assert_eq!(StickerFormat::from_wire(1), StickerFormat::Png);
        assert_eq!(StickerFormat::from_wire(3), StickerFormat::Lottie);
        assert_eq!(StickerFormat::from_wire(9), StickerFormat::Unknown(9));
    }
}
