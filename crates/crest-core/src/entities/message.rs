//! Message entity and reactions

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// An emote referenced by a reaction: custom (by id) or unicode (by name)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEmote {
    pub id: Option<Snowflake>,
    pub name: String,
}

impl ReactionEmote {
    /// Unicode emote
    pub fn unicode(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Custom guild emote
    pub fn custom(id: Snowflake, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }
}

/// Aggregated reaction entry on a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub emote: ReactionEmote,
    pub count: u64,
    /// Whether the current user is among the reactors
    pub me: bool,
}

/// File attached to a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub id: Snowflake,
    pub filename: String,
    pub size: u64,
    pub url: String,
}

/// Cached message entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    /// Non-owning back-reference; `None` for private channels
    pub guild_id: Option<Snowflake>,
    pub author_id: Snowflake,
    pub content: String,
    pub timestamp: Option<DateTime<Utc>>,
    pub edited_timestamp: Option<DateTime<Utc>>,
    pub pinned: bool,
    pub attachments: Vec<Attachment>,
    pub reactions: Vec<Reaction>,
}

impl Message {
    /// Create a new Message
    pub fn new(id: Snowflake, channel_id: Snowflake, author_id: Snowflake) -> Self {
        Self {
            id,
            channel_id,
            guild_id: None,
            author_id,
            content: String::new(),
            timestamp: None,
            edited_timestamp: None,
            pinned: false,
            attachments: Vec::new(),
            reactions: Vec::new(),
        }
    }

    /// Record one added reaction, creating the entry on first use
    pub fn add_reaction(&mut self, emote: &ReactionEmote, me: bool) {
        if let Some(entry) = self.reactions.iter_mut().find(|r| r.emote == *emote) {
            entry.count += 1;
            entry.me |= me;
        } else {
            self.reactions.push(Reaction {
                emote: emote.clone(),
                count: 1,
                me,
            });
        }
    }

    /// Record one removed reaction
    ///
    /// The count never underflows; an entry reaching zero is dropped from
    /// the list. A removal for an unknown emote is a tolerated race.
    pub fn remove_reaction(&mut self, emote: &ReactionEmote, me: bool) {
        if let Some(pos) = self.reactions.iter().position(|r| r.emote == *emote) {
            let entry = &mut self.reactions[pos];
            entry.count = entry.count.saturating_sub(1);
            if me {
                entry.me = false;
            }
            if entry.count == 0 {
                self.reactions.remove(pos);
            }
        }
    }

    /// Drop every reaction entry for one emote
    pub fn remove_reaction_emote(&mut self, emote: &ReactionEmote) {
        self.reactions.retain(|r| r.emote != *emote);
    }

    /// Drop all reactions
    pub fn clear_reactions(&mut self) {
        self.reactions.clear();
    }
}
