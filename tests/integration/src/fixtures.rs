//! Payload builders for gateway event sequences

use serde_json::{json, Value};

/// READY payload announcing the given guild ids as unavailable
pub fn ready(guild_ids: &[u64]) -> Value {
    let guilds: Vec<_> = guild_ids
        .iter()
        .map(|id| json!({ "id": id.to_string(), "unavailable": true }))
        .collect();
    json!({
        "user": { "id": "1", "username": "bot" },
        "session_id": "session-1",
        "guilds": guilds
    })
}

/// Full GUILD_CREATE payload with a couple of children
pub fn guild_create(id: u64) -> Value {
    json!({
        "id": id.to_string(),
        "name": format!("guild-{id}"),
        "owner_id": "900",
        "unavailable": false,
        "member_count": 2,
        "channels": [
            { "id": (id * 10).to_string(), "type": 0, "name": "general" },
            { "id": (id * 10 + 1).to_string(), "type": 2, "name": "voice" }
        ],
        "roles": [{ "id": id.to_string(), "name": "@everyone" }],
        "members": [
            { "user": { "id": "900", "username": "owner" } },
            { "user": { "id": "901", "username": "regular" } }
        ]
    })
}

/// Member payload for GUILD_MEMBER_ADD / _UPDATE
pub fn member(guild_id: u64, user_id: u64, username: &str, nick: Option<&str>) -> Value {
    json!({
        "guild_id": guild_id.to_string(),
        "user": { "id": user_id.to_string(), "username": username },
        "nick": nick
    })
}

/// MESSAGE_CREATE payload
pub fn message(id: u64, channel_id: u64, author_id: u64, content: &str) -> Value {
    json!({
        "id": id.to_string(),
        "channel_id": channel_id.to_string(),
        "author": { "id": author_id.to_string(), "username": format!("user-{author_id}") },
        "content": content,
        "timestamp": "2024-06-01T10:00:00Z"
    })
}

/// MESSAGE_REACTION_ADD / _REMOVE payload with a unicode emote
pub fn reaction(message_id: u64, channel_id: u64, user_id: u64, emoji: &str) -> Value {
    json!({
        "user_id": user_id.to_string(),
        "channel_id": channel_id.to_string(),
        "message_id": message_id.to_string(),
        "emoji": { "id": null, "name": emoji }
    })
}

/// GUILD_MEMBERS_CHUNK payload
pub fn member_chunk(guild_id: u64, index: u32, count: u32, user_ids: &[u64]) -> Value {
    let members: Vec<_> = user_ids
        .iter()
        .map(|id| json!({ "user": { "id": id.to_string(), "username": format!("u{id}") } }))
        .collect();
    json!({
        "guild_id": guild_id.to_string(),
        "chunk_index": index,
        "chunk_count": count,
        "members": members
    })
}
