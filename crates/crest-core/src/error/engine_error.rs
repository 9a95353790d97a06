//! Engine errors - absorbed at the dispatch boundary, never propagated out

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Errors raised inside event handlers
///
/// Every variant is logged and swallowed by the router; none may terminate
/// the ingestion path.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("malformed {event} payload: {source}")]
    MalformedPayload {
        event: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("guild not cached: {0}")]
    UnknownGuild(Snowflake),

    #[error("channel not cached: {0}")]
    UnknownChannel(Snowflake),
}

impl EngineError {
    /// Wrap a decode failure with the event name it occurred in
    pub fn malformed(event: &'static str, source: serde_json::Error) -> Self {
        Self::MalformedPayload { event, source }
    }
}

/// Result alias for handler-internal fallibility
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_payload_message() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = EngineError::malformed("GUILD_CREATE", source);
        assert!(err.to_string().contains("GUILD_CREATE"));
    }
}
