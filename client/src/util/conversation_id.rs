//! Client-side conversation id generation.
//!
//! A fresh conversation gets the current Unix time in milliseconds as its id
//! until the backend hands out one of its own.

#[cfg(test)]
#[path = "conversation_id_test.rs"]
mod conversation_id_test;

use crate::net::types::ConversationId;

/// Build a conversation id from a millisecond timestamp.
pub fn from_millis(millis: u64) -> ConversationId {
    ConversationId::new(millis.to_string())
}

/// Generate an id for a conversation the backend has not seen yet.
pub fn fresh() -> ConversationId {
    from_millis(now_millis())
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            js_sys::Date::now() as u64
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}
