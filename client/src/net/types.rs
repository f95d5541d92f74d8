//! Wire DTOs for the chat backend REST API.
//!
//! DESIGN
//! ======
//! Request types serialize to exactly the JSON bodies the backend expects;
//! response types are lenient about id representation because the backend
//! may hand out numeric or string identifiers.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Opaque conversation identifier.
///
/// Client-generated ids are millisecond timestamps; server-assigned ids are
/// adopted verbatim. Numeric ids from the backend decode to their decimal
/// text and are sent back as strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl<'de> Deserialize<'de> for ConversationId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => Ok(Self(s)),
            serde_json::Value::Number(n) => Ok(Self(n.to_string())),
            _ => Err(D::Error::custom("expected string or number conversation id")),
        }
    }
}

impl ConversationId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ConversationId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for ConversationId {
    fn from(raw: &str) -> Self {
        Self(raw.to_owned())
    }
}

/// Body of `POST /chat/`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub role: String,
    pub conversation_id: ConversationId,
}

impl ChatRequest {
    pub fn user(message: impl Into<String>, conversation_id: ConversationId) -> Self {
        Self { message: message.into(), role: "user".to_owned(), conversation_id }
    }
}

/// Response of `POST /chat/`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub message_id: Option<String>,
}

/// One persisted message from `GET /conversations/{id}/messages`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StoredMessage {
    pub role: String,
    pub content: String,
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub id: Option<String>,
}

/// Entry of `GET /conversations/`, kept exactly as the backend sent it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub conversation_id: ConversationId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Body of `POST /feedback/`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FeedbackRequest {
    pub conversation_id: ConversationId,
    pub message_id: String,
    pub is_positive: bool,
}

/// Response of `POST /clear-conversation/`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ClearedConversation {
    pub conversation_id: ConversationId,
}

/// Body of `POST /update-system-message/`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SystemMessageRequest {
    pub conversation_id: ConversationId,
    pub system_message: String,
}

/// Accept `"m1"`, `42`, or `null` for server-assigned message ids.
fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) => Ok(Some(s)),
        serde_json::Value::Number(n) => Ok(Some(n.to_string())),
        _ => Err(D::Error::custom("expected string or number id")),
    }
}
