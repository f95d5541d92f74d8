//! REST API client for the chat backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR) and native tests: every call fails with
//! [`ApiError::Unavailable`] since these endpoints are only meaningful in the
//! browser.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures, non-2xx statuses and undecodable bodies all surface as
//! an [`ApiError`]; callers decide whether to log or show them.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use super::types::{
    ChatReply, ChatRequest, ClearedConversation, ConversationId, ConversationSummary, FeedbackRequest, StoredMessage,
    SystemMessageRequest,
};

/// Backend origin used when no compile-time override is set.
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Failure of a single backend call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (network, CORS, abort).
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status.
    #[error("unexpected status: {0}")]
    Status(u16),

    /// The response body did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),

    /// The configured base URL cannot host the endpoint path.
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(String),

    /// HTTP is only wired up in the hydrated browser build.
    #[error("not available on server")]
    Unavailable,
}

/// Operations the chat screen and history panel need from the backend.
///
/// [`ApiClient`] is the HTTP implementation; tests substitute a recording
/// mock so state transitions can be checked without a browser.
#[allow(async_fn_in_trait)]
pub trait ChatApi {
    /// `POST /chat/`
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError>;

    /// `GET /conversations/{id}/messages`
    async fn conversation_messages(&self, id: &ConversationId) -> Result<Vec<StoredMessage>, ApiError>;

    /// `GET /conversations/`
    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, ApiError>;

    /// `DELETE /conversations/{id}`
    async fn delete_conversation(&self, id: &ConversationId) -> Result<(), ApiError>;

    /// `POST /feedback/`
    async fn send_feedback(&self, request: &FeedbackRequest) -> Result<(), ApiError>;

    /// `POST /clear-conversation/?conversation_id=...`
    async fn clear_conversation(&self, id: &ConversationId) -> Result<ClearedConversation, ApiError>;

    /// `POST /update-system-message/`
    async fn update_system_message(&self, request: &SystemMessageRequest) -> Result<(), ApiError>;

    /// Download URL for `GET /export-conversation/{id}`.
    fn export_url(&self, id: &ConversationId) -> Result<String, ApiError>;
}

/// HTTP client bound to one backend origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
}

impl Default for ApiClient {
    /// Uses `ORITO_API_BASE` from the build environment, else [`DEFAULT_API_BASE`].
    fn default() -> Self {
        Self::new(option_env!("ORITO_API_BASE").unwrap_or(DEFAULT_API_BASE))
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join path segments onto the base URL, percent-encoding each one.
    /// A trailing `""` segment yields the trailing slash the backend routes use.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn chat_url(&self) -> Result<Url, ApiError> {
        self.endpoint(&["chat", ""])
    }

    fn messages_url(&self, id: &ConversationId) -> Result<Url, ApiError> {
        self.endpoint(&["conversations", id.as_str(), "messages"])
    }

    fn conversations_url(&self) -> Result<Url, ApiError> {
        self.endpoint(&["conversations", ""])
    }

    fn conversation_url(&self, id: &ConversationId) -> Result<Url, ApiError> {
        self.endpoint(&["conversations", id.as_str()])
    }

    fn feedback_url(&self) -> Result<Url, ApiError> {
        self.endpoint(&["feedback", ""])
    }

    fn clear_url(&self, id: &ConversationId) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&["clear-conversation", ""])?;
        url.query_pairs_mut().append_pair("conversation_id", id.as_str());
        Ok(url)
    }

    fn system_message_url(&self) -> Result<Url, ApiError> {
        self.endpoint(&["update-system-message", ""])
    }
}

impl ChatApi for ApiClient {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError> {
        post_json(self.chat_url()?, request).await
    }

    async fn conversation_messages(&self, id: &ConversationId) -> Result<Vec<StoredMessage>, ApiError> {
        get_json(self.messages_url(id)?).await
    }

    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, ApiError> {
        get_json(self.conversations_url()?).await
    }

    async fn delete_conversation(&self, id: &ConversationId) -> Result<(), ApiError> {
        delete(self.conversation_url(id)?).await
    }

    async fn send_feedback(&self, request: &FeedbackRequest) -> Result<(), ApiError> {
        post_json_discard(self.feedback_url()?, request).await
    }

    async fn clear_conversation(&self, id: &ConversationId) -> Result<ClearedConversation, ApiError> {
        post_empty(self.clear_url(id)?).await
    }

    async fn update_system_message(&self, request: &SystemMessageRequest) -> Result<(), ApiError> {
        post_json_discard(self.system_message_url()?, request).await
    }

    fn export_url(&self, id: &ConversationId) -> Result<String, ApiError> {
        Ok(self.endpoint(&["export-conversation", id.as_str()])?.into())
    }
}

// =============================================================================
// TRANSPORT
// =============================================================================

#[cfg(feature = "hydrate")]
fn transport_error(e: gloo_net::Error) -> ApiError {
    ApiError::Transport(e.to_string())
}

#[cfg(feature = "hydrate")]
async fn execute(
    request: Result<gloo_net::http::Request, gloo_net::Error>,
) -> Result<gloo_net::http::Response, ApiError> {
    let resp = request.map_err(transport_error)?.send().await.map_err(transport_error)?;
    if !resp.ok() {
        return Err(ApiError::Status(resp.status()));
    }
    Ok(resp)
}

async fn get_json<T: DeserializeOwned>(url: Url) -> Result<T, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = execute(gloo_net::http::Request::get(url.as_str()).build()).await?;
        resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
        Err(ApiError::Unavailable)
    }
}

async fn post_json<B: Serialize, T: DeserializeOwned>(url: Url, body: &B) -> Result<T, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = execute(gloo_net::http::Request::post(url.as_str()).json(body)).await?;
        resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, body);
        Err(ApiError::Unavailable)
    }
}

async fn post_json_discard<B: Serialize>(url: Url, body: &B) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        execute(gloo_net::http::Request::post(url.as_str()).json(body)).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, body);
        Err(ApiError::Unavailable)
    }
}

async fn post_empty<T: DeserializeOwned>(url: Url) -> Result<T, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = execute(gloo_net::http::Request::post(url.as_str()).build()).await?;
        resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
        Err(ApiError::Unavailable)
    }
}

async fn delete(url: Url) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        execute(gloo_net::http::Request::delete(url.as_str()).build()).await?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
        Err(ApiError::Unavailable)
    }
}
