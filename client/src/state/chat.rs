//! Chat screen state: the current conversation and its messages.
//!
//! DESIGN
//! ======
//! Every backend operation is split into a `begin_*` step that mutates state
//! synchronously and yields the request to send, and a `finish_*` step that
//! folds the response back in. Network failures are logged and never roll
//! back the optimistic user message.
//!
//! Messages carry a client-generated [`MessageKey`] so feedback updates target
//! exactly one entry even after the list is re-rendered or reloaded.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use uuid::Uuid;

use crate::net::api::ApiError;
use crate::net::types::{
    ChatReply, ChatRequest, ClearedConversation, ConversationId, FeedbackRequest, StoredMessage, SystemMessageRequest,
};
use crate::util::conversation_id;

/// Stable client-side identity of a rendered message.
pub type MessageKey = Uuid;

/// Author of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Ai,
}

impl Sender {
    /// Map a backend `role` onto a sender. Anything but `"user"` is treated
    /// as assistant output.
    pub fn from_role(role: &str) -> Self {
        if role == "user" { Self::User } else { Self::Ai }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Ai => "ai",
        }
    }
}

/// Thumbs-up/down rating on an assistant reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Positive,
    Negative,
}

impl Feedback {
    pub fn from_positive(is_positive: bool) -> Self {
        if is_positive { Self::Positive } else { Self::Negative }
    }

    pub fn is_positive(self) -> bool {
        matches!(self, Self::Positive)
    }
}

/// A single chat message.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub key: MessageKey,
    pub sender: Sender,
    pub text: String,
    /// Server-assigned id; absent for freshly sent user messages.
    pub id: Option<String>,
    /// Set once, after the backend accepted a rating.
    pub feedback: Option<Feedback>,
    /// A rating request for this message is in flight.
    pub feedback_pending: bool,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            key: Uuid::new_v4(),
            sender: Sender::User,
            text: text.into(),
            id: None,
            feedback: None,
            feedback_pending: false,
        }
    }

    pub fn ai(text: impl Into<String>, id: Option<String>) -> Self {
        Self { key: Uuid::new_v4(), sender: Sender::Ai, text: text.into(), id, feedback: None, feedback_pending: false }
    }

    pub fn from_stored(stored: StoredMessage) -> Self {
        Self {
            key: Uuid::new_v4(),
            sender: Sender::from_role(&stored.role),
            text: stored.content,
            id: stored.id,
            feedback: None,
            feedback_pending: false,
        }
    }

    /// Whether the feedback buttons for this message should be enabled.
    pub fn accepts_feedback(&self) -> bool {
        self.sender == Sender::Ai && self.feedback.is_none() && !self.feedback_pending
    }
}

/// State for the chat screen, provided as `RwSignal<ChatState>` context.
#[derive(Clone, Debug)]
pub struct ChatState {
    pub conversation_id: Option<ConversationId>,
    pub messages: Vec<ChatMessage>,
    /// Composer text; cleared only after a successful send.
    pub input: String,
    /// A send or load is in flight: blocks submits and shows the typing
    /// indicator. Derived from `send_in_flight` and `pending_load`.
    pub loading: bool,
    /// A chat request has been posted and its reply has not landed yet.
    pub send_in_flight: bool,
    /// Centered welcome layout until the first send or load.
    pub is_first_interaction: bool,
    pub system_message: String,
    /// Generation counter for conversation loads.
    pub load_seq: u64,
    /// Generation of the load currently allowed to land, if any.
    pub pending_load: Option<u64>,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            conversation_id: None,
            messages: Vec::new(),
            input: String::new(),
            loading: false,
            send_in_flight: false,
            is_first_interaction: true,
            system_message: String::new(),
            load_seq: 0,
            pending_load: None,
        }
    }
}

impl ChatState {
    /// Return the current conversation id, generating one if none exists yet.
    pub fn ensure_conversation_id(&mut self) -> ConversationId {
        self.conversation_id.get_or_insert_with(conversation_id::fresh).clone()
    }

    // =========================================================================
    // SEND
    // =========================================================================

    /// Optimistically append the user's message and build the chat request.
    ///
    /// Returns `None` (and changes nothing) for blank input or while another
    /// request is in flight.
    pub fn begin_send(&mut self, text: &str) -> Option<ChatRequest> {
        if text.trim().is_empty() || self.loading {
            return None;
        }
        let conversation_id = self.ensure_conversation_id();
        self.is_first_interaction = false;
        self.messages.push(ChatMessage::user(text));
        self.send_in_flight = true;
        self.sync_loading();
        Some(ChatRequest::user(text, conversation_id))
    }

    /// Fold the chat reply in. The reply is dropped if the user has since
    /// switched to another conversation.
    pub fn finish_send(&mut self, request: &ChatRequest, result: Result<ChatReply, ApiError>) {
        self.send_in_flight = false;
        self.sync_loading();
        match result {
            Ok(reply) => {
                if self.conversation_id.as_ref() != Some(&request.conversation_id) {
                    log::warn!("dropping reply for inactive conversation {}", request.conversation_id);
                    return;
                }
                self.messages.push(ChatMessage::ai(reply.response, reply.message_id));
                self.input.clear();
            }
            Err(e) => log::error!("chat request failed: {e}"),
        }
    }

    fn sync_loading(&mut self) {
        self.loading = self.send_in_flight || self.pending_load.is_some();
    }

    // =========================================================================
    // LOAD / SWITCH
    // =========================================================================

    /// Mark a conversation load as started and return its generation token.
    pub fn begin_load(&mut self) -> u64 {
        self.load_seq += 1;
        self.pending_load = Some(self.load_seq);
        self.sync_loading();
        self.load_seq
    }

    /// Replace the whole history with the loaded conversation.
    ///
    /// Returns `true` when the history was replaced. Completions whose token
    /// was superseded by a newer load or a conversation reset are ignored.
    pub fn finish_load(
        &mut self,
        seq: u64,
        id: ConversationId,
        result: Result<Vec<StoredMessage>, ApiError>,
    ) -> bool {
        if self.pending_load != Some(seq) {
            log::debug!("ignoring stale load of conversation {id}");
            return false;
        }
        self.pending_load = None;
        self.sync_loading();
        match result {
            Ok(records) => {
                self.messages = records.into_iter().map(ChatMessage::from_stored).collect();
                self.conversation_id = Some(id);
                self.is_first_interaction = false;
                true
            }
            Err(e) => {
                log::error!("loading conversation {id} failed: {e}");
                false
            }
        }
    }

    fn reset_conversation(&mut self, id: ConversationId) {
        self.pending_load = None;
        self.sync_loading();
        self.conversation_id = Some(id);
        self.messages.clear();
    }

    /// Switch to a brand-new conversation without contacting the server.
    pub fn start_new_conversation(&mut self) {
        self.reset_conversation(conversation_id::fresh());
    }

    /// Start a new conversation and return to the welcome layout.
    pub fn go_to_home_page(&mut self) {
        self.start_new_conversation();
        self.is_first_interaction = true;
    }

    /// Adopt the id the server assigned when it cleared the conversation.
    pub fn finish_clear(&mut self, result: Result<ClearedConversation, ApiError>) -> bool {
        match result {
            Ok(cleared) => {
                self.reset_conversation(cleared.conversation_id);
                true
            }
            Err(e) => {
                log::error!("clearing conversation failed: {e}");
                false
            }
        }
    }

    // =========================================================================
    // FEEDBACK
    // =========================================================================

    /// Build the feedback request for the message identified by `key`.
    ///
    /// Returns `None` when the message is unknown, was already rated, has a
    /// rating in flight, or has no server id yet. Otherwise the message is
    /// marked pending until [`Self::finish_feedback`].
    pub fn feedback_request(&mut self, key: MessageKey, is_positive: bool) -> Option<FeedbackRequest> {
        let conversation_id = self.ensure_conversation_id();
        let message = self.messages.iter_mut().find(|m| m.key == key)?;
        if message.feedback.is_some() || message.feedback_pending {
            return None;
        }
        let Some(message_id) = message.id.clone() else {
            log::error!("No message ID available for feedback");
            return None;
        };
        message.feedback_pending = true;
        Some(FeedbackRequest { conversation_id, message_id, is_positive })
    }

    /// Record accepted feedback and release the pending mark. A rating that is
    /// already set is kept; a failed request leaves the message rateable.
    pub fn finish_feedback(&mut self, key: MessageKey, is_positive: bool, result: Result<(), ApiError>) -> bool {
        if let Err(e) = &result {
            log::error!("sending feedback failed: {e}");
        }
        let Some(message) = self.messages.iter_mut().find(|m| m.key == key) else {
            return false;
        };
        message.feedback_pending = false;
        if result.is_err() || message.feedback.is_some() {
            return false;
        }
        message.feedback = Some(Feedback::from_positive(is_positive));
        true
    }

    // =========================================================================
    // SYSTEM MESSAGE
    // =========================================================================

    pub fn system_message_request(&mut self) -> SystemMessageRequest {
        SystemMessageRequest { conversation_id: self.ensure_conversation_id(), system_message: self.system_message.clone() }
    }
}
