use std::cell::RefCell;
use std::collections::HashMap;

use futures::executor::block_on;
use serde_json::json;

use super::*;
use crate::net::types::{
    ChatReply, ChatRequest, ClearedConversation, ConversationSummary, FeedbackRequest, StoredMessage,
    SystemMessageRequest,
};
use crate::state::chat::{ChatMessage, Feedback, Sender};

// =============================================================
// Test doubles
// =============================================================

impl<T> StateCell<T> for RefCell<T> {
    fn apply<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Call {
    Chat(serde_json::Value),
    Messages(String),
    List,
    Delete(String),
    Feedback(serde_json::Value),
    Clear(String),
    SystemMessage(serde_json::Value),
}

/// Backend mock that records every request. Endpoints without a configured
/// response fail with a 500.
#[derive(Default)]
struct RecordingApi {
    calls: RefCell<Vec<Call>>,
    chat_reply: Option<ChatReply>,
    messages: HashMap<String, Vec<StoredMessage>>,
    conversations: Option<Vec<ConversationSummary>>,
    cleared_id: Option<String>,
    accept_writes: bool,
}

impl RecordingApi {
    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn write_result(&self) -> Result<(), ApiError> {
        if self.accept_writes { Ok(()) } else { Err(ApiError::Status(500)) }
    }
}

impl ChatApi for RecordingApi {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, ApiError> {
        self.record(Call::Chat(serde_json::to_value(request).unwrap()));
        self.chat_reply.clone().ok_or(ApiError::Status(500))
    }

    async fn conversation_messages(&self, id: &ConversationId) -> Result<Vec<StoredMessage>, ApiError> {
        self.record(Call::Messages(id.to_string()));
        self.messages.get(id.as_str()).cloned().ok_or(ApiError::Status(404))
    }

    async fn list_conversations(&self) -> Result<Vec<ConversationSummary>, ApiError> {
        self.record(Call::List);
        self.conversations.clone().ok_or(ApiError::Transport("offline".to_owned()))
    }

    async fn delete_conversation(&self, id: &ConversationId) -> Result<(), ApiError> {
        self.record(Call::Delete(id.to_string()));
        self.write_result()
    }

    async fn send_feedback(&self, request: &FeedbackRequest) -> Result<(), ApiError> {
        self.record(Call::Feedback(serde_json::to_value(request).unwrap()));
        self.write_result()
    }

    async fn clear_conversation(&self, id: &ConversationId) -> Result<ClearedConversation, ApiError> {
        self.record(Call::Clear(id.to_string()));
        self.cleared_id
            .clone()
            .map(|id| ClearedConversation { conversation_id: ConversationId::from(id) })
            .ok_or(ApiError::Status(500))
    }

    async fn update_system_message(&self, request: &SystemMessageRequest) -> Result<(), ApiError> {
        self.record(Call::SystemMessage(serde_json::to_value(request).unwrap()));
        self.write_result()
    }

    fn export_url(&self, id: &ConversationId) -> Result<String, ApiError> {
        Ok(format!("http://backend.test/export-conversation/{id}"))
    }
}

fn chat_with_id(id: &str) -> RefCell<ChatState> {
    RefCell::new(ChatState { conversation_id: Some(ConversationId::from(id)), ..ChatState::default() })
}

fn summary(id: &str) -> ConversationSummary {
    ConversationSummary { conversation_id: ConversationId::from(id), title: Some(format!("t-{id}")), updated_at: None }
}

fn stored(role: &str, content: &str, id: &str) -> StoredMessage {
    StoredMessage { role: role.to_owned(), content: content.to_owned(), id: Some(id.to_owned()) }
}

// =============================================================
// send_message
// =============================================================

#[test]
fn send_message_posts_body_and_appends_reply() {
    let api = RecordingApi {
        chat_reply: Some(ChatReply { response: "¡Hola!".to_owned(), message_id: Some("m1".to_owned()) }),
        ..RecordingApi::default()
    };
    let chat = chat_with_id("171234");
    chat.borrow_mut().input = "Hola".to_owned();

    block_on(send_message(&api, &chat, "Hola"));

    assert_eq!(api.calls(), [Call::Chat(json!({ "message": "Hola", "role": "user", "conversation_id": "171234" }))]);
    let state = chat.borrow();
    assert!(!state.loading);
    assert!(state.input.is_empty());
    let history: Vec<_> = state.messages.iter().map(|m| (m.sender, m.text.as_str(), m.id.as_deref())).collect();
    assert_eq!(history, [(Sender::User, "Hola", None), (Sender::Ai, "¡Hola!", Some("m1"))]);
}

#[test]
fn blank_message_makes_no_request() {
    let api = RecordingApi::default();
    let chat = chat_with_id("171234");

    block_on(send_message(&api, &chat, "   "));

    assert!(api.calls().is_empty());
    assert!(chat.borrow().messages.is_empty());
    assert!(!chat.borrow().loading);
}

#[test]
fn failed_send_keeps_user_message_and_resets_loading() {
    let api = RecordingApi::default();
    let chat = chat_with_id("171234");

    block_on(send_message(&api, &chat, "Hola"));

    assert_eq!(api.calls().len(), 1);
    let state = chat.borrow();
    assert!(!state.loading);
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].sender, Sender::User);
}

#[test]
fn first_send_generates_a_conversation_id() {
    let api = RecordingApi {
        chat_reply: Some(ChatReply { response: "ok".to_owned(), message_id: None }),
        ..RecordingApi::default()
    };
    let chat = RefCell::new(ChatState::default());

    block_on(send_message(&api, &chat, "hola"));

    let id = chat.borrow().conversation_id.clone().unwrap();
    let calls = api.calls();
    let Call::Chat(body) = &calls[0] else {
        panic!("expected chat call");
    };
    assert_eq!(body["conversation_id"], json!(id.as_str()));
}

// =============================================================
// load_conversation
// =============================================================

#[test]
fn load_conversation_replaces_history_each_time() {
    let mut messages = HashMap::new();
    messages.insert("a".to_owned(), vec![stored("user", "a1", "1"), stored("ai", "a2", "2")]);
    messages.insert("b".to_owned(), vec![stored("user", "b1", "3")]);
    let api = RecordingApi { messages, ..RecordingApi::default() };
    let chat = chat_with_id("current");

    block_on(load_conversation(&api, &chat, ConversationId::from("a")));
    assert_eq!(chat.borrow().messages.len(), 2);
    assert_eq!(chat.borrow().conversation_id, Some(ConversationId::from("a")));

    block_on(load_conversation(&api, &chat, ConversationId::from("b")));
    let state = chat.borrow();
    assert_eq!(state.conversation_id, Some(ConversationId::from("b")));
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].text, "b1");
    assert!(!state.loading);
    assert!(!state.is_first_interaction);
    assert_eq!(api.calls(), [Call::Messages("a".to_owned()), Call::Messages("b".to_owned())]);
}

#[test]
fn failed_load_leaves_history_untouched() {
    let api = RecordingApi::default();
    let chat = chat_with_id("current");
    chat.borrow_mut().messages.push(ChatMessage::user("keep"));

    block_on(load_conversation(&api, &chat, ConversationId::from("missing")));

    let state = chat.borrow();
    assert_eq!(state.conversation_id, Some(ConversationId::from("current")));
    assert_eq!(state.messages.len(), 1);
    assert!(!state.loading);
}

// =============================================================
// clear_conversation
// =============================================================

#[test]
fn clear_conversation_adopts_returned_id() {
    let api = RecordingApi { cleared_id: Some("srv-7".to_owned()), ..RecordingApi::default() };
    let chat = chat_with_id("171234");
    chat.borrow_mut().messages.push(ChatMessage::user("hola"));

    block_on(clear_conversation(&api, &chat));

    assert_eq!(api.calls(), [Call::Clear("171234".to_owned())]);
    assert_eq!(chat.borrow().conversation_id, Some(ConversationId::from("srv-7")));
    assert!(chat.borrow().messages.is_empty());
}

#[test]
fn failed_clear_keeps_conversation() {
    let api = RecordingApi::default();
    let chat = chat_with_id("171234");
    chat.borrow_mut().messages.push(ChatMessage::user("hola"));

    block_on(clear_conversation(&api, &chat));

    assert_eq!(chat.borrow().conversation_id, Some(ConversationId::from("171234")));
    assert_eq!(chat.borrow().messages.len(), 1);
}

// =============================================================
// send_feedback
// =============================================================

#[test]
fn feedback_without_message_id_makes_no_request() {
    let api = RecordingApi { accept_writes: true, ..RecordingApi::default() };
    let chat = chat_with_id("c-1");
    chat.borrow_mut().messages.push(ChatMessage::ai("sin id", None));
    let key = chat.borrow().messages[0].key;

    block_on(send_feedback(&api, &chat, key, true));

    assert!(api.calls().is_empty());
    assert_eq!(chat.borrow().messages[0].feedback, None);
}

#[test]
fn feedback_is_sent_once_and_retained() {
    let api = RecordingApi { accept_writes: true, ..RecordingApi::default() };
    let chat = chat_with_id("c-1");
    chat.borrow_mut().messages.push(ChatMessage::ai("respuesta", Some("m1".to_owned())));
    let key = chat.borrow().messages[0].key;

    block_on(send_feedback(&api, &chat, key, true));
    block_on(send_feedback(&api, &chat, key, false));

    assert_eq!(
        api.calls(),
        [Call::Feedback(json!({ "conversation_id": "c-1", "message_id": "m1", "is_positive": true }))]
    );
    assert_eq!(chat.borrow().messages[0].feedback, Some(Feedback::Positive));
}

#[test]
fn rejected_feedback_leaves_message_unrated() {
    let api = RecordingApi::default();
    let chat = chat_with_id("c-1");
    chat.borrow_mut().messages.push(ChatMessage::ai("respuesta", Some("m1".to_owned())));
    let key = chat.borrow().messages[0].key;

    block_on(send_feedback(&api, &chat, key, false));

    assert_eq!(api.calls().len(), 1);
    assert_eq!(chat.borrow().messages[0].feedback, None);
}

// =============================================================
// update_system_message / export
// =============================================================

#[test]
fn system_message_panel_closes_only_on_success() {
    let chat = chat_with_id("c-1");
    chat.borrow_mut().system_message = "Sé breve".to_owned();
    let ui = RefCell::new(UiState { show_system_message: true, ..UiState::default() });

    let failing = RecordingApi::default();
    assert!(!block_on(update_system_message(&failing, &chat, &ui)));
    assert!(ui.borrow().show_system_message);

    let accepting = RecordingApi { accept_writes: true, ..RecordingApi::default() };
    assert!(block_on(update_system_message(&accepting, &chat, &ui)));
    assert!(!ui.borrow().show_system_message);
    assert_eq!(
        accepting.calls(),
        [Call::SystemMessage(json!({ "conversation_id": "c-1", "system_message": "Sé breve" }))]
    );
}

#[test]
fn export_uses_current_conversation_without_requests() {
    let api = RecordingApi::default();
    let chat = chat_with_id("171234");

    let href = export_conversation(&api, &chat);

    assert_eq!(href.as_deref(), Some("http://backend.test/export-conversation/171234"));
    assert!(api.calls().is_empty());
}

// =============================================================
// History
// =============================================================

#[test]
fn refresh_history_stores_listing() {
    let api = RecordingApi { conversations: Some(vec![summary("a"), summary("b")]), ..RecordingApi::default() };
    let history = RefCell::new(HistoryState::default());

    block_on(refresh_history(&api, &history));

    assert_eq!(api.calls(), [Call::List]);
    assert_eq!(history.borrow().items.len(), 2);
    assert!(!history.borrow().loading);
}

#[test]
fn refresh_history_failure_sets_error() {
    let api = RecordingApi::default();
    let history = RefCell::new(HistoryState::default());

    block_on(refresh_history(&api, &history));

    assert!(history.borrow().error.is_some());
    assert!(!history.borrow().loading);
}

#[test]
fn delete_conversation_removes_only_that_entry() {
    let api = RecordingApi { accept_writes: true, ..RecordingApi::default() };
    let history = RefCell::new(HistoryState { items: vec![summary("a"), summary("b"), summary("c")], ..HistoryState::default() });

    let result = block_on(delete_conversation(&api, &history, ConversationId::from("b")));

    assert_eq!(result, Ok(()));
    assert_eq!(api.calls(), [Call::Delete("b".to_owned())]);
    let ids: Vec<_> = history.borrow().items.iter().map(|i| i.conversation_id.to_string()).collect();
    assert_eq!(ids, ["a", "c"]);
}

#[test]
fn failed_delete_keeps_list() {
    let api = RecordingApi::default();
    let history = RefCell::new(HistoryState { items: vec![summary("a")], ..HistoryState::default() });

    let result = block_on(delete_conversation(&api, &history, ConversationId::from("a")));

    assert_eq!(result, Err(ApiError::Status(500)));
    assert_eq!(history.borrow().items.len(), 1);
}

#[test]
fn deleting_open_conversation_does_not_touch_chat() {
    let api = RecordingApi { accept_writes: true, ..RecordingApi::default() };
    let chat = chat_with_id("a");
    chat.borrow_mut().messages.push(ChatMessage::user("hola"));
    let history = RefCell::new(HistoryState { items: vec![summary("a")], ..HistoryState::default() });

    block_on(delete_conversation(&api, &history, ConversationId::from("a"))).unwrap();

    assert!(history.borrow().items.is_empty());
    assert_eq!(chat.borrow().conversation_id, Some(ConversationId::from("a")));
    assert_eq!(chat.borrow().messages.len(), 1);
}
