//! Async drivers behind the chat screen and history panel buttons.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each driver runs one begin/request/finish cycle: it mutates state through a
//! [`StateCell`], awaits the backend through a [`ChatApi`], and folds the
//! result back in. The chat page spawns these through `util::task::spawn`;
//! tests drive them with a recording mock and `RefCell` state.

#[cfg(test)]
#[path = "chat_actions_test.rs"]
mod chat_actions_test;

use crate::net::api::{ApiError, ChatApi};
use crate::net::types::ConversationId;
use crate::state::StateCell;
use crate::state::chat::{ChatState, MessageKey};
use crate::state::history::HistoryState;
use crate::state::ui::UiState;
use crate::util::browser;

/// Send the user's message and append the assistant reply.
pub async fn send_message<A, S>(api: &A, chat: &S, text: &str)
where
    A: ChatApi + ?Sized,
    S: StateCell<ChatState>,
{
    let Some(request) = chat.apply(|s| s.begin_send(text)).flatten() else {
        return;
    };
    let result = api.send_chat(&request).await;
    chat.apply(|s| s.finish_send(&request, result));
}

/// Replace the chat history with a saved conversation.
pub async fn load_conversation<A, S>(api: &A, chat: &S, id: ConversationId)
where
    A: ChatApi + ?Sized,
    S: StateCell<ChatState>,
{
    let Some(seq) = chat.apply(ChatState::begin_load) else {
        return;
    };
    let result = api.conversation_messages(&id).await;
    chat.apply(|s| s.finish_load(seq, id, result));
}

/// Ask the backend to reset the conversation and adopt the id it returns.
pub async fn clear_conversation<A, S>(api: &A, chat: &S)
where
    A: ChatApi + ?Sized,
    S: StateCell<ChatState>,
{
    let Some(id) = chat.apply(ChatState::ensure_conversation_id) else {
        return;
    };
    let result = api.clear_conversation(&id).await;
    chat.apply(|s| s.finish_clear(result));
}

/// Rate one assistant reply.
pub async fn send_feedback<A, S>(api: &A, chat: &S, key: MessageKey, is_positive: bool)
where
    A: ChatApi + ?Sized,
    S: StateCell<ChatState>,
{
    let Some(request) = chat.apply(|s| s.feedback_request(key, is_positive)).flatten() else {
        return;
    };
    let result = api.send_feedback(&request).await;
    chat.apply(|s| s.finish_feedback(key, is_positive, result));
}

/// Push the edited system message; the edit panel closes only on success.
pub async fn update_system_message<A, S, U>(api: &A, chat: &S, ui: &U) -> bool
where
    A: ChatApi + ?Sized,
    S: StateCell<ChatState>,
    U: StateCell<UiState>,
{
    let Some(request) = chat.apply(ChatState::system_message_request) else {
        return false;
    };
    match api.update_system_message(&request).await {
        Ok(()) => {
            ui.apply(UiState::close_system_message);
            true
        }
        Err(e) => {
            log::error!("updating system message failed: {e}");
            false
        }
    }
}

/// Start a browser download of the current transcript. Returns the URL used.
pub fn export_conversation<A, S>(api: &A, chat: &S) -> Option<String>
where
    A: ChatApi + ?Sized,
    S: StateCell<ChatState>,
{
    let id = chat.apply(ChatState::ensure_conversation_id)?;
    match api.export_url(&id) {
        Ok(href) => {
            browser::trigger_download(&href, &format!("conversation_{id}"));
            Some(href)
        }
        Err(e) => {
            log::error!("building export link failed: {e}");
            None
        }
    }
}

/// Refetch the saved-conversation list.
pub async fn refresh_history<A, H>(api: &A, history: &H)
where
    A: ChatApi + ?Sized,
    H: StateCell<HistoryState>,
{
    history.apply(HistoryState::begin_fetch);
    let result = api.list_conversations().await;
    history.apply(|h| h.finish_fetch(result));
}

/// Delete a saved conversation and drop it from the list.
///
/// # Errors
///
/// Returns the backend failure so the caller can alert the user; the list is
/// left untouched in that case.
pub async fn delete_conversation<A, H>(api: &A, history: &H, id: ConversationId) -> Result<(), ApiError>
where
    A: ChatApi + ?Sized,
    H: StateCell<HistoryState>,
{
    if let Err(e) = api.delete_conversation(&id).await {
        log::error!("deleting conversation {id} failed: {e}");
        return Err(e);
    }
    history.apply(|h| h.remove(&id));
    Ok(())
}
