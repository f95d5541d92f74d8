//! Saved-conversation list shown by the history panel.
//!
//! DESIGN
//! ======
//! The list is owned by the panel and refetched every time it opens; the only
//! local edit is dropping an entry after a confirmed delete.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use crate::net::api::ApiError;
use crate::net::types::{ConversationId, ConversationSummary};

/// Inline error shown when the list cannot be fetched.
pub const LOAD_ERROR_MESSAGE: &str = "No se pudieron cargar las conversaciones. Intenta de nuevo más tarde.";
/// Blocking prompt shown before deleting a conversation.
pub const DELETE_CONFIRM_MESSAGE: &str = "¿Estás seguro de que quieres eliminar esta conversación?";
/// Blocking alert shown when a delete fails.
pub const DELETE_ERROR_MESSAGE: &str = "Error al eliminar la conversación";

/// History panel state. Starts out loading so a freshly opened panel never
/// flashes the empty-list text before its first fetch.
#[derive(Clone, Debug)]
pub struct HistoryState {
    pub items: Vec<ConversationSummary>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for HistoryState {
    fn default() -> Self {
        Self { items: Vec::new(), loading: true, error: None }
    }
}

impl HistoryState {
    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    /// Store the fetched list verbatim, or record the inline error.
    pub fn finish_fetch(&mut self, result: Result<Vec<ConversationSummary>, ApiError>) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(e) => {
                log::error!("fetching conversations failed: {e}");
                self.error = Some(LOAD_ERROR_MESSAGE.to_owned());
            }
        }
    }

    /// Drop every entry with the given id. Returns how many were removed.
    pub fn remove(&mut self, id: &ConversationId) -> usize {
        let before = self.items.len();
        self.items.retain(|item| &item.conversation_id != id);
        before - self.items.len()
    }
}
