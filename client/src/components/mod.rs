//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the chat chrome and read/write the chat and UI state
//! provided by the chat page through Leptos context. Anything that changes
//! the active conversation is requested through callbacks so the page stays
//! its single owner.

pub mod composer;
pub mod conversation_toolbar;
pub mod history_panel;
pub mod history_trigger;
pub mod message_list;
pub mod sidebar;
pub mod system_message_panel;
