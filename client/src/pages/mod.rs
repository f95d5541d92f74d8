//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! The chat page owns conversation state and wires it to the components;
//! `chat_actions` holds the async request/response cycles it spawns.

pub mod chat;
pub mod chat_actions;
