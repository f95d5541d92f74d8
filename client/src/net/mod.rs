//! Networking modules for the chat backend REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP calls and `types` defines the request/response
//! schema shared by every endpoint.

pub mod api;
pub mod types;
