//! # orito-client
//!
//! Leptos + WASM frontend for the Orito chat assistant.
//!
//! This crate contains the chat page, the conversation history components,
//! application state, the REST wire types, and the HTTP client that talks to
//! the chat backend. The `orito-server` crate renders the shell with SSR and
//! the browser hydrates it through [`hydrate`].

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: install browser logging and hydrate the SSR markup.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
