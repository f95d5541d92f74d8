//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server only hosts the UI: it renders the Leptos shell with SSR and
//! serves the compiled WASM bundle under `/pkg`. The chat backend is a
//! separate service the browser calls directly.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Routes that do not depend on the Leptos build output.
fn base_routes() -> Router {
    Router::new().route("/healthz", get(healthz))
}

/// Leptos SSR frontend plus static assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing
/// cargo-leptos environment and no `[workspace.metadata.leptos]` section).
pub fn app() -> Result<Router, String> {
    let conf = get_configuration(None).map_err(|e| format!("leptos configuration: {e}"))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(orito_client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || orito_client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(base_routes()
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
