#![recursion_limit = "256"]

mod config;
mod routes;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid server configuration");
            return ExitCode::FAILURE;
        }
    };

    let app = match routes::app() {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "router setup failed");
            return ExitCode::FAILURE;
        }
    };

    let addr = config.addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(%addr, "orito listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
