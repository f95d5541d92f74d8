//! Server configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid HOST {0:?}: expected an IP address")]
    InvalidHost(String),
    #[error("invalid PORT {0:?}: expected a number between 0 and 65535")]
    InvalidPort(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: DEFAULT_HOST, port: DEFAULT_PORT }
    }
}

impl ServerConfig {
    /// Build the listener config from the environment.
    ///
    /// Optional:
    /// - `HOST`: bind address, default `0.0.0.0`
    /// - `PORT`: default `3000`
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = match std::env::var("HOST") {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidHost(raw))?,
            Err(_) => DEFAULT_HOST,
        };
        let port = match std::env::var("PORT") {
            Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => DEFAULT_PORT,
        };
        Ok(Self { host, port })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
