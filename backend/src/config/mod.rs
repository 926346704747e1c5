//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the server bind address and the session lifetime, read from environment
//! variables with sensible defaults for local development.

use std::env;
use std::net::SocketAddr;

use chrono::Duration;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_SESSION_TTL_MINUTES: i64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to (`TOOLDECK_BIND_ADDR`).
    pub bind_addr: SocketAddr,
    /// Lifetime of an issued session (`TOOLDECK_SESSION_TTL_MINUTES`).
    pub session_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env::var("TOOLDECK_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::Invalid {
                name: "TOOLDECK_BIND_ADDR",
                reason: err.to_string(),
            })?;

        let ttl_minutes = match env::var("TOOLDECK_SESSION_TTL_MINUTES") {
            Ok(raw) => raw.parse::<i64>().map_err(|err| ConfigError::Invalid {
                name: "TOOLDECK_SESSION_TTL_MINUTES",
                reason: err.to_string(),
            })?,
            Err(_) => DEFAULT_SESSION_TTL_MINUTES,
        };
        if ttl_minutes <= 0 {
            return Err(ConfigError::Invalid {
                name: "TOOLDECK_SESSION_TTL_MINUTES",
                reason: "must be positive".to_string(),
            });
        }

        Ok(Config {
            bind_addr,
            session_ttl: Duration::minutes(ttl_minutes),
        })
    }
}
