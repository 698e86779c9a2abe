// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Azefine Worker

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `SESSION_SECRET` | HS256 secret for session tokens | ephemeral (generated per process) |
//! | `SESSION_TTL_SECS` | Session lifetime in seconds | `604800` (7 days) |
//! | `LOGIN_CALLBACK_URL` | Redirect target after sign-in | `/` |
//! | `GOOGLE_CLIENT_ID` / `GOOGLE_CLIENT_SECRET` | Enables the Google sign-in mechanism | unset (disabled) |
//! | `GITHUB_ID` / `GITHUB_SECRET` | Enables the GitHub sign-in mechanism | unset (disabled) |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//!
//! A missing provider credential pair is not an error - the mechanism is
//! silently disabled.

use std::env;

use thiserror::Error;

use crate::auth::session::DEFAULT_SESSION_TTL_SECS;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const SESSION_SECRET_ENV: &str = "SESSION_SECRET";
pub const SESSION_TTL_ENV: &str = "SESSION_TTL_SECS";
pub const LOGIN_CALLBACK_ENV: &str = "LOGIN_CALLBACK_URL";
pub const GOOGLE_CLIENT_ID_ENV: &str = "GOOGLE_CLIENT_ID";
pub const GOOGLE_CLIENT_SECRET_ENV: &str = "GOOGLE_CLIENT_SECRET";
pub const GITHUB_ID_ENV: &str = "GITHUB_ID";
pub const GITHUB_SECRET_ENV: &str = "GITHUB_SECRET";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Issuer claim stamped into session tokens.
pub const TOKEN_ISSUER: &str = "azefine-server";

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} is not a number")]
    InvalidNumber { var: &'static str, value: String },
}

/// Client id/secret pair for a delegated sign-in provider.
#[derive(Debug, Clone)]
pub struct ProviderCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Server configuration, resolved from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `None` means generate an ephemeral per-process secret
    pub session_secret: Option<String>,
    pub session_ttl_secs: i64,
    pub callback_url: String,
    pub google: Option<ProviderCredentials>,
    pub github: Option<ProviderCredentials>,
}

fn provider_pair(id_var: &'static str, secret_var: &'static str) -> Option<ProviderCredentials> {
    match (env::var(id_var), env::var(secret_var)) {
        (Ok(client_id), Ok(client_secret)) => Some(ProviderCredentials {
            client_id,
            client_secret,
        }),
        _ => None,
    }
}

fn numeric_var<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { var, value }),
        Err(_) => Ok(default),
    }
}

impl ServerConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var(HOST_ENV).unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: numeric_var(PORT_ENV, 8080)?,
            session_secret: env::var(SESSION_SECRET_ENV).ok(),
            session_ttl_secs: numeric_var(SESSION_TTL_ENV, DEFAULT_SESSION_TTL_SECS)?,
            callback_url: env::var(LOGIN_CALLBACK_ENV).unwrap_or_else(|_| "/".to_string()),
            google: provider_pair(GOOGLE_CLIENT_ID_ENV, GOOGLE_CLIENT_SECRET_ENV),
            github: provider_pair(GITHUB_ID_ENV, GITHUB_SECRET_ENV),
        })
    }
}
