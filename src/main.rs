// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Azefine Worker

use std::{env, net::SocketAddr};

use tracing_subscriber::EnvFilter;

use azefine_server::api::router;
use azefine_server::auth::directory::CredentialDirectory;
use azefine_server::auth::provider::{DelegatedProvider, IdentityProviderAdapter};
use azefine_server::auth::session::SessionIssuer;
use azefine_server::config::{ServerConfig, LOG_FORMAT_ENV, TOKEN_ISSUER};
use azefine_server::state::AppState;
use azefine_server::store::SiteCatalog;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    if env::var(LOG_FORMAT_ENV).as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install ctrl-c handler");
    tracing::info!("shutdown signal received");
}

#[tokio::main]
async fn main() {
    init_tracing();

    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Sessions are stateless, so the secret is the only session state. An
    // ephemeral secret means every session dies with the process.
    let secret = config.session_secret.clone().unwrap_or_else(|| {
        tracing::warn!("SESSION_SECRET not set; sessions will not survive a restart");
        uuid::Uuid::new_v4().simple().to_string()
    });

    let sessions = SessionIssuer::new(secret.as_bytes(), TOKEN_ISSUER)
        .with_ttl_secs(config.session_ttl_secs);
    let directory = CredentialDirectory::demo().expect("Failed to seed credential directory");

    let state = AppState::new(directory, SiteCatalog::demo(), sessions)
        .with_callback_url(config.callback_url.clone());

    // Delegated mechanisms are registered only when their credential pair is
    // present; absence is not an error.
    let mut provider = IdentityProviderAdapter::new(state.directory.clone());
    if config.google.is_some() {
        provider = provider.with_delegated(DelegatedProvider::Google);
        tracing::info!("google sign-in enabled");
    }
    if config.github.is_some() {
        provider = provider.with_delegated(DelegatedProvider::Github);
        tracing::info!("github sign-in enabled");
    }
    let state = state.with_provider(provider);

    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!("azefine-server listening on http://{addr} (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}
