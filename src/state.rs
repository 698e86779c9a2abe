// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Azefine Worker

use std::sync::Arc;

use crate::auth::directory::CredentialDirectory;
use crate::auth::policy::RoutePolicy;
use crate::auth::provider::IdentityProviderAdapter;
use crate::auth::session::SessionIssuer;
use crate::config::TOKEN_ISSUER;
use crate::store::SiteCatalog;

/// Shared application state.
///
/// Everything in here is read-only after startup, so cloning the state per
/// request is cheap and no locking is needed.
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<CredentialDirectory>,
    pub provider: IdentityProviderAdapter,
    pub sessions: SessionIssuer,
    pub policy: Arc<RoutePolicy>,
    pub catalog: Arc<SiteCatalog>,
    /// Where the sign-in surface sends the client after success
    pub callback_url: String,
}

impl AppState {
    pub fn new(
        directory: CredentialDirectory,
        catalog: SiteCatalog,
        sessions: SessionIssuer,
    ) -> Self {
        let directory = Arc::new(directory);
        Self {
            provider: IdentityProviderAdapter::new(directory.clone()),
            directory,
            sessions,
            policy: Arc::new(RoutePolicy::site_default()),
            catalog: Arc::new(catalog),
            callback_url: "/".to_string(),
        }
    }

    /// Replace the identity provider adapter (e.g. with delegated providers
    /// enabled).
    pub fn with_provider(mut self, provider: IdentityProviderAdapter) -> Self {
        self.provider = provider;
        self
    }

    /// Replace the route policy.
    pub fn with_policy(mut self, policy: RoutePolicy) -> Self {
        self.policy = Arc::new(policy);
        self
    }

    /// Set the post-sign-in callback path.
    pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
        self.callback_url = callback_url.into();
        self
    }
}

impl Default for AppState {
    /// Demo state: seeded directory and catalog, ephemeral session secret.
    fn default() -> Self {
        let secret = uuid::Uuid::new_v4();
        Self::new(
            CredentialDirectory::demo().expect("seed demo directory"),
            SiteCatalog::demo(),
            SessionIssuer::new(secret.as_bytes(), TOKEN_ISSUER),
        )
    }
}
