// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Azefine Worker

//! Identity provider adapter.
//!
//! Unifies the available sign-in mechanisms behind one `authenticate` call:
//!
//! - **Credentials**: email + password checked against the credential
//!   directory.
//! - **Delegated** (`google`, `github`): trusts an upstream identity
//!   assertion - an already-verified `{email, name}` pair - and produces a
//!   regular-member identity. A delegated mechanism is only registered when
//!   its client id/secret pair was present at process start; absence silently
//!   disables it.
//!
//! One synchronous attempt per call. Failed attempts are not recorded;
//! there is no lockout or throttling.

use std::sync::Arc;

use super::directory::{normalize_email, CredentialDirectory, Identity};
use super::error::AuthError;
use super::roles::Role;

/// A delegated third-party identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegatedProvider {
    Google,
    Github,
}

impl DelegatedProvider {
    /// Parse the URL slug used by the sign-in surface.
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "google" => Some(DelegatedProvider::Google),
            "github" => Some(DelegatedProvider::Github),
            _ => None,
        }
    }

    /// The URL slug for this provider.
    pub fn slug(&self) -> &'static str {
        match self {
            DelegatedProvider::Google => "google",
            DelegatedProvider::Github => "github",
        }
    }
}

impl std::fmt::Display for DelegatedProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.slug())
    }
}

/// A verified `{email, name}` pair vouched for by an upstream provider.
///
/// Verification happened upstream; by the time an assertion reaches the
/// adapter it is trusted as-is.
#[derive(Debug, Clone)]
pub struct DelegatedAssertion {
    pub email: String,
    pub name: String,
}

/// One sign-in attempt, for one mechanism.
#[derive(Debug, Clone)]
pub enum SignIn {
    /// Local email + password check
    Credentials { email: String, password: String },
    /// Delegated provider assertion
    Delegated {
        provider: DelegatedProvider,
        assertion: DelegatedAssertion,
    },
}

/// The identity provider adapter: directory plus enabled delegated providers.
#[derive(Clone)]
pub struct IdentityProviderAdapter {
    directory: Arc<CredentialDirectory>,
    delegated: Vec<DelegatedProvider>,
}

impl IdentityProviderAdapter {
    /// Adapter with only the local credentials mechanism.
    pub fn new(directory: Arc<CredentialDirectory>) -> Self {
        Self {
            directory,
            delegated: Vec::new(),
        }
    }

    /// Enable a delegated provider.
    pub fn with_delegated(mut self, provider: DelegatedProvider) -> Self {
        if !self.delegated.contains(&provider) {
            self.delegated.push(provider);
        }
        self
    }

    /// Whether a delegated provider is enabled.
    pub fn delegated_enabled(&self, provider: DelegatedProvider) -> bool {
        self.delegated.contains(&provider)
    }

    /// The enabled delegated providers, in registration order.
    pub fn enabled_delegated(&self) -> &[DelegatedProvider] {
        &self.delegated
    }

    /// Authenticate one sign-in attempt.
    pub fn authenticate(&self, attempt: &SignIn) -> Result<Identity, AuthError> {
        match attempt {
            SignIn::Credentials { email, password } => {
                self.authenticate_credentials(email, password)
            }
            SignIn::Delegated {
                provider,
                assertion,
            } => self.authenticate_delegated(*provider, assertion),
        }
    }

    fn authenticate_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Identity, AuthError> {
        let record = self
            .directory
            .find_by_email(email)
            .ok_or(AuthError::InvalidCredentials)?;

        if !record.verify_password(password) {
            return Err(AuthError::InvalidCredentials);
        }
        // A wrong password on an unverified account must still read as
        // invalid credentials, so the verified check comes second
        if !record.email_verified {
            return Err(AuthError::UnverifiedIdentity);
        }

        Ok(record.to_identity())
    }

    fn authenticate_delegated(
        &self,
        provider: DelegatedProvider,
        assertion: &DelegatedAssertion,
    ) -> Result<Identity, AuthError> {
        if !self.delegated_enabled(provider) {
            return Err(AuthError::ProviderUnavailable);
        }

        let email = normalize_email(&assertion.email);
        // Delegated identities are always regular members: role and phone
        // come from the directory only on the credentials path.
        Ok(Identity {
            id: format!("{}:{}", provider.slug(), email),
            name: assertion.name.clone(),
            email,
            role: Role::User,
            phone: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::directory::SeedRecord;

    fn directory() -> Arc<CredentialDirectory> {
        Arc::new(
            CredentialDirectory::seed(vec![
                SeedRecord {
                    id: "admin-001",
                    name: "Super Admin",
                    email: "admin@azefine.com",
                    password: "admin123",
                    role: Role::Admin,
                    email_verified: true,
                    phone: Some("08123456789"),
                },
                SeedRecord {
                    id: "pending-001",
                    name: "Pending",
                    email: "pending@example.com",
                    password: "pending123",
                    role: Role::User,
                    email_verified: false,
                    phone: None,
                },
            ])
            .expect("seed directory"),
        )
    }

    fn credentials(email: &str, password: &str) -> SignIn {
        SignIn::Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn valid_credentials_return_identity_unchanged() {
        let adapter = IdentityProviderAdapter::new(directory());
        let identity = adapter
            .authenticate(&credentials("admin@azefine.com", "admin123"))
            .expect("sign-in succeeds");
        assert_eq!(identity.id, "admin-001");
        assert_eq!(identity.role, Role::Admin);
        assert_eq!(identity.phone.as_deref(), Some("08123456789"));
    }

    #[test]
    fn email_lookup_is_case_insensitive() {
        let adapter = IdentityProviderAdapter::new(directory());
        assert!(adapter
            .authenticate(&credentials("Admin@Azefine.COM", "admin123"))
            .is_ok());
    }

    #[test]
    fn wrong_password_is_invalid_credentials() {
        let adapter = IdentityProviderAdapter::new(directory());
        assert!(matches!(
            adapter.authenticate(&credentials("admin@azefine.com", "wrongpass")),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn unknown_email_is_invalid_credentials() {
        let adapter = IdentityProviderAdapter::new(directory());
        assert!(matches!(
            adapter.authenticate(&credentials("nobody@azefine.com", "admin123")),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn unverified_account_fails_even_with_correct_password() {
        let adapter = IdentityProviderAdapter::new(directory());
        assert!(matches!(
            adapter.authenticate(&credentials("pending@example.com", "pending123")),
            Err(AuthError::UnverifiedIdentity)
        ));
        // Wrong password on the unverified account still reads as invalid
        // credentials, not as an unverified hint.
        assert!(matches!(
            adapter.authenticate(&credentials("pending@example.com", "nope")),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn delegated_disabled_by_default() {
        let adapter = IdentityProviderAdapter::new(directory());
        let attempt = SignIn::Delegated {
            provider: DelegatedProvider::Google,
            assertion: DelegatedAssertion {
                email: "visitor@gmail.com".to_string(),
                name: "Visitor".to_string(),
            },
        };
        assert!(matches!(
            adapter.authenticate(&attempt),
            Err(AuthError::ProviderUnavailable)
        ));
    }

    #[test]
    fn delegated_identity_is_regular_member() {
        let adapter =
            IdentityProviderAdapter::new(directory()).with_delegated(DelegatedProvider::Google);
        let attempt = SignIn::Delegated {
            provider: DelegatedProvider::Google,
            assertion: DelegatedAssertion {
                email: "Admin@Azefine.com".to_string(),
                name: "Someone Else".to_string(),
            },
        };
        let identity = adapter.authenticate(&attempt).expect("delegated sign-in");
        // Even for an email present in the directory, the delegated path
        // never inherits role or phone.
        assert_eq!(identity.role, Role::User);
        assert_eq!(identity.phone, None);
        assert_eq!(identity.id, "google:admin@azefine.com");
    }

    #[test]
    fn provider_slugs_roundtrip() {
        assert_eq!(
            DelegatedProvider::from_slug("google"),
            Some(DelegatedProvider::Google)
        );
        assert_eq!(
            DelegatedProvider::from_slug("github"),
            Some(DelegatedProvider::Github)
        );
        assert_eq!(DelegatedProvider::from_slug("facebook"), None);
        assert_eq!(DelegatedProvider::Github.slug(), "github");
    }
}
