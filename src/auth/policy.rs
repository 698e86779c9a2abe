// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Azefine Worker

//! Path-based route authorization.
//!
//! A policy table maps path prefixes to the capability required to pass:
//! nothing, any authenticated session, or a specific role. Evaluation picks
//! the most specific matching prefix; paths matching no entry are public.
//! Denial is not an error - the requester is redirected to the sign-in page.

use super::claims::AuthenticatedUser;
use super::roles::Role;

/// Capability required by a policy entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No session required
    Public,
    /// Any authenticated session
    Authenticated,
    /// A session with at least the given role
    Role(Role),
}

/// Outcome of a policy evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Request may proceed
    Allow,
    /// Request is sent to the given path instead
    Redirect(String),
}

#[derive(Debug, Clone)]
struct PolicyEntry {
    prefix: String,
    access: Access,
}

/// The route policy table.
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    /// Entries ordered longest-prefix first
    entries: Vec<PolicyEntry>,
    sign_in_path: String,
}

impl RoutePolicy {
    /// Empty policy: everything public, denials redirect to `sign_in_path`.
    pub fn new(sign_in_path: impl Into<String>) -> Self {
        Self {
            entries: Vec::new(),
            sign_in_path: sign_in_path.into(),
        }
    }

    /// Add a prefix rule. Entries are kept sorted longest-prefix first so
    /// the most specific rule wins.
    pub fn require(mut self, prefix: impl Into<String>, access: Access) -> Self {
        self.entries.push(PolicyEntry {
            prefix: prefix.into(),
            access,
        });
        self.entries
            .sort_by(|a, b| b.prefix.len().cmp(&a.prefix.len()));
        self
    }

    /// The policy shipped with the site: the admin area requires the admin
    /// role, the member dashboard any session, everything else is public.
    /// The JSON twins of the protected pages carry the same rules.
    pub fn site_default() -> Self {
        Self::new("/login")
            .require("/admin", Access::Role(Role::Admin))
            .require("/user-dashboard", Access::Authenticated)
            .require("/v1/admin", Access::Role(Role::Admin))
            .require("/v1/dashboard", Access::Authenticated)
    }

    /// Where denied requests are redirected.
    pub fn sign_in_path(&self) -> &str {
        &self.sign_in_path
    }

    /// Evaluate the policy for a request path and its session, if any.
    pub fn authorize(&self, path: &str, user: Option<&AuthenticatedUser>) -> Decision {
        let access = self
            .entries
            .iter()
            .find(|entry| path.starts_with(&entry.prefix))
            .map(|entry| entry.access)
            .unwrap_or(Access::Public);

        let allowed = match access {
            Access::Public => true,
            Access::Authenticated => user.is_some(),
            Access::Role(required) => user.map(|u| u.has_role(required)).unwrap_or(false),
        };

        if allowed {
            Decision::Allow
        } else {
            Decision::Redirect(self.sign_in_path.clone())
        }
    }
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self::site_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::claims::SessionClaims;

    fn user_with_role(role: &str) -> AuthenticatedUser {
        AuthenticatedUser::from_claims(SessionClaims {
            sub: "someone".to_string(),
            name: "Someone".to_string(),
            email: "someone@example.com".to_string(),
            role: role.to_string(),
            phone: None,
            iat: 0,
            exp: 0,
            iss: "azefine-server".to_string(),
        })
    }

    #[test]
    fn admin_prefix_allows_only_admin_role() {
        let policy = RoutePolicy::site_default();
        let admin = user_with_role("admin");
        let member = user_with_role("user");

        assert_eq!(policy.authorize("/admin", Some(&admin)), Decision::Allow);
        assert_eq!(
            policy.authorize("/admin", Some(&member)),
            Decision::Redirect("/login".to_string())
        );
        assert_eq!(
            policy.authorize("/admin", None),
            Decision::Redirect("/login".to_string())
        );
    }

    #[test]
    fn dashboard_prefix_allows_any_session() {
        let policy = RoutePolicy::site_default();
        let member = user_with_role("user");

        assert_eq!(
            policy.authorize("/user-dashboard", Some(&member)),
            Decision::Allow
        );
        assert_eq!(
            policy.authorize("/user-dashboard", None),
            Decision::Redirect("/login".to_string())
        );
    }

    #[test]
    fn unmatched_paths_are_public() {
        let policy = RoutePolicy::site_default();
        let admin = user_with_role("admin");

        assert_eq!(policy.authorize("/", None), Decision::Allow);
        assert_eq!(policy.authorize("/", Some(&admin)), Decision::Allow);
        assert_eq!(policy.authorize("/store", None), Decision::Allow);
        assert_eq!(policy.authorize("/v1/catalog/products", None), Decision::Allow);
    }

    #[test]
    fn rules_cover_the_whole_subtree() {
        let policy = RoutePolicy::site_default();
        assert_eq!(
            policy.authorize("/admin/settings/seo", None),
            Decision::Redirect("/login".to_string())
        );
        assert_eq!(
            policy.authorize("/v1/dashboard/summary", None),
            Decision::Redirect("/login".to_string())
        );
    }

    #[test]
    fn most_specific_prefix_wins() {
        let policy = RoutePolicy::new("/login")
            .require("/admin", Access::Role(Role::Admin))
            .require("/admin/help", Access::Public);

        assert_eq!(policy.authorize("/admin/help", None), Decision::Allow);
        assert_eq!(
            policy.authorize("/admin/users", None),
            Decision::Redirect("/login".to_string())
        );
    }

    #[test]
    fn api_twins_carry_page_rules() {
        let policy = RoutePolicy::site_default();
        let member = user_with_role("user");

        assert_eq!(
            policy.authorize("/v1/admin/overview", Some(&member)),
            Decision::Redirect("/login".to_string())
        );
        assert_eq!(
            policy.authorize("/v1/dashboard/summary", Some(&member)),
            Decision::Allow
        );
    }
}
