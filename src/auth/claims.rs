// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Azefine Worker

//! Session token claims and the authenticated user representation.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::roles::Role;

/// Claims carried by a session token.
///
/// These are fixed at issuance: role and phone are copied from the identity
/// record when the session is minted and only refreshed on re-authentication.
/// The role travels as a plain string so tokens minted by older builds stay
/// readable; parsing falls back to the default role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject - the identity's stable id
    pub sub: String,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// Role at issuance ("admin" or "user")
    #[serde(default)]
    pub role: String,

    /// Contact phone at issuance (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

/// Authenticated user information extracted from a session token.
///
/// This is the primary type used throughout the application to represent
/// the authenticated user making a request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    /// Canonical user ID (token `sub` claim)
    pub user_id: String,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,

    /// User's role
    pub role: Role,

    /// Contact phone (if the identity record had one)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// Original issuer (used for validation, not serialized)
    #[serde(skip)]
    pub issuer: String,

    /// Token expiration (Unix timestamp, used for validation, not serialized)
    #[serde(skip)]
    pub expires_at: i64,
}

impl AuthenticatedUser {
    /// Create from session claims.
    pub fn from_claims(claims: SessionClaims) -> Self {
        // Unknown or missing role claims fall back to the least privilege
        let role = Role::from_str(&claims.role).unwrap_or_default();

        Self {
            user_id: claims.sub,
            name: claims.name,
            email: claims.email,
            role,
            phone: claims.phone,
            issuer: claims.iss,
            expires_at: claims.exp,
        }
    }

    /// Check if the user has the required role.
    pub fn has_role(&self, required: Role) -> bool {
        self.role.has_privilege(required)
    }

    /// Check if this user is an admin.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_claims() -> SessionClaims {
        SessionClaims {
            sub: "admin-001".to_string(),
            name: "Super Admin".to_string(),
            email: "admin@azefine.com".to_string(),
            role: "admin".to_string(),
            phone: Some("08123456789".to_string()),
            iat: 1700000000,
            exp: 1700003600,
            iss: "azefine-server".to_string(),
        }
    }

    #[test]
    fn from_claims_extracts_identity_fields() {
        let user = AuthenticatedUser::from_claims(sample_claims());
        assert_eq!(user.user_id, "admin-001");
        assert_eq!(user.email, "admin@azefine.com");
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.phone.as_deref(), Some("08123456789"));
    }

    #[test]
    fn from_claims_defaults_unknown_role_to_user() {
        let mut claims = sample_claims();
        claims.role = "superuser".to_string();
        let user = AuthenticatedUser::from_claims(claims);
        assert_eq!(user.role, Role::User);

        let mut claims = sample_claims();
        claims.role = String::new();
        let user = AuthenticatedUser::from_claims(claims);
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn has_role_checks_privilege() {
        let user = AuthenticatedUser::from_claims(sample_claims());
        assert!(user.is_admin());
        assert!(user.has_role(Role::Admin));
        assert!(user.has_role(Role::User));
    }

    #[test]
    fn serialized_user_omits_validation_fields() {
        let user = AuthenticatedUser::from_claims(sample_claims());
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("issuer").is_none());
        assert!(json.get("expires_at").is_none());
        assert_eq!(json["role"], "admin");
    }
}
