// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Azefine Worker

//! Session issuance and validation.
//!
//! Sessions are stateless signed tokens (HS256). The server keeps no session
//! table: the signed claims are the session. Role and phone are fixed at
//! issuance and only change on re-authentication; sign-out is purely
//! client-side invalidation (the cookie is cleared, nothing is revoked
//! server-side).
//!
//! Tokens travel as an HttpOnly cookie and are also accepted from an
//! `Authorization: Bearer` header.

use axum::http::{header, HeaderMap};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use super::claims::SessionClaims;
use super::directory::Identity;
use super::error::AuthError;
#[cfg(test)]
use super::roles::Role;

/// Cookie under which the session token is stored.
pub const SESSION_COOKIE: &str = "azefine_session";

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Default session lifetime: 7 days.
///
/// Role changes in the directory only take effect on re-login, so the
/// lifetime bounds how long a stale role can persist.
pub const DEFAULT_SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// A freshly minted session: the signed serialization plus its claims.
#[derive(Debug, Clone)]
pub struct SessionToken {
    /// Signed compact serialization, as stored in the cookie
    pub token: String,
    /// The claims that were signed
    pub claims: SessionClaims,
}

/// Mints and validates session tokens.
#[derive(Clone)]
pub struct SessionIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl_secs: i64,
}

impl SessionIssuer {
    /// Create an issuer from a shared secret.
    pub fn new(secret: &[u8], issuer: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            ttl_secs: DEFAULT_SESSION_TTL_SECS,
        }
    }

    /// Override the session lifetime.
    pub fn with_ttl_secs(mut self, ttl_secs: i64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    /// Session lifetime in seconds.
    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Issue a session token for an authenticated identity.
    ///
    /// Pure apart from reading the clock: role and phone are copied from the
    /// identity onto the claims and stay fixed for the session's lifetime.
    pub fn issue(&self, identity: &Identity) -> Result<SessionToken, AuthError> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: identity.id.clone(),
            name: identity.name.clone(),
            email: identity.email.clone(),
            role: identity.role.to_string(),
            phone: identity.phone.clone(),
            iat: now,
            exp: now + self.ttl_secs,
            iss: self.issuer.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InternalError(format!("Failed to sign session: {e}")))?;

        Ok(SessionToken { token, claims })
    }

    /// Refresh pass-through.
    ///
    /// Claims are not re-validated against the credential directory
    /// mid-session; a role change only takes effect on re-login.
    pub fn refresh(&self, claims: SessionClaims) -> SessionClaims {
        claims
    }

    /// Decode and verify a session token.
    pub fn decode(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        validation.set_issuer(&[&self.issuer]);
        validation.validate_aud = false;

        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                jsonwebtoken::errors::ErrorKind::InvalidIssuer => AuthError::InvalidIssuer,
                _ => AuthError::MalformedToken,
            })?;

        Ok(token_data.claims)
    }
}

/// Build the `Set-Cookie` value carrying a session token.
pub fn session_cookie(token: &str, max_age_secs: i64) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}"
    )
}

/// Build the `Set-Cookie` value that clears the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Extract the session token from request headers.
///
/// The cookie is the primary carrier; an `Authorization: Bearer` header is
/// accepted as a fallback for non-browser clients.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    if let Some(cookie_header) = headers.get(header::COOKIE) {
        if let Ok(cookies) = cookie_header.to_str() {
            for pair in cookies.split(';') {
                if let Some(value) = pair.trim().strip_prefix(SESSION_COOKIE) {
                    if let Some(token) = value.strip_prefix('=') {
                        if !token.is_empty() {
                            return Some(token.to_string());
                        }
                    }
                }
            }
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
}

/// Hand out a test/demo identity quickly.
#[cfg(test)]
pub(crate) fn demo_identity(role: Role) -> Identity {
    Identity {
        id: match role {
            Role::Admin => "admin-001".to_string(),
            Role::User => "user-001".to_string(),
        },
        name: "Test Identity".to_string(),
        email: "test@azefine.com".to_string(),
        role,
        phone: Some("08123456789".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn issuer() -> SessionIssuer {
        SessionIssuer::new(b"test-secret", "azefine-server")
    }

    #[test]
    fn issue_copies_role_and_phone() {
        let session = issuer().issue(&demo_identity(Role::Admin)).unwrap();
        assert_eq!(session.claims.role, "admin");
        assert_eq!(session.claims.phone.as_deref(), Some("08123456789"));
        assert_eq!(session.claims.sub, "admin-001");
        assert!(session.claims.exp > session.claims.iat);
    }

    #[test]
    fn decode_roundtrips_issued_token() {
        let iss = issuer();
        let session = iss.issue(&demo_identity(Role::User)).unwrap();
        let claims = iss.decode(&session.token).unwrap();
        assert_eq!(claims.sub, "user-001");
        assert_eq!(claims.role, "user");
        assert_eq!(claims.iss, "azefine-server");
    }

    #[test]
    fn decode_rejects_foreign_signature() {
        let session = issuer().issue(&demo_identity(Role::User)).unwrap();
        let other = SessionIssuer::new(b"other-secret", "azefine-server");
        assert!(matches!(
            other.decode(&session.token),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn decode_rejects_wrong_issuer() {
        let foreign = SessionIssuer::new(b"test-secret", "someone-else");
        let session = foreign.issue(&demo_identity(Role::User)).unwrap();
        assert!(matches!(
            issuer().decode(&session.token),
            Err(AuthError::InvalidIssuer)
        ));
    }

    #[test]
    fn decode_rejects_expired_token() {
        let iss = issuer().with_ttl_secs(-120); // already past leeway
        let session = iss.issue(&demo_identity(Role::User)).unwrap();
        assert!(matches!(
            iss.decode(&session.token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(
            issuer().decode("not-a-token"),
            Err(AuthError::MalformedToken)
        ));
    }

    #[test]
    fn refresh_is_a_pass_through() {
        let iss = issuer();
        let session = iss.issue(&demo_identity(Role::Admin)).unwrap();
        let refreshed = iss.refresh(session.claims.clone());
        assert_eq!(refreshed.exp, session.claims.exp);
        assert_eq!(refreshed.role, session.claims.role);
    }

    #[test]
    fn token_extracted_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; azefine_session=abc.def.ghi; other=1"),
        );
        assert_eq!(token_from_headers(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn token_extracted_from_bearer_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(token_from_headers(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn empty_cookie_is_not_a_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("azefine_session="),
        );
        assert_eq!(token_from_headers(&headers), None);
    }

    #[test]
    fn cookie_values_carry_expected_attributes() {
        let set = session_cookie("tok", 3600);
        assert!(set.starts_with("azefine_session=tok;"));
        assert!(set.contains("HttpOnly"));
        assert!(set.contains("Max-Age=3600"));

        let clear = clear_session_cookie();
        assert!(clear.contains("Max-Age=0"));
    }
}
