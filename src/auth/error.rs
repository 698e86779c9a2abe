// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Azefine Worker

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Generic sign-in failure message shown to the user.
///
/// All sign-in failures share this single message so the response does not
/// reveal whether the email exists, the password was wrong, or the account
/// is unverified.
pub const SIGN_IN_FAILED: &str =
    "Login failed. Check your email/password or verification status.";

/// Authentication error type.
///
/// The credential variants (`InvalidCredentials`, `UnverifiedIdentity`,
/// `ProviderUnavailable`) are produced by the identity provider adapter;
/// the token variants are produced when decoding a session token.
#[derive(Debug)]
pub enum AuthError {
    /// Email unknown or password mismatch
    InvalidCredentials,
    /// Account matched but its email is not verified
    UnverifiedIdentity,
    /// Requested delegated provider is not configured
    ProviderUnavailable,
    /// No session token present on the request
    MissingSessionToken,
    /// Session token is malformed
    MalformedToken,
    /// Session token signature is invalid
    InvalidSignature,
    /// Session token has expired
    TokenExpired,
    /// Session token issuer is invalid
    InvalidIssuer,
    /// Insufficient permissions
    InsufficientPermissions,
    /// Internal error
    InternalError(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::UnverifiedIdentity => "unverified_identity",
            AuthError::ProviderUnavailable => "provider_unavailable",
            AuthError::MissingSessionToken => "missing_session_token",
            AuthError::MalformedToken => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidIssuer => "invalid_issuer",
            AuthError::InsufficientPermissions => "insufficient_permissions",
            AuthError::InternalError(_) => "internal_error",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials
            | AuthError::UnverifiedIdentity
            | AuthError::ProviderUnavailable
            | AuthError::MissingSessionToken
            | AuthError::MalformedToken
            | AuthError::InvalidSignature
            | AuthError::TokenExpired
            | AuthError::InvalidIssuer => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
            AuthError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether this error came from a sign-in attempt (as opposed to token
    /// validation). Sign-in failures are collapsed into one generic message
    /// at the HTTP surface.
    pub fn is_sign_in_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials
                | AuthError::UnverifiedIdentity
                | AuthError::ProviderUnavailable
        )
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::InvalidCredentials => write!(f, "Email unknown or password mismatch"),
            AuthError::UnverifiedIdentity => write!(f, "Account email is not verified"),
            AuthError::ProviderUnavailable => {
                write!(f, "Requested sign-in provider is not configured")
            }
            AuthError::MissingSessionToken => write!(f, "No session token on request"),
            AuthError::MalformedToken => write!(f, "Session token is malformed"),
            AuthError::InvalidSignature => write!(f, "Session token signature is invalid"),
            AuthError::TokenExpired => write!(f, "Session token has expired"),
            AuthError::InvalidIssuer => write!(f, "Session token issuer is invalid"),
            AuthError::InsufficientPermissions => {
                write!(f, "Insufficient permissions for this operation")
            }
            AuthError::InternalError(msg) => write!(f, "Internal authentication error: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Sign-in failures share one body so callers cannot probe for
        // account existence or verification state.
        let body = if self.is_sign_in_failure() {
            Json(AuthErrorBody {
                error: SIGN_IN_FAILED.to_string(),
                error_code: "sign_in_failed".to_string(),
            })
        } else {
            Json(AuthErrorBody {
                error: self.to_string(),
                error_code: self.error_code().to_string(),
            })
        };
        (status, body).into_response()
    }
}
