// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Azefine Worker

//! Sign-in surface and the client session accessor.

use axum::{
    extract::{Path, State},
    http::header::SET_COOKIE,
    response::AppendHeaders,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::provider::{DelegatedAssertion, DelegatedProvider, SignIn};
use crate::auth::session::{clear_session_cookie, session_cookie};
use crate::auth::{AuthError, AuthenticatedUser, OptionalAuth};
use crate::state::AppState;

/// Credentials sign-in request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Delegated sign-in request: the verified assertion handed over by the
/// upstream provider gateway.
#[derive(Debug, Deserialize, ToSchema)]
pub struct DelegatedLoginRequest {
    pub email: String,
    pub name: String,
}

/// Successful sign-in response.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// The signed-in identity
    pub user: AuthenticatedUser,
    /// Where the client should navigate next
    pub callback_url: String,
}

/// Current-session response.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    /// The current identity, or null when unauthenticated
    pub user: Option<AuthenticatedUser>,
}

/// Sign-out response.
#[derive(Debug, Serialize, ToSchema)]
pub struct LogoutResponse {
    pub status: String,
}

type CookieHeaders = AppendHeaders<[(axum::http::HeaderName, String); 1]>;

fn signed_in_response(
    state: &AppState,
    identity: &crate::auth::Identity,
) -> Result<(CookieHeaders, Json<LoginResponse>), AuthError> {
    let session = state.sessions.issue(identity)?;
    let cookie = session_cookie(&session.token, state.sessions.ttl_secs());

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(LoginResponse {
            user: AuthenticatedUser::from_claims(session.claims),
            callback_url: state.callback_url.clone(),
        }),
    ))
}

/// Sign in with email and password.
///
/// Every failure returns the same generic 401 body; the precise cause is
/// only logged server-side.
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    tag = "Auth",
    responses(
        (status = 200, description = "Signed in, session cookie set", body = LoginResponse),
        (status = 401, description = "Sign-in failed"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<(CookieHeaders, Json<LoginResponse>), AuthError> {
    let attempt = SignIn::Credentials {
        email: request.email,
        password: request.password,
    };

    let identity = state.provider.authenticate(&attempt).map_err(|err| {
        tracing::warn!(error_code = err.error_code(), "credentials sign-in failed");
        err
    })?;

    tracing::info!(user_id = %identity.id, role = %identity.role, "user signed in");
    signed_in_response(&state, &identity)
}

/// Sign in through a delegated provider.
///
/// The request body is the `{email, name}` assertion already verified by the
/// upstream provider. Unknown or unconfigured providers fail with the same
/// generic message as bad credentials.
#[utoipa::path(
    post,
    path = "/v1/auth/login/{provider}",
    request_body = DelegatedLoginRequest,
    params(("provider" = String, Path, description = "Provider slug (google, github)")),
    tag = "Auth",
    responses(
        (status = 200, description = "Signed in, session cookie set", body = LoginResponse),
        (status = 401, description = "Sign-in failed or provider unavailable"),
    )
)]
pub async fn login_delegated(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    Json(request): Json<DelegatedLoginRequest>,
) -> Result<(CookieHeaders, Json<LoginResponse>), AuthError> {
    let provider = DelegatedProvider::from_slug(&provider).ok_or_else(|| {
        tracing::warn!(provider = %provider, "sign-in with unknown provider");
        AuthError::ProviderUnavailable
    })?;

    let attempt = SignIn::Delegated {
        provider,
        assertion: DelegatedAssertion {
            email: request.email,
            name: request.name,
        },
    };

    let identity = state.provider.authenticate(&attempt).map_err(|err| {
        tracing::warn!(
            provider = %provider,
            error_code = err.error_code(),
            "delegated sign-in failed"
        );
        err
    })?;

    tracing::info!(user_id = %identity.id, "delegated sign-in");
    signed_in_response(&state, &identity)
}

/// Sign out: clear the session cookie.
///
/// The token itself is not revoked server-side; invalidating the client-held
/// cookie is the whole operation.
#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    tag = "Auth",
    responses((status = 200, description = "Session cookie cleared", body = LogoutResponse))
)]
pub async fn logout() -> (CookieHeaders, Json<LogoutResponse>) {
    (
        AppendHeaders([(SET_COOKIE, clear_session_cookie())]),
        Json(LogoutResponse {
            status: "signed_out".to_string(),
        }),
    )
}

/// The current session, for UI gating.
///
/// Always 200: `user` is null when the request carries no valid session.
#[utoipa::path(
    get,
    path = "/v1/session",
    tag = "Auth",
    responses((status = 200, description = "Current identity or null", body = SessionResponse))
)]
pub async fn session(OptionalAuth(user): OptionalAuth) -> Json<SessionResponse> {
    Json(SessionResponse { user })
}
