// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Azefine Worker

//! Route-guard middleware.
//!
//! Applied to the whole router, this is the authoritative authorization
//! layer: before any handler runs, the request path is evaluated against the
//! route policy with whatever session the request carries. Denied requests
//! are redirected to the sign-in page - denial is normal control flow, not
//! an error.
//!
//! On allowed requests the resolved user (if any) is stored in the request
//! extensions, so downstream extractors don't decode the token twice.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use super::claims::AuthenticatedUser;
use super::policy::Decision;
use super::session::token_from_headers;
use crate::state::AppState;

/// Evaluate the route policy for every request.
///
/// A request with an invalid or expired token is treated as unauthenticated:
/// on public paths it proceeds without a session, on protected paths it is
/// redirected to sign in again.
pub async fn route_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let user = token_from_headers(request.headers())
        .and_then(|token| match state.sessions.decode(&token) {
            Ok(claims) => Some(AuthenticatedUser::from_claims(claims)),
            Err(err) => {
                tracing::debug!(error = %err, "ignoring invalid session token");
                None
            }
        });

    match state.policy.authorize(request.uri().path(), user.as_ref()) {
        Decision::Allow => {
            if let Some(user) = user {
                request.extensions_mut().insert(user);
            }
            next.run(request).await
        }
        Decision::Redirect(target) => {
            tracing::debug!(
                path = %request.uri().path(),
                authenticated = user.is_some(),
                "route policy denied request"
            );
            Redirect::to(&target).into_response()
        }
    }
}
