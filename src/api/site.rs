// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Azefine Worker

//! Site content endpoint.

use axum::{extract::State, Json};

use crate::models::SiteContent;
use crate::state::AppState;

/// The site's marketing content (hero, about, contact, CTA).
#[utoipa::path(
    get,
    path = "/v1/site/content",
    tag = "Site",
    responses((status = 200, body = SiteContent))
)]
pub async fn get_content(State(state): State<AppState>) -> Json<SiteContent> {
    Json(state.catalog.content().clone())
}
