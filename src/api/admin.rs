// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Azefine Worker

//! Admin endpoints.
//!
//! Everything here requires the admin role; the route policy already guards
//! the `/v1/admin` prefix and the `AdminOnly` extractor enforces the same
//! rule per handler.

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::{AdminOnly, Identity};
use crate::models::ProductStatus;
use crate::state::AppState;

/// Catalog tallies for the admin overview.
#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogCounts {
    pub products: usize,
    pub published_products: usize,
    pub out_of_stock_products: usize,
    pub services: usize,
    pub posts: usize,
}

/// Admin overview: directory and catalog state at a glance.
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminOverview {
    /// Display name for the greeting
    pub name: String,
    /// Seeded directory accounts
    pub total_users: usize,
    /// Open orders figure shown on the dashboard (demo value)
    pub active_orders: u32,
    pub system_status: String,
    pub catalog: CatalogCounts,
}

/// Overview for the admin dashboard.
#[utoipa::path(
    get,
    path = "/v1/admin/overview",
    tag = "Admin",
    responses(
        (status = 200, description = "Admin overview", body = AdminOverview),
        (status = 401, description = "No session"),
        (status = 403, description = "Not an admin"),
    )
)]
pub async fn overview(
    AdminOnly(user): AdminOnly,
    State(state): State<AppState>,
) -> Json<AdminOverview> {
    let products = state.catalog.products();

    Json(AdminOverview {
        name: user.name,
        total_users: state.directory.len(),
        active_orders: 36,
        system_status: "Operational".to_string(),
        catalog: CatalogCounts {
            products: products.len(),
            published_products: products
                .iter()
                .filter(|p| p.status == ProductStatus::Published)
                .count(),
            out_of_stock_products: products.iter().filter(|p| p.stock == 0).count(),
            services: state.catalog.services().len(),
            posts: state.catalog.posts(None).len(),
        },
    })
}

/// List the directory accounts, credential material stripped.
#[utoipa::path(
    get,
    path = "/v1/admin/users",
    tag = "Admin",
    responses(
        (status = 200, description = "Directory accounts", body = [Identity]),
        (status = 401, description = "No session"),
        (status = 403, description = "Not an admin"),
    )
)]
pub async fn list_users(
    AdminOnly(_user): AdminOnly,
    State(state): State<AppState>,
) -> Json<Vec<Identity>> {
    Json(state.directory.identities().collect())
}
