// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Azefine Worker

//! Storefront catalog endpoints: products and services.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::models::{Product, Service};
use crate::state::AppState;
use crate::store::{ProductFilter, ProductSort};

/// Storefront product query parameters.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ProductQuery {
    /// Category filter; omitted or `All` matches everything
    pub category: Option<String>,
    /// Case-insensitive search over name and description
    pub q: Option<String>,
    /// Inclusive lower bound on the effective price
    pub min_price: Option<i64>,
    /// Inclusive upper bound on the effective price
    pub max_price: Option<i64>,
    /// Sort order: `default`, `price-asc` or `price-desc`
    pub sort: Option<String>,
}

impl ProductQuery {
    fn into_filter(self) -> Result<ProductFilter, ApiError> {
        let sort = match self.sort.as_deref() {
            None => ProductSort::Default,
            Some(value) => ProductSort::from_param(value).ok_or_else(|| {
                ApiError::bad_request("sort must be one of: default, price-asc, price-desc")
            })?,
        };

        Ok(ProductFilter {
            category: self.category,
            search: self.q,
            min_price: self.min_price,
            max_price: self.max_price,
            sort,
        })
    }
}

/// List published products matching the storefront filters.
#[utoipa::path(
    get,
    path = "/v1/catalog/products",
    params(ProductQuery),
    tag = "Catalog",
    responses(
        (status = 200, description = "Matching published products", body = [Product]),
        (status = 400, description = "Invalid sort parameter"),
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let filter = query.into_filter()?;
    Ok(Json(state.catalog.query_products(&filter)))
}

/// Distinct product categories, `All` first.
#[utoipa::path(
    get,
    path = "/v1/catalog/categories",
    tag = "Catalog",
    responses((status = 200, body = [String]))
)]
pub async fn product_categories(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.product_categories())
}

/// A single published product.
#[utoipa::path(
    get,
    path = "/v1/catalog/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    tag = "Catalog",
    responses(
        (status = 200, body = Product),
        (status = 404, description = "Unknown or unpublished product"),
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    state
        .catalog
        .product_by_id(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product not found"))
}

/// List the service offerings.
#[utoipa::path(
    get,
    path = "/v1/catalog/services",
    tag = "Catalog",
    responses((status = 200, body = [Service]))
)]
pub async fn list_services(State(state): State<AppState>) -> Json<Vec<Service>> {
    Json(state.catalog.services().to_vec())
}

/// A single service offering.
#[utoipa::path(
    get,
    path = "/v1/catalog/services/{id}",
    params(("id" = String, Path, description = "Service id")),
    tag = "Catalog",
    responses(
        (status = 200, body = Service),
        (status = 404, description = "Unknown service"),
    )
)]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Service>, ApiError> {
    state
        .catalog
        .service_by_id(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Service not found"))
}
