// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Azefine Worker

//! Blog endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::models::BlogPost;
use crate::state::AppState;

/// Blog listing query parameters.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PostQuery {
    /// Category filter; omitted or `All` matches everything
    pub category: Option<String>,
}

/// List blog posts, newest seed order first. The first post of the returned
/// set is the featured post.
#[utoipa::path(
    get,
    path = "/v1/blog/posts",
    params(PostQuery),
    tag = "Blog",
    responses((status = 200, body = [BlogPost]))
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PostQuery>,
) -> Json<Vec<BlogPost>> {
    Json(state.catalog.posts(query.category.as_deref()))
}

/// Distinct post categories, `All` first.
#[utoipa::path(
    get,
    path = "/v1/blog/categories",
    tag = "Blog",
    responses((status = 200, body = [String]))
)]
pub async fn post_categories(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.post_categories())
}

/// A single blog post.
#[utoipa::path(
    get,
    path = "/v1/blog/posts/{id}",
    params(("id" = String, Path, description = "Post id")),
    tag = "Blog",
    responses(
        (status = 200, body = BlogPost),
        (status = 404, description = "Unknown post"),
    )
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BlogPost>, ApiError> {
    state
        .catalog
        .post_by_id(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Post not found"))
}
