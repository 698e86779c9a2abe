// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Azefine Worker

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::{middleware::route_guard, AuthenticatedUser, Identity, Role},
    models::{BlogPost, ContactInfo, Product, ProductSpec, ProductStatus, Service, SiteContent},
    state::AppState,
};

pub mod admin;
pub mod auth;
pub mod blog;
pub mod catalog;
pub mod dashboard;
pub mod health;
pub mod site;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/login/{provider}", post(auth::login_delegated))
        .route("/auth/logout", post(auth::logout))
        .route("/session", get(auth::session))
        .route(
            "/catalog/products",
            get(catalog::list_products),
        )
        .route("/catalog/products/{id}", get(catalog::get_product))
        .route("/catalog/categories", get(catalog::product_categories))
        .route("/catalog/services", get(catalog::list_services))
        .route("/catalog/services/{id}", get(catalog::get_service))
        .route("/blog/posts", get(blog::list_posts))
        .route("/blog/posts/{id}", get(blog::get_post))
        .route("/blog/categories", get(blog::post_categories))
        .route("/site/content", get(site::get_content))
        .route("/dashboard/summary", get(dashboard::summary))
        .route("/admin/overview", get(admin::overview))
        .route("/admin/users", get(admin::list_users))
        .with_state(state.clone());

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state.clone());

    Router::new()
        .nest("/v1", v1_routes)
        .merge(health_routes)
        // The route guard wraps everything, fallback included: path policy
        // is evaluated before any handler, and before the 404 for page paths
        // the frontend owns.
        .layer(from_fn_with_state(state, route_guard))
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login,
        auth::login_delegated,
        auth::logout,
        auth::session,
        catalog::list_products,
        catalog::get_product,
        catalog::product_categories,
        catalog::list_services,
        catalog::get_service,
        blog::list_posts,
        blog::get_post,
        blog::post_categories,
        site::get_content,
        dashboard::summary,
        admin::overview,
        admin::list_users,
        health::health,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            AuthenticatedUser,
            Identity,
            Role,
            auth::LoginRequest,
            auth::DelegatedLoginRequest,
            auth::LoginResponse,
            auth::SessionResponse,
            auth::LogoutResponse,
            Product,
            ProductSpec,
            ProductStatus,
            Service,
            BlogPost,
            SiteContent,
            ContactInfo,
            dashboard::DashboardSummary,
            dashboard::DashboardStats,
            admin::AdminOverview,
            admin::CatalogCounts,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Auth", description = "Sign-in, sign-out and the current session"),
        (name = "Catalog", description = "Storefront products and services"),
        (name = "Blog", description = "Blog posts"),
        (name = "Site", description = "Site content"),
        (name = "Dashboard", description = "Member dashboard"),
        (name = "Admin", description = "Admin area"),
        (name = "Health", description = "Probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::session::SESSION_COOKIE;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn json_request(method: &str, path: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(path: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header("Cookie", cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Sign in through the router and hand back the session cookie pair.
    async fn sign_in(app: &Router, email: &str, password: &str) -> String {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/v1/auth/login",
                serde_json::json!({"email": email, "password": password}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let set_cookie = response.headers()["set-cookie"].to_str().unwrap();
        set_cookie
            .split(';')
            .next()
            .expect("cookie pair")
            .to_string()
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(AppState::default());
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn admin_login_reaches_the_admin_area() {
        let state = AppState::default();
        let app = router(state.clone());

        // POST credentials -> success, role = admin
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/v1/auth/login",
                serde_json::json!({"email": "admin@azefine.com", "password": "admin123"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie_header = response.headers()["set-cookie"].to_str().unwrap().to_string();
        let body = body_json(response).await;
        assert_eq!(body["user"]["role"], "admin");
        assert_eq!(body["callback_url"], "/");

        // The resulting token authorizes the admin page prefix
        let token = cookie_header
            .split(';')
            .next()
            .unwrap()
            .strip_prefix(&format!("{SESSION_COOKIE}="))
            .unwrap()
            .to_string();
        let claims = state.sessions.decode(&token).unwrap();
        let user = AuthenticatedUser::from_claims(claims);
        assert_eq!(
            state.policy.authorize("/admin", Some(&user)),
            crate::auth::Decision::Allow
        );

        // ...and the admin API subtree
        let cookie = cookie_header.split(';').next().unwrap().to_string();
        let response = app
            .oneshot(get_request("/v1/admin/overview", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["name"], "Super Admin");
    }

    #[tokio::test]
    async fn wrong_password_issues_no_session() {
        let app = router(AppState::default());
        let response = app
            .oneshot(json_request(
                "POST",
                "/v1/auth/login",
                serde_json::json!({"email": "user@example.com", "password": "wrongpass"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get("set-cookie").is_none());
        let body = body_json(response).await;
        assert_eq!(body["error_code"], "sign_in_failed");
    }

    #[tokio::test]
    async fn member_session_is_kept_out_of_the_admin_subtree() {
        let app = router(AppState::default());
        let cookie = sign_in(&app, "user@example.com", "user123").await;

        // Member dashboard works
        let response = app
            .clone()
            .oneshot(get_request("/v1/dashboard/summary", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Admin subtree redirects to sign-in
        let response = app
            .clone()
            .oneshot(get_request("/v1/admin/overview", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()["location"], "/login");

        // Page prefix carries the same rule
        let response = app
            .oneshot(get_request("/admin", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn unauthenticated_protected_paths_redirect() {
        let app = router(AppState::default());
        for path in ["/admin", "/user-dashboard", "/v1/dashboard/summary"] {
            let response = app.clone().oneshot(get_request(path, None)).await.unwrap();
            assert_eq!(response.status(), StatusCode::SEE_OTHER, "path {path}");
            assert_eq!(response.headers()["location"], "/login");
        }
    }

    #[tokio::test]
    async fn session_endpoint_reflects_sign_in_state() {
        let app = router(AppState::default());

        let response = app
            .clone()
            .oneshot(get_request("/v1/session", None))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert!(body["user"].is_null());

        let cookie = sign_in(&app, "user@example.com", "user123").await;
        let response = app
            .oneshot(get_request("/v1/session", Some(&cookie)))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["user"]["email"], "user@example.com");
        assert_eq!(body["user"]["role"], "user");
    }

    #[tokio::test]
    async fn logout_clears_the_cookie() {
        let app = router(AppState::default());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/auth/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let set_cookie = response.headers()["set-cookie"].to_str().unwrap();
        assert!(set_cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn catalog_is_public() {
        let app = router(AppState::default());
        let response = app
            .clone()
            .oneshot(get_request("/v1/catalog/products?sort=price-asc", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body[0]["id"], "p2");

        let response = app
            .oneshot(get_request("/v1/blog/posts?category=Business", None))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }
}
