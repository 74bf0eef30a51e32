//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                 - Product grid with the cart drawer
//! GET  /products/{id}    - Product detail
//! POST /add_to_cart/     - Add-to-cart endpoint (JSON reply)
//! GET  /cart/            - Session cart page
//! POST /cart/            - Remove a product or update quantities
//! GET  /health           - Health check
//! GET  /static/*         - Static assets
//! ```

pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::ADD_TO_CART_PATH;
use crate::middleware::{
    create_session_layer, csrf_middleware, request_id_middleware, security_headers_middleware,
};
use crate::state::AppState;

/// Directory served under `/static`.
pub const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/{id}", get(products::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Add-to-cart endpoint; any other method gets a JSON error
        .route(
            ADD_TO_CART_PATH,
            post(cart::add_to_cart).fallback(cart::invalid_method),
        )
        // Session cart page
        .route("/cart/", get(cart::show).post(cart::update))
}

/// Build the full application: routes, middleware and state.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .with_state(state)
        .layer(middleware::from_fn(csrf_middleware))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(session_layer)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use tower::ServiceExt;

    use super::test_support::{body_text, state};
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let response = app(state())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, "ok");
    }

    #[tokio::test]
    async fn test_page_sets_csrf_cookie_and_headers() {
        let response = app(state())
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(cookie.starts_with("csrftoken="));
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(response.headers()["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn test_product_images_are_served() {
        let catalog = crate::catalog::Catalog::sample();
        for product in catalog.products() {
            let response = app(state())
                .oneshot(Request::get(&product.image).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", product.image);
            assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
        }
    }

    #[tokio::test]
    async fn test_post_without_csrf_is_forbidden() {
        let response = app(state())
            .oneshot(
                Request::post(ADD_TO_CART_PATH)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("product_id=1"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_post_with_matching_csrf_reaches_handler() {
        let response = app(state())
            .oneshot(
                Request::post(ADD_TO_CART_PATH)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .header(header::COOKIE, "csrftoken=abc")
                    .header("x-csrftoken", "abc")
                    .body(Body::from("product_id=1"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("\"success\":true"));
    }
}
