//! Visitor sessions.
//!
//! Sessions live in process memory and hold the visitor's
//! [`SessionCart`](cart_drawer_core::SessionCart) under [`SESSION_CART_KEY`].
//! They are lost on restart.

use tower_sessions::{
    Expiry, MemoryStore, SessionManagerLayer,
    cookie::{SameSite, time::Duration},
};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "cart_session";

/// Session key of the visitor's cart.
pub const SESSION_CART_KEY: &str = "cart";

/// Idle time before a session is dropped (2 weeks).
const SESSION_EXPIRY_SECONDS: i64 = 14 * 24 * 60 * 60;

/// Build the session layer for `config`.
///
/// The cookie is `Secure` only when the storefront is served over HTTPS.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    let is_secure = config.base_url.scheme() == "https";

    SessionManagerLayer::new(MemoryStore::default())
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            SESSION_EXPIRY_SECONDS,
        )))
        .with_secure(is_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, header},
        routing::get,
    };
    use tower::ServiceExt;
    use tower_sessions::Session;

    use super::*;
    use crate::routes::test_support::state;

    async fn touch(session: Session) -> &'static str {
        session.insert("seen", true).await.unwrap();
        "ok"
    }

    async fn session_cookie(base_url: &str) -> String {
        let mut config = state().config().clone();
        config.base_url = base_url.parse().unwrap();

        let response = Router::new()
            .route("/", get(touch))
            .layer(create_session_layer(&config))
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_cookie_attributes_over_http() {
        let cookie = session_cookie("http://localhost:3000").await;
        assert!(cookie.starts_with("cart_session="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Path=/"));
        assert!(!cookie.contains("Secure"));
    }

    #[tokio::test]
    async fn test_cookie_is_secure_over_https() {
        let cookie = session_cookie("https://shop.example.com").await;
        assert!(cookie.contains("Secure"));
    }
}
