//! Integration tests for the cart drawer.
//!
//! Each test starts the storefront in-process on an ephemeral port and drives
//! a [`CartDrawer`](cart_drawer_storefront::drawer::CartDrawer) against it
//! through the real HTTP client.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cart-drawer-integration-tests
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use cart_drawer_core::CurrencyCode;
use cart_drawer_storefront::catalog::Catalog;
use cart_drawer_storefront::config::StorefrontConfig;
use cart_drawer_storefront::drawer::AddToCartClient;
use cart_drawer_storefront::routes;
use cart_drawer_storefront::state::AppState;
use reqwest::cookie::Jar;
use url::Url;

/// A running storefront.
pub struct TestContext {
    pub addr: SocketAddr,
    pub base_url: Url,
    pub config: StorefrontConfig,
}

impl TestContext {
    /// Start the storefront with the built-in sample catalog.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let base_url =
            Url::parse(&format!("http://{addr}")).expect("Failed to build base URL");

        let config = StorefrontConfig {
            host: addr.ip(),
            port: addr.port(),
            base_url: base_url.clone(),
            currency: CurrencyCode::INR,
            catalog_path: None,
            sentry_dsn: None,
            sentry_environment: None,
        };

        let app = routes::app(AppState::new(config.clone(), Catalog::sample()));
        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server error");
        });

        Self {
            addr,
            base_url,
            config,
        }
    }

    /// Absolute URL for `path`.
    ///
    /// # Panics
    ///
    /// Panics if `path` does not join onto the base URL.
    #[must_use]
    pub fn url(&self, path: &str) -> Url {
        self.base_url.join(path).expect("Failed to join URL")
    }

    /// An add-to-cart client with a fresh cookie jar.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn client(&self) -> AddToCartClient {
        let endpoint = self
            .config
            .add_to_cart_url()
            .expect("Failed to build endpoint URL");
        AddToCartClient::with_cookie_jar(endpoint, Arc::new(Jar::default()))
            .expect("Failed to create HTTP client")
    }

    /// An add-to-cart client that has loaded the home page, and so holds the
    /// CSRF cookie.
    ///
    /// # Panics
    ///
    /// Panics if the page cannot be fetched.
    pub async fn client_after_page_load(&self) -> AddToCartClient {
        let client = self.client();
        let response = client
            .http()
            .get(self.url("/"))
            .send()
            .await
            .expect("Failed to load home page");
        assert!(response.status().is_success());
        client
    }
}
