//! Add-to-cart requests.
//!
//! One POST per click, `product_id=<id>` as a url-encoded form, with the
//! `csrftoken` cookie echoed in `X-CSRFToken`. No retry, no timeout, no
//! cancellation: the request resolves to an [`AddedProduct`] or an
//! [`AddToCartError`] and the drawer applies whichever it gets.

use std::future::Future;
use std::sync::Arc;

use cart_drawer_core::AddToCartReply;
use reqwest::cookie::{CookieStore, Jar};
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use super::notice::Notice;
use super::trigger::AddToCartTrigger;
use crate::csrf::{CSRF_COOKIE, CSRF_HEADER, cookie_value};

/// Errors that can occur when adding to the cart.
#[derive(Debug, Error)]
pub enum AddToCartError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status and no readable reply.
    #[error("endpoint returned status {status}")]
    Status { status: u16 },

    /// The body is not JSON of the expected shape.
    #[error("reply is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// The server answered `success: false`.
    #[error("server rejected the add: {}", .reason.as_deref().unwrap_or("no reason given"))]
    Rejected { reason: Option<String> },

    /// `success: true` but a required field is missing or unusable.
    #[error("malformed reply: {0}")]
    Malformed(&'static str),
}

impl AddToCartError {
    /// Notice the shopper sees for this failure.
    #[must_use]
    pub const fn notice(&self) -> Notice {
        match self {
            Self::Rejected { .. } => Notice::AddRejected,
            _ => Notice::AddFailed,
        }
    }
}

/// Product details returned by a successful add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddedProduct {
    pub name: String,
    pub price: Decimal,
    pub image: String,
}

impl TryFrom<AddToCartReply> for AddedProduct {
    type Error = AddToCartError;

    fn try_from(reply: AddToCartReply) -> Result<Self, Self::Error> {
        if !reply.success {
            return Err(AddToCartError::Rejected {
                reason: reply.error,
            });
        }

        let name = reply.name.ok_or(AddToCartError::Malformed("missing name"))?;
        let price = reply
            .price
            .as_ref()
            .ok_or(AddToCartError::Malformed("missing price"))?
            .to_decimal()
            .ok_or(AddToCartError::Malformed("price is not a number"))?;
        if price < Decimal::ZERO {
            return Err(AddToCartError::Malformed("negative price"));
        }
        let image = reply.img.ok_or(AddToCartError::Malformed("missing img"))?;

        Ok(Self { name, price, image })
    }
}

/// Something that can add a product to the server-side cart.
pub trait AddToCartApi {
    /// Ask the server to add `product_id`.
    fn add_to_cart(
        &self,
        product_id: &str,
    ) -> impl Future<Output = Result<AddedProduct, AddToCartError>> + Send;
}

/// A finished add-to-cart request, ready to be applied to a drawer.
#[derive(Debug)]
pub struct CompletedAdd {
    pub trigger: AddToCartTrigger,
    pub result: Result<AddedProduct, AddToCartError>,
}

/// Send the request for `trigger` without touching any drawer.
///
/// Several of these can be in flight at once; each is applied with
/// [`super::CartDrawer::complete_add`] in whatever order they resolve.
pub async fn send_add<C: AddToCartApi>(
    api: &C,
    trigger: AddToCartTrigger,
) -> CompletedAdd {
    let result = api.add_to_cart(&trigger.product_id).await;
    CompletedAdd { trigger, result }
}

// =============================================================================
// AddToCartClient
// =============================================================================

/// HTTP client for the storefront's add-to-cart endpoint.
///
/// Shares a cookie jar with the page so the CSRF cookie handed out on page
/// load is both sent back and echoed in the header.
#[derive(Clone)]
pub struct AddToCartClient {
    inner: Arc<AddToCartClientInner>,
}

struct AddToCartClientInner {
    client: reqwest::Client,
    endpoint: Url,
    cookies: Arc<Jar>,
}

impl AddToCartClient {
    /// Create a client with its own, empty cookie jar.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(endpoint: Url) -> Result<Self, AddToCartError> {
        Self::with_cookie_jar(endpoint, Arc::new(Jar::default()))
    }

    /// Create a client over an existing cookie jar.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn with_cookie_jar(endpoint: Url, cookies: Arc<Jar>) -> Result<Self, AddToCartError> {
        let client = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&cookies))
            .build()?;

        Ok(Self {
            inner: Arc::new(AddToCartClientInner {
                client,
                endpoint,
                cookies,
            }),
        })
    }

    /// The underlying HTTP client, sharing this client's cookies.
    #[must_use]
    pub fn http(&self) -> &reqwest::Client {
        &self.inner.client
    }

    /// The `csrftoken` cookie visible to the endpoint, or empty if unset.
    #[must_use]
    pub fn csrf_token(&self) -> SecretString {
        let token = self
            .inner
            .cookies
            .cookies(&self.inner.endpoint)
            .and_then(|header| {
                header
                    .to_str()
                    .ok()
                    .and_then(|h| cookie_value(h, CSRF_COOKIE))
                    .map(str::to_owned)
            })
            .unwrap_or_default();
        SecretString::from(token)
    }

    /// POST the product id and decode the JSON reply.
    #[instrument(skip(self), fields(endpoint = %self.inner.endpoint))]
    async fn post(&self, product_id: &str) -> Result<AddToCartReply, AddToCartError> {
        let token = self.csrf_token();

        let response = self
            .inner
            .client
            .post(self.inner.endpoint.clone())
            .header(CSRF_HEADER, token.expose_secret())
            .form(&[("product_id", product_id)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<AddToCartReply>(&body) {
            Ok(reply) => Ok(reply),
            Err(_) if !status.is_success() => {
                tracing::warn!(
                    status = %status,
                    body = %body.chars().take(200).collect::<String>(),
                    "add-to-cart endpoint returned non-success status"
                );
                Err(AddToCartError::Status {
                    status: status.as_u16(),
                })
            }
            Err(e) => Err(AddToCartError::Decode(e)),
        }
    }
}

impl AddToCartApi for AddToCartClient {
    async fn add_to_cart(&self, product_id: &str) -> Result<AddedProduct, AddToCartError> {
        let reply = self.post(product_id).await?;
        AddedProduct::try_from(reply)
    }
}
