//! Per-request correlation id.
//!
//! An incoming `x-request-id` is kept when it is a usable header value;
//! otherwise a UUID v4 is minted. The id rides along in request extensions
//! as [`RequestId`], tags Sentry events, and is echoed on the response.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Header carrying the id in both directions.
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Correlation id of the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(HeaderValue);

impl RequestId {
    fn from_request(request: &Request) -> Self {
        request
            .headers()
            .get(&REQUEST_ID_HEADER)
            .filter(|value| !value.is_empty() && value.to_str().is_ok())
            .cloned()
            .map_or_else(Self::generate, Self)
    }

    fn generate() -> Self {
        let id = Uuid::new_v4().hyphenated().to_string();
        // A hyphenated UUID is always a valid header value.
        Self(HeaderValue::from_str(&id).unwrap_or_else(|_| HeaderValue::from_static("unknown")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.to_str().unwrap_or_default()
    }
}

/// Attach a [`RequestId`] to the request and its response.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let id = RequestId::from_request(&request);

    sentry::configure_scope(|scope| scope.set_tag("request_id", id.as_str()));
    tracing::debug!(request_id = id.as_str(), method = %request.method(), uri = %request.uri(), "request");

    request.extensions_mut().insert(id.clone());
    let mut response = next.run(request).await;
    response.headers_mut().insert(REQUEST_ID_HEADER.clone(), id.0);
    response
}
