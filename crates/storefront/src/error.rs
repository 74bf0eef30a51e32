//! Storefront error responses.
//!
//! Page and cart handlers return [`Result`]; the add-to-cart endpoint answers
//! unknown products in its JSON body and only uses [`AppError`] when the
//! visitor's session cannot be read or written.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Why a storefront request failed.
#[derive(Debug, Error)]
pub enum AppError {
    /// No catalog product at this id.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request failed the CSRF check.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The session store failed while loading or saving the visitor's cart.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl AppError {
    const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(error = %self, sentry_event_id = %event_id, "request failed");
            return (status, "Internal server error").into_response();
        }

        (status, self.to_string()).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Record a cart action as a Sentry breadcrumb.
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", &[("product_id", "1")]);
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, &str)]) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    breadcrumb.data.extend(data.iter().map(|(key, value)| {
        (
            (*key).to_string(),
            serde_json::Value::String((*value).to_string()),
        )
    }));

    sentry::add_breadcrumb(breadcrumb);
}
