//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session (visitor cart)
//! 5. Security headers (CSP, frame options, etc.)
//! 6. CSRF (double-submit cookie check)

pub mod csrf;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use csrf::csrf_middleware;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
