//! CSRF middleware (double-submit cookie).
//!
//! - Safe requests (`GET`, `HEAD`, `OPTIONS`) without a `csrftoken` cookie
//!   get one set on the response.
//! - Unsafe requests must echo the cookie in `X-CSRFToken` or, for
//!   url-encoded forms, in a `csrfmiddlewaretoken` field. Anything else is
//!   rejected with 403 before reaching the handler.
//!
//! Either way the token in force is available to handlers as a
//! [`CsrfToken`] extension.

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{
        HeaderMap, HeaderValue, Method,
        header::{CONTENT_TYPE, COOKIE, SET_COOKIE},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_sessions::cookie::{Cookie, SameSite};
use url::form_urlencoded;

use crate::csrf::{
    CSRF_COOKIE, CSRF_FORM_FIELD, CSRF_HEADER, CsrfToken, cookie_value, generate_token,
};
use crate::error::AppError;

/// Largest form body buffered while looking for the token field.
const MAX_FORM_BYTES: usize = 64 * 1024;

/// Enforce and hand out CSRF tokens.
pub async fn csrf_middleware(mut request: Request, next: Next) -> Response {
    let cookie_token = token_from_cookies(request.headers()).filter(|t| !t.is_empty());

    if is_safe(request.method()) {
        let issued = cookie_token.is_none().then(generate_token);
        let token = cookie_token.or_else(|| issued.clone()).unwrap_or_default();
        request.extensions_mut().insert(CsrfToken(token));

        let mut response = next.run(request).await;
        if let Some(token) = issued
            && let Ok(value) = HeaderValue::from_str(&csrf_cookie(token).to_string())
        {
            response.headers_mut().append(SET_COOKIE, value);
        }
        return response;
    }

    let Some(cookie) = cookie_token else {
        tracing::warn!(method = %request.method(), uri = %request.uri(), "CSRF cookie missing");
        return AppError::Forbidden("CSRF cookie not set".to_string()).into_response();
    };

    let (submitted, mut request) = submitted_token(request).await;
    if submitted.as_deref() != Some(cookie.as_str()) {
        tracing::warn!(method = %request.method(), uri = %request.uri(), "CSRF token mismatch");
        return AppError::Forbidden("CSRF token missing or incorrect".to_string()).into_response();
    }

    request.extensions_mut().insert(CsrfToken(cookie));
    next.run(request).await
}

fn csrf_cookie(token: String) -> Cookie<'static> {
    Cookie::build((CSRF_COOKIE, token))
        .path("/")
        .same_site(SameSite::Lax)
        .build()
}

/// The token echoed by the request: the header if present, otherwise the
/// form field. The body is buffered and put back for the handler.
async fn submitted_token(request: Request) -> (Option<String>, Request) {
    if let Some(header) = request
        .headers()
        .get(CSRF_HEADER)
        .and_then(|h| h.to_str().ok())
    {
        let header = header.to_owned();
        return (Some(header), request);
    }

    if !is_form(request.headers()) {
        return (None, request);
    }

    let (parts, body) = request.into_parts();
    let Ok(bytes) = to_bytes(body, MAX_FORM_BYTES).await else {
        return (None, Request::from_parts(parts, Body::empty()));
    };
    let token = form_urlencoded::parse(&bytes)
        .find(|(key, _)| key == CSRF_FORM_FIELD)
        .map(|(_, value)| value.into_owned());

    (token, Request::from_parts(parts, Body::from(bytes)))
}

fn is_safe(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

fn token_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .find_map(|h| cookie_value(h, CSRF_COOKIE))
        .map(str::to_owned)
}
