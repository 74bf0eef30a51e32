//! Cross-site request forgery tokens.
//!
//! The storefront uses the double-submit pattern: a random token is handed
//! out in the `csrftoken` cookie and every unsafe request must echo it, in
//! the `X-CSRFToken` header or, for plain HTML forms, in a
//! `csrfmiddlewaretoken` field. The drawer's add-to-cart client reads the
//! cookie and sets the header; the middleware in [`crate::middleware::csrf`]
//! checks them.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;

/// Cookie carrying the token.
pub const CSRF_COOKIE: &str = "csrftoken";

/// Request header echoing the token.
pub const CSRF_HEADER: &str = "x-csrftoken";

/// Form field echoing the token.
pub const CSRF_FORM_FIELD: &str = "csrfmiddlewaretoken";

/// The token in force for the current request, for pages that render forms.
///
/// Inserted into request extensions by the CSRF middleware, including on the
/// request that first hands the cookie out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken(pub String);

/// Generate a new random token (128-bit, URL-safe base64).
#[must_use]
pub fn generate_token() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Find a cookie's value in a `Cookie` header (`a=1; b=2`).
///
/// Returns the first match. The value is everything after the first `=`.
#[must_use]
pub fn cookie_value<'a>(cookie_header: &'a str, name: &str) -> Option<&'a str> {
    cookie_header
        .split(';')
        .map(str::trim)
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value_found() {
        let header = "sessionid=abc; csrftoken=tok123; theme=dark";
        assert_eq!(cookie_value(header, "csrftoken"), Some("tok123"));
        assert_eq!(cookie_value(header, "theme"), Some("dark"));
    }

    #[test]
    fn test_cookie_value_missing() {
        assert_eq!(cookie_value("sessionid=abc", "csrftoken"), None);
        assert_eq!(cookie_value("", "csrftoken"), None);
    }

    #[test]
    fn test_cookie_value_requires_exact_name() {
        assert_eq!(cookie_value("xcsrftoken=nope", "csrftoken"), None);
    }

    #[test]
    fn test_cookie_value_keeps_equals_in_value() {
        assert_eq!(cookie_value("csrftoken=a=b", "csrftoken"), Some("a=b"));
    }

    #[test]
    fn test_generate_token_is_cookie_safe() {
        let token = generate_token();
        assert_eq!(token.len(), 22);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_ne!(token, generate_token());
    }
}
