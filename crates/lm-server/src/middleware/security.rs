//! Security headers middleware.
//!
//! The preview pane injects engine output without escaping, so the page is
//! locked down instead: no inline or foreign scripts, no plugins, no `<base>`
//! rewrites, no framing, and no referrer leaking to images the preview links.

use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::HeaderName;
use tower_http::set_header::SetResponseHeaderLayer;

/// Content-Security-Policy header value.
///
/// Remote images are allowed because documents may embed them.
const CSP: &str = "default-src 'self'; \
                   script-src 'self'; \
                   style-src 'self' 'unsafe-inline'; \
                   img-src 'self' data: https:; \
                   object-src 'none'; \
                   base-uri 'none'; \
                   connect-src 'self' ws: wss:; \
                   frame-ancestors 'none'";

/// Headers set on every response.
const HEADERS: &[(&str, &str)] = &[
    ("content-security-policy", CSP),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
];

/// Wrap `router` so every response carries the security headers.
pub(crate) fn with_security_headers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    HEADERS.iter().fold(router, |router, &(name, value)| {
        router.layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ))
    })
}
