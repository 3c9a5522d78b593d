//! HTMX request and response helpers
//!
//! Type-safe wrappers for the HTMX headers the dashboard uses.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// Request header set by htmx on every AJAX request
pub const HX_REQUEST: &str = "HX-Request";
/// Response header asking htmx to navigate the whole page
pub const HX_REDIRECT: &str = "HX-Redirect";

/// Whether the request was issued by htmx
///
/// ```rust
/// use lgradar_dashboard::htmx::HxRequest;
///
/// async fn handler(HxRequest(is_htmx): HxRequest) -> &'static str {
///     if is_htmx { "fragment" } else { "full page" }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HxRequest(pub bool);

impl HxRequest {
    /// Inspect request headers directly
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self(
            headers
                .get(HX_REQUEST)
                .and_then(|v| v.to_str().ok())
                == Some("true"),
        )
    }
}

impl<S> FromRequestParts<S> for HxRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// `HX-Redirect` response with a `401 Unauthorized` status
///
/// htmx follows the header with a full page load, which keeps partial swaps
/// from rendering a login page inside a dashboard fragment.
#[derive(Debug, Clone)]
pub struct HxRedirect(pub String);

impl IntoResponse for HxRedirect {
    fn into_response(self) -> Response {
        match HeaderValue::from_str(&self.0) {
            Ok(location) => (
                StatusCode::UNAUTHORIZED,
                [(HX_REDIRECT, location)],
                "Unauthorized",
            )
                .into_response(),
            Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}
