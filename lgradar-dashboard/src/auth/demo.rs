//! Demo flag parsing

use axum::extract::Query;
use axum::http::Uri;
use serde::Deserialize;

/// Query parameter that switches a request into demo mode
pub const DEMO_QUERY_PARAM: &str = "demo";

#[derive(Debug, Deserialize)]
struct DemoQuery {
    demo: Option<String>,
}

/// Whether the request asked for the demo identity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemoFlag(bool);

impl DemoFlag {
    /// Demo mode requested
    pub const ON: Self = Self(true);
    /// Demo mode not requested
    pub const OFF: Self = Self(false);

    /// Only the exact literal `"true"` enables demo mode
    #[must_use]
    pub fn from_query_value(value: Option<&str>) -> Self {
        Self(value == Some("true"))
    }

    /// Read the flag from a request URI
    ///
    /// A query string that cannot be decoded counts as "no flag".
    #[must_use]
    pub fn from_uri(uri: &Uri) -> Self {
        Query::<DemoQuery>::try_from_uri(uri)
            .map(|Query(q)| Self::from_query_value(q.demo.as_deref()))
            .unwrap_or_default()
    }

    /// Whether demo mode is on
    #[must_use]
    pub const fn is_on(self) -> bool {
        self.0
    }
}
