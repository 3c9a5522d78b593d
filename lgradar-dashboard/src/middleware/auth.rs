//! Page gate for protected dashboard routes
//!
//! Every protected request is resolved from scratch. Anonymous viewers are
//! redirected to the login page before the handler runs; resolved viewers are
//! stored in request extensions for the [`Authenticated`] extractor.
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use lgradar_dashboard::app::AppState;
//! use lgradar_dashboard::extractors::Authenticated;
//! use lgradar_dashboard::middleware::PageGate;
//!
//! async fn protected_handler(Authenticated(viewer): Authenticated) -> String {
//!     format!("Hello, {}!", viewer.session.display_name())
//! }
//!
//! # fn example(state: AppState) -> Router {
//! Router::new()
//!     .route("/dashboard", get(protected_handler))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), PageGate::require_session))
//!     .with_state(state)
//! # }
//! ```
//!
//! [`Authenticated`]: crate::extractors::Authenticated

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::app::AppState;
use crate::auth::{DemoFlag, Resolution, Viewer};
use crate::htmx::{HxRedirect, HxRequest};

/// Decision for a single protected request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateResult {
    /// Render the page for this viewer
    Authorized(Viewer),
    /// Send the visitor here instead
    Redirect(String),
}

/// Gate that admits only resolved viewers
#[derive(Debug, Clone)]
pub struct PageGate {
    login_path: String,
}

impl PageGate {
    /// Gate redirecting anonymous visitors to `login_path`
    #[must_use]
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
        }
    }

    /// Turn a resolution into a gate decision
    #[must_use]
    pub fn decide(&self, resolution: Resolution) -> GateResult {
        resolution
            .into_viewer()
            .map_or_else(|| GateResult::Redirect(self.login_path.clone()), GateResult::Authorized)
    }

    /// Middleware handler guarding protected routes
    ///
    /// # Errors
    ///
    /// Returns a [`GateRejection`] (login redirect) when no viewer resolves.
    pub async fn require_session(
        State(state): State<AppState>,
        jar: CookieJar,
        HxRequest(is_htmx): HxRequest,
        mut request: Request,
        next: Next,
    ) -> Result<Response, GateRejection> {
        let demo = DemoFlag::from_uri(request.uri());
        let token = state.access_token(&jar);
        let resolution = state.resolver().resolve(demo, token).await;

        let gate = Self::new(state.config.auth.login_path.clone());
        match gate.decide(resolution) {
            GateResult::Authorized(viewer) => {
                request.extensions_mut().insert(viewer);
                Ok(next.run(request).await)
            }
            GateResult::Redirect(target) => {
                tracing::debug!(
                    path = %request.uri().path(),
                    htmx = is_htmx,
                    "Anonymous viewer redirected to login"
                );
                Err(GateRejection::new(target, is_htmx))
            }
        }
    }
}

/// Response sent instead of a protected page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateRejection {
    /// Regular request: `303 See Other` to the login page
    RedirectToLogin(String),
    /// htmx request: `401` with `HX-Redirect`
    Unauthorized(String),
}

impl GateRejection {
    /// Pick the rejection style for the request kind
    #[must_use]
    pub fn new(login_path: String, is_htmx: bool) -> Self {
        if is_htmx {
            Self::Unauthorized(login_path)
        } else {
            Self::RedirectToLogin(login_path)
        }
    }
}

impl IntoResponse for GateRejection {
    fn into_response(self) -> Response {
        match self {
            Self::Unauthorized(path) => HxRedirect(path).into_response(),
            Self::RedirectToLogin(path) => Redirect::to(&path).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Session;
    use crate::config::DashboardConfig;
    use crate::testing::StubIdentityProvider;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware,
        routing::get,
        Router,
    };
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn protected_handler() -> &'static str {
        "Protected content"
    }

    fn app(provider: StubIdentityProvider) -> Router {
        let state = AppState::new(DashboardConfig::default(), Arc::new(provider));
        Router::new()
            .route("/protected", get(protected_handler))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                PageGate::require_session,
            ))
            .with_state(state)
    }

    #[test]
    fn test_decide() {
        let gate = PageGate::new("/signin");
        assert_eq!(
            gate.decide(Resolution::Anonymous),
            GateResult::Redirect("/signin".to_string())
        );

        let GateResult::Authorized(viewer) = gate.decide(Resolution::Demo(Session::demo())) else {
            panic!("demo viewer should be authorized");
        };
        assert!(viewer.demo);
    }

    #[tokio::test]
    async fn test_unauthenticated_regular_request_redirects() {
        let request = Request::builder()
            .uri("/protected")
            .body(Body::empty())
            .unwrap();

        let response = app(StubIdentityProvider::anonymous())
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get("location").unwrap(), "/login");
    }

    #[tokio::test]
    async fn test_unauthenticated_htmx_request_returns_401() {
        let request = Request::builder()
            .uri("/protected")
            .header("HX-Request", "true")
            .body(Body::empty())
            .unwrap();

        let response = app(StubIdentityProvider::failing())
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers().get("HX-Redirect").unwrap(), "/login");
    }

    #[tokio::test]
    async fn test_authenticated_request_proceeds() {
        let request = Request::builder()
            .uri("/protected")
            .header("cookie", "sb-access-token=valid")
            .body(Body::empty())
            .unwrap();

        let provider = StubIdentityProvider::signed_in(Session::new("u-1").with_email("a@b.com"));
        let response = app(provider).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_demo_request_proceeds_without_provider() {
        let provider = StubIdentityProvider::failing();
        let calls = provider.calls();

        let request = Request::builder()
            .uri("/protected?demo=true")
            .body(Body::empty())
            .unwrap();

        let response = app(provider).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(calls.count(), 0);
    }
}
