//! Application state and router

use std::sync::Arc;

use axum::routing::{get, post};
use axum::{middleware, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::auth::oauth::CALLBACK_PATH;
use crate::auth::{AccessToken, IdentityProvider, SessionResolver};
use crate::config::DashboardConfig;
use crate::handlers;
use crate::middleware::PageGate;

/// Shared, immutable application state
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<DashboardConfig>,
    /// Identity provider handle
    pub provider: Arc<dyn IdentityProvider>,
}

impl AppState {
    /// Bundle configuration and provider
    #[must_use]
    pub fn new(config: DashboardConfig, provider: Arc<dyn IdentityProvider>) -> Self {
        Self {
            config: Arc::new(config),
            provider,
        }
    }

    /// A resolver for the current request
    #[must_use]
    pub fn resolver(&self) -> SessionResolver<'_> {
        SessionResolver::new(self.provider.as_ref()).with_demo_allowed(self.config.auth.allow_demo)
    }

    /// Access token carried by the configured cookie
    #[must_use]
    pub fn access_token(&self, jar: &CookieJar) -> Option<AccessToken> {
        jar.get(&self.config.identity.access_cookie)
            .and_then(|cookie| AccessToken::new(cookie.value()))
    }

    /// HttpOnly, `SameSite=Lax` cookie scoped to `path`; `Secure` when configured
    #[must_use]
    pub fn auth_cookie(&self, name: &str, value: &str, path: &str) -> Cookie<'static> {
        Cookie::build((name.to_string(), value.to_string()))
            .path(path.to_string())
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.config.identity.secure_cookie)
            .build()
    }
}

/// Build the full router
///
/// Everything under `/dashboard` sits behind [`PageGate::require_session`].
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/dashboard", get(handlers::pages::dashboard))
        .route("/dashboard/gazettes", get(handlers::pages::gazettes))
        .route("/dashboard/alerts", get(handlers::pages::alerts))
        .route("/dashboard/billing", get(handlers::pages::billing))
        .route("/dashboard/account", get(handlers::pages::account))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            PageGate::require_session,
        ));

    Router::new()
        .route("/", get(handlers::auth::home))
        .route("/health", get(handlers::health))
        .route(
            "/login",
            get(handlers::auth::login_page).post(handlers::auth::login),
        )
        .route(
            "/signup",
            get(handlers::auth::signup_page).post(handlers::auth::signup),
        )
        .route("/logout", post(handlers::auth::logout))
        .route("/auth/google", get(handlers::auth::google))
        .route(CALLBACK_PATH, get(handlers::auth::oauth_callback))
        .route(
            "/contact",
            get(handlers::contact::contact_page).post(handlers::contact::submit),
        )
        .merge(protected)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubIdentityProvider;

    fn state(secure_cookie: bool) -> AppState {
        let mut config = DashboardConfig::default();
        config.identity.secure_cookie = secure_cookie;
        AppState::new(config, Arc::new(StubIdentityProvider::anonymous()))
    }

    #[test]
    fn test_auth_cookie_attributes() {
        let cookie = state(false).auth_cookie("sb-access-token", "t", "/");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_ne!(cookie.secure(), Some(true));
        assert!(!cookie.to_string().contains("Secure"));
    }

    #[test]
    fn test_auth_cookie_secure_when_configured() {
        let cookie = state(true).auth_cookie("sb-access-token", "t", "/auth");
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.path(), Some("/auth"));
        assert!(cookie.to_string().contains("Secure"));
    }
}
