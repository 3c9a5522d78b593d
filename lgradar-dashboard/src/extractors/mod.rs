//! Axum extractors for dashboard handlers
//!
//! [`Authenticated`] hands a protected view its required viewer. If a route was
//! mounted without the page gate the extractor rejects with the same login
//! redirect, so a protected view never runs without a session.

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;

use crate::app::AppState;
use crate::auth::Viewer;
use crate::htmx::HxRequest;
use crate::middleware::GateRejection;

/// Viewer admitted by the page gate
#[derive(Debug, Clone)]
pub struct Authenticated(pub Viewer);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = GateRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(viewer) = parts.extensions.get::<Viewer>() {
            return Ok(Self(viewer.clone()));
        }

        let app = AppState::from_ref(state);
        tracing::warn!(
            path = %parts.uri.path(),
            "Protected handler reached without a resolved viewer"
        );
        Err(GateRejection::new(
            app.config.auth.login_path.clone(),
            HxRequest::from_headers(&parts.headers).0,
        ))
    }
}
