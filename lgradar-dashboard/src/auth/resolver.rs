//! Per-request session resolution
//!
//! [`SessionResolver`] turns a demo flag and an optional access token into a
//! [`Resolution`]. It never fails: any provider error is logged and the viewer
//! is treated as anonymous.

use super::demo::DemoFlag;
use super::provider::IdentityProvider;
use super::session::{AccessToken, Session};

/// Outcome of resolving the current viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The identity provider vouched for this session
    Authenticated(Session),
    /// The request asked for demo mode
    Demo(Session),
    /// No identity could be established
    Anonymous,
}

impl Resolution {
    /// The resolved session, if any
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) | Self::Demo(session) => Some(session),
            Self::Anonymous => None,
        }
    }

    /// Whether no identity was established
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// Convert into a [`Viewer`], or `None` for anonymous requests
    #[must_use]
    pub fn into_viewer(self) -> Option<Viewer> {
        match self {
            Self::Authenticated(session) => Some(Viewer { session, demo: false }),
            Self::Demo(session) => Some(Viewer { session, demo: true }),
            Self::Anonymous => None,
        }
    }
}

/// A viewer that passed the page gate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewer {
    /// Resolved identity
    pub session: Session,
    /// Whether the identity is the synthetic demo user
    pub demo: bool,
}

impl Viewer {
    /// Internal link that keeps demo mode across navigation
    #[must_use]
    pub fn link(&self, path: &str) -> String {
        if !self.demo {
            return path.to_string();
        }
        let separator = if path.contains('?') { '&' } else { '?' };
        format!("{path}{separator}demo=true")
    }
}

/// Resolves the viewer for a single request
///
/// Constructed fresh for each request around the shared, immutable provider.
pub struct SessionResolver<'a> {
    provider: &'a dyn IdentityProvider,
    allow_demo: bool,
}

impl<'a> SessionResolver<'a> {
    /// Resolver backed by `provider`, with demo mode allowed
    #[must_use]
    pub fn new(provider: &'a dyn IdentityProvider) -> Self {
        Self {
            provider,
            allow_demo: true,
        }
    }

    /// Enable or disable the demo bypass
    #[must_use]
    pub fn with_demo_allowed(mut self, allow: bool) -> Self {
        self.allow_demo = allow;
        self
    }

    /// Determine who is viewing the page
    pub async fn resolve(&self, demo: DemoFlag, token: Option<AccessToken>) -> Resolution {
        if demo.is_on() {
            if self.allow_demo {
                tracing::debug!("Resolved demo viewer");
                return Resolution::Demo(Session::demo());
            }
            tracing::debug!("Demo mode requested but disabled");
        }

        match self.provider.current_user(token).await {
            Ok(Some(session)) => Resolution::Authenticated(session),
            Ok(None) => Resolution::Anonymous,
            Err(error) => {
                tracing::warn!(error = %error, "Auth check failed, treating viewer as anonymous");
                Resolution::Anonymous
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::provider::MockIdentityProvider;
    use crate::error::ProviderError;

    fn token() -> Option<AccessToken> {
        AccessToken::new("token")
    }

    #[tokio::test]
    async fn test_demo_flag_never_calls_provider() {
        let mut provider = MockIdentityProvider::new();
        provider.expect_current_user().never();

        let resolution = SessionResolver::new(&provider)
            .resolve(DemoFlag::ON, token())
            .await;

        let session = resolution.session().unwrap();
        assert_eq!(session.id, "demo-user");
        assert_eq!(session.email.as_deref(), Some("demo@lgradar.com.au"));
        assert!(matches!(resolution, Resolution::Demo(_)));
    }

    #[tokio::test]
    async fn test_provider_identity_becomes_session() {
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_current_user()
            .times(1)
            .returning(|_| Ok(Some(Session::new("u-1").with_email("a@b.com"))));

        let resolution = SessionResolver::new(&provider)
            .resolve(DemoFlag::OFF, token())
            .await;

        assert_eq!(
            resolution,
            Resolution::Authenticated(Session::new("u-1").with_email("a@b.com"))
        );
    }

    #[tokio::test]
    async fn test_no_identity_is_anonymous() {
        let mut provider = MockIdentityProvider::new();
        provider.expect_current_user().returning(|_| Ok(None));

        let resolution = SessionResolver::new(&provider)
            .resolve(DemoFlag::OFF, None)
            .await;

        assert!(resolution.is_anonymous());
    }

    #[tokio::test]
    async fn test_provider_failure_is_anonymous() {
        let mut provider = MockIdentityProvider::new();
        provider.expect_current_user().returning(|_| {
            Err(ProviderError::UnexpectedStatus {
                status: 503,
                body: "down".to_string(),
            })
        });

        let resolution = SessionResolver::new(&provider)
            .resolve(DemoFlag::OFF, token())
            .await;

        assert!(resolution.is_anonymous());
    }

    #[tokio::test]
    async fn test_disabled_demo_falls_through_to_provider() {
        let mut provider = MockIdentityProvider::new();
        provider.expect_current_user().times(1).returning(|_| Ok(None));

        let resolution = SessionResolver::new(&provider)
            .with_demo_allowed(false)
            .resolve(DemoFlag::ON, None)
            .await;

        assert!(resolution.is_anonymous());
    }

    #[tokio::test]
    async fn test_resolution_is_idempotent() {
        let mut provider = MockIdentityProvider::new();
        provider
            .expect_current_user()
            .times(2)
            .returning(|_| Ok(Some(Session::new("u-1"))));

        let resolver = SessionResolver::new(&provider);
        let first = resolver.resolve(DemoFlag::OFF, token()).await;
        let second = resolver.resolve(DemoFlag::OFF, token()).await;

        assert_eq!(first, second);
    }

    #[test]
    fn test_demo_viewer_links_keep_demo_flag() {
        let viewer = Resolution::Demo(Session::demo()).into_viewer().unwrap();
        assert_eq!(viewer.link("/dashboard/billing"), "/dashboard/billing?demo=true");
        assert_eq!(viewer.link("/dashboard?tab=1"), "/dashboard?tab=1&demo=true");

        let viewer = Resolution::Authenticated(Session::new("u")).into_viewer().unwrap();
        assert_eq!(viewer.link("/dashboard/billing"), "/dashboard/billing");
        assert!(Resolution::Anonymous.into_viewer().is_none());
    }
}
