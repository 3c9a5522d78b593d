//! Testing utilities for dashboard handlers
//!
//! - [`StubIdentityProvider`] - scripted identity provider with a lookup counter
//!   and an in-memory PKCE authorize/exchange round trip
//! - [`test_state`] - application state around a stub provider
//!
//! # Example
//!
//! ```rust
//! use lgradar_dashboard::app::build_router;
//! use lgradar_dashboard::testing::{test_state, StubIdentityProvider};
//!
//! let provider = StubIdentityProvider::anonymous();
//! let calls = provider.calls();
//! let app = build_router(test_state(provider));
//! assert_eq!(calls.count(), 0);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::app::AppState;
use crate::auth::{
    AccessToken, IdentityProvider, OAuthProvider, PasswordCredentials, PkceVerifier, Session,
};
use crate::config::DashboardConfig;
use crate::error::ProviderError;

/// Access token issued by [`StubIdentityProvider`] on successful sign-in
pub const STUB_ACCESS_TOKEN: &str = "stub-access-token";
/// Authorization code [`StubIdentityProvider`] accepts in a PKCE exchange
pub const STUB_AUTH_CODE: &str = "stub-auth-code";
/// Authorize endpoint of [`StubIdentityProvider`]
pub const STUB_AUTHORIZE_URL: &str = "https://identity.test/auth/v1/authorize";

/// What a stub lookup answers
#[derive(Debug, Clone)]
pub enum StubLookup {
    /// Any presented token belongs to this session
    SignedIn(Session),
    /// No active session
    Anonymous,
    /// Provider is unreachable
    Failing,
}

/// Shared count of `current_user` calls
#[derive(Debug, Clone, Default)]
pub struct CallCounter(Arc<AtomicUsize>);

impl CallCounter {
    /// Number of lookups so far
    #[must_use]
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn bump(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// Values the stub has been handed, shared across clones
#[derive(Debug, Clone, Default)]
pub struct Recorded(Arc<Mutex<Vec<String>>>);

impl Recorded {
    /// Everything recorded so far, oldest first
    #[must_use]
    pub fn all(&self) -> Vec<String> {
        self.0.lock().map(|v| v.clone()).unwrap_or_default()
    }

    fn push(&self, value: &str) {
        if let Ok(mut values) = self.0.lock() {
            values.push(value.to_string());
        }
    }
}

/// Scripted [`IdentityProvider`]
#[derive(Debug, Clone)]
pub struct StubIdentityProvider {
    lookup: StubLookup,
    account: Option<(String, String)>,
    calls: CallCounter,
    signup_redirects: Recorded,
    challenges: Recorded,
}

impl StubIdentityProvider {
    /// Provider with the given lookup behaviour
    #[must_use]
    pub fn new(lookup: StubLookup) -> Self {
        Self {
            lookup,
            account: None,
            calls: CallCounter::default(),
            signup_redirects: Recorded::default(),
            challenges: Recorded::default(),
        }
    }

    /// Every token resolves to `session`
    #[must_use]
    pub fn signed_in(session: Session) -> Self {
        Self::new(StubLookup::SignedIn(session))
    }

    /// No token ever resolves
    #[must_use]
    pub fn anonymous() -> Self {
        Self::new(StubLookup::Anonymous)
    }

    /// Every call fails as if the network were down
    #[must_use]
    pub fn failing() -> Self {
        Self::new(StubLookup::Failing)
    }

    /// Accept this email and password on sign-in
    #[must_use]
    pub fn with_account(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.account = Some((email.into(), password.into()));
        self
    }

    /// Handle on the lookup counter, usable after the stub is moved
    #[must_use]
    pub fn calls(&self) -> CallCounter {
        self.calls.clone()
    }

    /// `redirect_to` values passed to `sign_up`
    #[must_use]
    pub fn signup_redirects(&self) -> Recorded {
        self.signup_redirects.clone()
    }

    fn outage() -> ProviderError {
        ProviderError::UnexpectedStatus {
            status: 503,
            body: "stub provider unavailable".to_string(),
        }
    }
}

#[async_trait]
impl IdentityProvider for StubIdentityProvider {
    async fn current_user(
        &self,
        token: Option<AccessToken>,
    ) -> Result<Option<Session>, ProviderError> {
        self.calls.bump();
        match (&self.lookup, token) {
            (StubLookup::Failing, _) => Err(Self::outage()),
            (StubLookup::SignedIn(session), Some(_)) => Ok(Some(session.clone())),
            (StubLookup::SignedIn(_) | StubLookup::Anonymous, _) => Ok(None),
        }
    }

    async fn sign_in_with_password(
        &self,
        credentials: &PasswordCredentials,
    ) -> Result<AccessToken, ProviderError> {
        if matches!(self.lookup, StubLookup::Failing) {
            return Err(Self::outage());
        }
        match &self.account {
            Some((email, password))
                if *email == credentials.email && *password == credentials.password =>
            {
                AccessToken::new(STUB_ACCESS_TOKEN).ok_or_else(Self::outage)
            }
            _ => Err(ProviderError::Rejected("Invalid login credentials".to_string())),
        }
    }

    async fn sign_up(
        &self,
        credentials: &PasswordCredentials,
        redirect_to: &str,
    ) -> Result<(), ProviderError> {
        if matches!(self.lookup, StubLookup::Failing) {
            return Err(Self::outage());
        }
        self.signup_redirects.push(redirect_to);
        match &self.account {
            Some((email, _)) if *email == credentials.email => {
                Err(ProviderError::Rejected("User already registered".to_string()))
            }
            _ => Ok(()),
        }
    }

    fn authorize_url(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
        code_challenge: &str,
    ) -> Result<String, ProviderError> {
        self.challenges.push(code_challenge);
        Ok(format!(
            "{STUB_AUTHORIZE_URL}?provider={}&redirect_to={redirect_to}&code_challenge={code_challenge}&code_challenge_method=s256",
            provider.as_str()
        ))
    }

    /// Accepts [`STUB_AUTH_CODE`] with a verifier matching an issued challenge
    async fn exchange_code(
        &self,
        auth_code: &str,
        code_verifier: &str,
    ) -> Result<AccessToken, ProviderError> {
        if matches!(self.lookup, StubLookup::Failing) {
            return Err(Self::outage());
        }
        let issued = PkceVerifier::from_cookie(code_verifier)
            .is_some_and(|v| self.challenges.all().contains(&v.challenge()));
        if auth_code == STUB_AUTH_CODE && issued {
            AccessToken::new(STUB_ACCESS_TOKEN).ok_or_else(Self::outage)
        } else {
            Err(ProviderError::Rejected("invalid flow state".to_string()))
        }
    }

    async fn sign_out(&self, _token: AccessToken) -> Result<(), ProviderError> {
        Ok(())
    }
}

/// Default configuration wrapped around `provider`
#[must_use]
pub fn test_state(provider: impl IdentityProvider + 'static) -> AppState {
    AppState::new(DashboardConfig::default(), Arc::new(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_counts_lookups() {
        let provider = StubIdentityProvider::anonymous();
        let calls = provider.calls();
        let _ = provider.current_user(None).await;
        let _ = provider.current_user(AccessToken::new("t")).await;
        assert_eq!(calls.count(), 2);
    }

    #[tokio::test]
    async fn test_signed_in_stub_needs_a_token() {
        let provider = StubIdentityProvider::signed_in(Session::new("u"));
        assert_eq!(provider.current_user(None).await.unwrap(), None);
        assert!(provider
            .current_user(AccessToken::new("t"))
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_stub_sign_in_checks_credentials() {
        let provider = StubIdentityProvider::anonymous().with_account("a@b.com", "secret1");
        let good = PasswordCredentials {
            email: "a@b.com".to_string(),
            password: "secret1".to_string(),
        };
        let bad = PasswordCredentials {
            email: "a@b.com".to_string(),
            password: "nope".to_string(),
        };
        assert_eq!(
            provider.sign_in_with_password(&good).await.unwrap().expose(),
            STUB_ACCESS_TOKEN
        );
        assert!(matches!(
            provider.sign_in_with_password(&bad).await,
            Err(ProviderError::Rejected(_))
        ));
    }

    #[tokio::test]
    async fn test_stub_exchange_requires_issued_challenge() {
        let provider = StubIdentityProvider::anonymous();
        let verifier = PkceVerifier::generate();

        let rejected = provider.exchange_code(STUB_AUTH_CODE, verifier.as_str()).await;
        assert!(matches!(rejected, Err(ProviderError::Rejected(_))));

        let url = provider
            .authorize_url(OAuthProvider::Google, "http://x/cb", &verifier.challenge())
            .unwrap();
        assert!(url.starts_with(STUB_AUTHORIZE_URL));
        assert!(url.contains("provider=google"));

        let token = provider
            .exchange_code(STUB_AUTH_CODE, verifier.as_str())
            .await
            .unwrap();
        assert_eq!(token.expose(), STUB_ACCESS_TOKEN);
        assert!(provider.exchange_code("other", verifier.as_str()).await.is_err());
    }
}
