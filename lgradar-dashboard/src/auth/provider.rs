//! Identity provider capability
//!
//! The dashboard only talks to its authentication service through
//! [`IdentityProvider`]. Handlers never hold a provider-specific client; the
//! application state carries an `Arc<dyn IdentityProvider>` that is immutable
//! after startup.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::oauth::OAuthProvider;
use super::session::{AccessToken, PasswordCredentials, Session};
use super::supabase::SupabaseProvider;
use crate::config::IdentityConfig;
use crate::error::{DashboardError, ProviderError};

/// Narrow interface to the external authentication service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Look up the user behind an access token
    ///
    /// `Ok(None)` means "no active session" and is not an error.
    async fn current_user(
        &self,
        token: Option<AccessToken>,
    ) -> Result<Option<Session>, ProviderError>;

    /// Exchange email and password for an access token
    async fn sign_in_with_password(
        &self,
        credentials: &PasswordCredentials,
    ) -> Result<AccessToken, ProviderError>;

    /// Register a new account; the provider sends a confirmation email whose
    /// link returns to `redirect_to`
    async fn sign_up(
        &self,
        credentials: &PasswordCredentials,
        redirect_to: &str,
    ) -> Result<(), ProviderError>;

    /// URL that starts third-party sign-in with `provider`
    ///
    /// The provider sends the browser back to `redirect_to` with a `code`
    /// bound to `code_challenge`.
    fn authorize_url(
        &self,
        provider: OAuthProvider,
        redirect_to: &str,
        code_challenge: &str,
    ) -> Result<String, ProviderError>;

    /// Exchange a third-party sign-in code and its PKCE verifier for an access token
    async fn exchange_code(
        &self,
        auth_code: &str,
        code_verifier: &str,
    ) -> Result<AccessToken, ProviderError>;

    /// Invalidate an access token
    async fn sign_out(&self, token: AccessToken) -> Result<(), ProviderError>;
}

/// Provider used when no URL or key is configured
///
/// Every lookup fails with [`ProviderError::NotConfigured`], so only demo mode
/// can reach protected pages.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredProvider;

#[async_trait]
impl IdentityProvider for UnconfiguredProvider {
    async fn current_user(
        &self,
        _token: Option<AccessToken>,
    ) -> Result<Option<Session>, ProviderError> {
        Err(ProviderError::NotConfigured)
    }

    async fn sign_in_with_password(
        &self,
        _credentials: &PasswordCredentials,
    ) -> Result<AccessToken, ProviderError> {
        Err(ProviderError::NotConfigured)
    }

    async fn sign_up(
        &self,
        _credentials: &PasswordCredentials,
        _redirect_to: &str,
    ) -> Result<(), ProviderError> {
        Err(ProviderError::NotConfigured)
    }

    fn authorize_url(
        &self,
        _provider: OAuthProvider,
        _redirect_to: &str,
        _code_challenge: &str,
    ) -> Result<String, ProviderError> {
        Err(ProviderError::NotConfigured)
    }

    async fn exchange_code(
        &self,
        _auth_code: &str,
        _code_verifier: &str,
    ) -> Result<AccessToken, ProviderError> {
        Err(ProviderError::NotConfigured)
    }

    async fn sign_out(&self, _token: AccessToken) -> Result<(), ProviderError> {
        Ok(())
    }
}

/// Build the provider described by the configuration
///
/// # Errors
///
/// Returns [`DashboardError::Config`] if the HTTP client cannot be built.
pub fn provider_from_config(
    config: &IdentityConfig,
) -> Result<Arc<dyn IdentityProvider>, DashboardError> {
    match (&config.url, &config.anon_key) {
        (Some(url), Some(key)) if config.is_configured() => {
            let provider = SupabaseProvider::new(
                url.clone(),
                key.clone(),
                Duration::from_secs(config.timeout_secs),
            )?;
            tracing::info!(url = %url, "Identity provider configured");
            Ok(Arc::new(provider))
        }
        _ => {
            tracing::warn!(
                "Identity provider not configured; only demo mode can reach the dashboard"
            );
            Ok(Arc::new(UnconfiguredProvider))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unconfigured_provider_fails_lookup() {
        let provider = UnconfiguredProvider;
        let result = provider.current_user(AccessToken::new("token")).await;
        assert!(matches!(result, Err(ProviderError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_unconfigured_provider_sign_out_is_noop() {
        let provider = UnconfiguredProvider;
        let token = AccessToken::new("token").unwrap();
        assert!(provider.sign_out(token).await.is_ok());
    }

    #[test]
    fn test_unconfigured_provider_has_no_authorize_url() {
        let result = UnconfiguredProvider.authorize_url(OAuthProvider::Google, "http://x/cb", "c");
        assert!(matches!(result, Err(ProviderError::NotConfigured)));
    }

    #[tokio::test]
    async fn test_provider_from_config_falls_back_when_unconfigured() {
        let provider = provider_from_config(&IdentityConfig::default()).unwrap();
        let result = provider.current_user(None).await;
        assert!(matches!(result, Err(ProviderError::NotConfigured)));
    }
}
