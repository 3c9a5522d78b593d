//! Error types and error handling

use thiserror::Error;

/// Startup and configuration errors
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logging could not be initialised
    #[error("Logging error: {0}")]
    Logging(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by an identity provider
///
/// None of these ever reach a rendered protected page: the session resolver
/// downgrades every variant to an anonymous viewer.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Provider URL or API key missing
    #[error("identity provider is not configured")]
    NotConfigured,

    /// Network or decoding failure talking to the provider
    #[error("identity provider transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a status we do not understand
    #[error("identity provider returned status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// A provider URL could not be built
    #[error("invalid identity provider URL: {0}")]
    InvalidUrl(String),

    /// Provider refused the request (bad credentials, duplicate signup, ...)
    #[error("{0}")]
    Rejected(String),
}

impl ProviderError {
    /// Message that is safe to show next to a form
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::NotConfigured => "Supabase not configured".to_string(),
            Self::Rejected(message) => message.clone(),
            Self::Transport(_) | Self::UnexpectedStatus { .. } | Self::InvalidUrl(_) => {
                "An unexpected error occurred".to_string()
            }
        }
    }
}
