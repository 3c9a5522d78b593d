//! Viewer identity types
//!
//! A [`Session`] is re-resolved on every request and never stored server-side.
//! Only [`Session::id`] is guaranteed; views must use the display helpers for
//! everything else.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of the fixed demo identity
pub const DEMO_USER_ID: &str = "demo-user";
/// Email of the fixed demo identity
pub const DEMO_USER_EMAIL: &str = "demo@lgradar.com.au";
/// Display role of the fixed demo identity
pub const DEMO_USER_ROLE: &str = "Demo User";

/// Resolved identity of the current viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque identifier issued by the identity provider
    pub id: String,
    /// Email address, if the provider shared one
    pub email: Option<String>,
    /// Display role
    pub role: Option<String>,
    /// Avatar image URL
    pub avatar_url: Option<String>,
}

impl Session {
    /// Session carrying only an identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: None,
            role: None,
            avatar_url: None,
        }
    }

    /// Set the email address
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the display role
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the avatar URL
    #[must_use]
    pub fn with_avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = Some(url.into());
        self
    }

    /// The fixed synthetic identity used in demo mode
    #[must_use]
    pub fn demo() -> Self {
        Self::new(DEMO_USER_ID)
            .with_email(DEMO_USER_EMAIL)
            .with_role(DEMO_USER_ROLE)
    }

    /// Name shown in the sidebar and user menu
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or("User")
    }

    /// Secondary line in the user menu
    #[must_use]
    pub fn display_email(&self) -> &str {
        self.email.as_deref().unwrap_or("user@example.com")
    }

    /// Role shown under the name
    #[must_use]
    pub fn display_role(&self) -> &str {
        self.role.as_deref().unwrap_or("Member")
    }

    /// Avatar fallback letter
    #[must_use]
    pub fn initial(&self) -> String {
        self.email
            .as_deref()
            .and_then(|email| email.chars().next())
            .map_or_else(|| "U".to_string(), |c| c.to_uppercase().collect())
    }
}

/// Bearer token presented to the identity provider
///
/// The `Debug` output is redacted so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token, rejecting blank values
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    /// Raw token value
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

/// Email and password pair submitted by the login and signup forms
#[derive(Clone, Serialize)]
pub struct PasswordCredentials {
    /// Email address
    pub email: String,
    /// Plain-text password, only forwarded to the provider
    pub password: String,
}

impl fmt::Debug for PasswordCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordCredentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}
