//! Dashboard configuration
//!
//! Configuration is read from an optional TOML file and then overridden by
//! environment variables:
//!
//! | Variable | Field |
//! |---|---|
//! | `LGRADAR_HOST` | `server.host` |
//! | `LGRADAR_PORT` | `server.port` |
//! | `LGRADAR_PUBLIC_URL` | `server.public_url` |
//! | `LGRADAR_LOG_LEVEL` | `logging.level` |
//! | `LGRADAR_LOG_FORMAT` | `logging.format` |
//! | `LGRADAR_LOGIN_PATH` | `auth.login_path` |
//! | `LGRADAR_ALLOW_DEMO` | `auth.allow_demo` |
//! | `SUPABASE_URL` | `identity.url` |
//! | `SUPABASE_ANON_KEY` | `identity.anon_key` |
//! | `LGRADAR_SECURE_COOKIE` | `identity.secure_cookie` |
//!
//! Every section has defaults, so an empty file (or no file) is a valid
//! configuration. Without `identity.url` and `identity.anon_key` the identity
//! provider is unconfigured and only demo mode can reach protected pages.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::DashboardError;

const VALID_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
const VALID_FORMATS: [&str; 2] = ["compact", "json"];

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Identity provider connection
    pub identity: IdentityConfig,
    /// Page gate behaviour
    pub auth: AuthConfig,
    /// Log output
    pub logging: LoggingConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Externally visible origin used in provider redirect links,
    /// e.g. `https://dashboard.lgradar.com.au`
    pub public_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            public_url: None,
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for `TcpListener::bind`
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Origin for absolute links back into the dashboard
    ///
    /// Falls back to `http://host:port` when no public URL is set.
    #[must_use]
    pub fn origin(&self) -> String {
        match self.public_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.trim_end_matches('/').to_string(),
            _ => format!("http://{}", self.bind_address()),
        }
    }
}

/// Identity provider (Supabase) connection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Project URL, e.g. `https://abc.supabase.co`
    pub url: Option<String>,
    /// Public anon API key
    pub anon_key: Option<String>,
    /// Request timeout for provider calls
    pub timeout_secs: u64,
    /// Cookie carrying the viewer's access token
    pub access_cookie: String,
    /// Mark auth cookies `Secure`; enable when served over HTTPS
    pub secure_cookie: bool,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            timeout_secs: 10,
            access_cookie: "sb-access-token".to_string(),
            secure_cookie: false,
        }
    }
}

impl IdentityConfig {
    /// Whether both the URL and the key are present and non-empty
    #[must_use]
    pub fn is_configured(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        present(&self.url) && present(&self.anon_key)
    }
}

/// Page gate settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Where anonymous viewers are sent
    pub login_path: String,
    /// Where a successful sign-in lands
    pub after_login_path: String,
    /// Whether `?demo=true` is honoured
    pub allow_demo: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            after_login_path: "/dashboard".to_string(),
            allow_demo: true,
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base level; `RUST_LOG` takes precedence when set
    pub level: String,
    /// `compact` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a TOML file
    ///
    /// Environment overrides are applied separately by [`Self::load`].
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Io`] if the file cannot be read and
    /// [`DashboardError::Config`] if it is not valid TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, DashboardError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Config`] on malformed input.
    pub fn from_toml(content: &str) -> Result<Self, DashboardError> {
        toml::from_str(content)
            .map_err(|e| DashboardError::Config(format!("Failed to parse config file: {e}")))
    }

    /// Load from an optional file, apply environment overrides and validate
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if an
    /// environment variable holds an unparseable value, or if validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, DashboardError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Config`] if a numeric or boolean variable
    /// cannot be parsed.
    pub fn apply_env_overrides(&mut self) -> Result<(), DashboardError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Config`] if a numeric or boolean variable
    /// cannot be parsed.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), DashboardError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("LGRADAR_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("LGRADAR_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| DashboardError::Config(format!("Invalid LGRADAR_PORT '{port}'")))?;
        }
        if let Some(url) = lookup("LGRADAR_PUBLIC_URL") {
            self.server.public_url = Some(url);
        }
        if let Some(level) = lookup("LGRADAR_LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
        }
        if let Some(format) = lookup("LGRADAR_LOG_FORMAT") {
            self.logging.format = format.to_lowercase();
        }
        if let Some(path) = lookup("LGRADAR_LOGIN_PATH") {
            self.auth.login_path = path;
        }
        if let Some(flag) = lookup("LGRADAR_ALLOW_DEMO") {
            self.auth.allow_demo = parse_bool(&flag).ok_or_else(|| {
                DashboardError::Config(format!("Invalid LGRADAR_ALLOW_DEMO '{flag}'"))
            })?;
        }
        if let Some(flag) = lookup("LGRADAR_SECURE_COOKIE") {
            self.identity.secure_cookie = parse_bool(&flag).ok_or_else(|| {
                DashboardError::Config(format!("Invalid LGRADAR_SECURE_COOKIE '{flag}'"))
            })?;
        }
        if let Some(url) = lookup("SUPABASE_URL") {
            self.identity.url = Some(url);
        }
        if let Some(key) = lookup("SUPABASE_ANON_KEY") {
            self.identity.anon_key = Some(key);
        }
        Ok(())
    }

    /// Validate configuration settings
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Config`] describing the first invalid field.
    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.server.port == 0 {
            return Err(DashboardError::Config("Server port cannot be 0".to_string()));
        }

        if !VALID_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(DashboardError::Config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                VALID_LEVELS.join(", ")
            )));
        }

        if !VALID_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(DashboardError::Config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                VALID_FORMATS.join(", ")
            )));
        }

        for (name, path) in [
            ("auth.login_path", &self.auth.login_path),
            ("auth.after_login_path", &self.auth.after_login_path),
        ] {
            if !path.starts_with('/') {
                return Err(DashboardError::Config(format!(
                    "{name} must be an absolute path, got '{path}'"
                )));
            }
        }

        if let Some(url) = &self.server.public_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(DashboardError::Config(format!(
                    "server.public_url must start with http:// or https://, got '{url}'"
                )));
            }
        }

        if self.identity.access_cookie.is_empty() {
            return Err(DashboardError::Config(
                "identity.access_cookie cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
