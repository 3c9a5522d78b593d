//! Authentication and session resolution
//!
//! Every request re-resolves its viewer from scratch:
//!
//! 1. `?demo=true` yields the fixed demo identity without touching the provider.
//! 2. Otherwise the access-token cookie is handed to the [`IdentityProvider`].
//! 3. Provider failures are logged and treated exactly like "not signed in".

pub mod demo;
pub mod oauth;
pub mod provider;
pub mod resolver;
pub mod session;
pub mod supabase;

pub use demo::{DemoFlag, DEMO_QUERY_PARAM};
pub use oauth::{OAuthProvider, PkceVerifier};
pub use provider::{provider_from_config, IdentityProvider, UnconfiguredProvider};
pub use resolver::{Resolution, SessionResolver, Viewer};
pub use session::{AccessToken, PasswordCredentials, Session};
pub use supabase::SupabaseProvider;
