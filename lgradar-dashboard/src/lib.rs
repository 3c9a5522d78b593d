//! LG Radar dashboard
//!
//! Server-rendered dashboard for government gazette monitoring. Protected
//! pages sit behind a page gate that resolves the viewer on every request:
//!
//! - a `?demo=true` query yields the fixed demo identity without contacting
//!   the identity provider
//! - otherwise the access token cookie is checked with Supabase
//! - anything else, including provider failures, is anonymous and redirected
//!   to the login page

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod auth;
pub mod config;
pub mod data;
pub mod error;
pub mod extractors;
pub mod forms;
pub mod handlers;
pub mod htmx;
pub mod logging;
pub mod middleware;
pub mod testing;
pub mod views;

pub use app::{build_router, AppState};
pub use config::DashboardConfig;
pub use error::{DashboardError, ProviderError};
