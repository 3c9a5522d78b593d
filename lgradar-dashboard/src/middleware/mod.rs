//! Middleware layers
//!
//! Provides the page gate that protects every `/dashboard` route.

pub mod auth;

pub use auth::{GateRejection, GateResult, PageGate};
