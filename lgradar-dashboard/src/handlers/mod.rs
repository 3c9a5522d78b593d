//! HTTP handlers
//!
//! - [`auth`]: home redirect, login, signup and logout
//! - [`pages`]: the protected dashboard views
//! - [`contact`]: the public contact form

pub mod auth;
pub mod contact;
pub mod pages;

use axum::Json;
use serde_json::{json, Value};

/// Liveness check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
