//! HTTP server for Casefile.
//!
//! Wraps the JSON API from `casefile-api` with Basic authentication against
//! stored accounts, adds the public signup and health endpoints, and carries
//! the runtime configuration.

pub mod auth;
pub mod error;
pub mod signup;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Json, Router, middleware,
  routing::{get, post},
};
use casefile_core::store::RecordStore;
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `CASEFILE_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       8080,
      store_path: PathBuf::from("casefile.db"),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through the server's own handlers.
pub struct AppState<S> {
  pub store: Arc<S>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone() }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: RecordStore + 'static,
{
  let authenticated = Router::new()
    .route("/auth/me", get(signup::me::<S>))
    .with_state(state.clone())
    .nest("/api", casefile_api::api_router(state.store.clone()))
    .layer(middleware::from_fn_with_state(
      state.clone(),
      auth::require_auth::<S>,
    ));

  Router::new()
    .route("/health", get(health))
    .route("/auth/signup", post(signup::handler::<S>))
    .with_state(state)
    .merge(authenticated)
    .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> { Json(json!({ "status": "ok" })) }

// ─── Integration tests ────────────────────────────────────────────────────────
