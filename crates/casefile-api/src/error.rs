//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Store failures are classified through [`Failure::kind`]. Policy and
//! constraint failures are reported with a fixed message; the underlying
//! detail only goes to the log.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use casefile_core::{Failure, FailureKind, validate::ValidationErrors};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("validation failed: {0}")]
  Invalid(ValidationErrors),

  #[error("not authorized")]
  Forbidden,

  #[error("request rejected by the store")]
  Rejected,

  #[error("store unavailable")]
  Unavailable,

  #[error("internal error")]
  Internal,
}

impl ApiError {
  /// Classify a store failure, logging what the response will not carry.
  pub fn store<E: Failure>(e: E) -> Self {
    match e.kind() {
      FailureKind::Invalid(fields) => Self::Invalid(fields.clone()),
      FailureKind::NotFound { entity, id } => {
        Self::NotFound(format!("{entity} {id} not found"))
      }
      FailureKind::Forbidden => {
        tracing::info!(error = %e, "request denied by policy");
        Self::Forbidden
      }
      FailureKind::Rejected => {
        tracing::warn!(error = %e, "store rejected write");
        Self::Rejected
      }
      FailureKind::Unavailable => {
        tracing::error!(error = %e, "store unavailable");
        Self::Unavailable
      }
      FailureKind::Internal => {
        tracing::error!(error = %e, "store error");
        Self::Internal
      }
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::Forbidden => StatusCode::FORBIDDEN,
      ApiError::Rejected => StatusCode::CONFLICT,
      ApiError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
      ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let body = match &self {
      ApiError::NotFound(m) => json!({ "error": m }),
      ApiError::Invalid(fields) => {
        json!({ "error": "validation failed", "fields": fields })
      }
      other => json!({ "error": other.to_string() }),
    };
    (status, Json(body)).into_response()
  }
}
