//! Error types and axum `IntoResponse` implementation.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use casefile_api::ApiError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthorized")]
  Unauthorized,
  #[error("email already registered")]
  EmailTaken,
  #[error("password hashing failed: {0}")]
  Hash(String),
  #[error(transparent)]
  Api(#[from] ApiError),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::Unauthorized => {
        let mut res = (
          StatusCode::UNAUTHORIZED,
          Json(json!({ "error": "unauthorized" })),
        )
          .into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Basic realm=\"casefile\""),
        );
        res
      }
      Error::EmailTaken => (
        StatusCode::CONFLICT,
        Json(json!({ "error": "email already registered" })),
      )
        .into_response(),
      Error::Hash(msg) => {
        tracing::error!(error = %msg, "password hashing failed");
        ApiError::Internal.into_response()
      }
      Error::Api(e) => e.into_response(),
    }
  }
}
