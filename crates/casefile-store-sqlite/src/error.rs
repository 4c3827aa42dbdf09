//! Error type for `casefile-store-sqlite`.

use casefile_core::{
  Failure, FailureKind, policy::Denied, validate::ValidationErrors,
};
use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] casefile_core::Error),

  /// A CHECK, FOREIGN KEY, UNIQUE or NOT NULL constraint refused the write.
  #[error("constraint violation: {0}")]
  Constraint(String),

  #[error("store unavailable: {0}")]
  Unavailable(String),

  #[error("database error: {0}")]
  Database(tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("encoding error: {0}")]
  Encoding(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<tokio_rusqlite::Error> for Error {
  fn from(e: tokio_rusqlite::Error) -> Self {
    let code = match &e {
      tokio_rusqlite::Error::ConnectionClosed => {
        return Self::Unavailable(e.to_string());
      }
      tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(
        failure,
        message,
      )) => Some((failure.code, message.clone())),
      _ => None,
    };

    match code {
      Some((ErrorCode::ConstraintViolation, message)) => {
        Self::Constraint(message.unwrap_or_else(|| e.to_string()))
      }
      Some((
        ErrorCode::DatabaseBusy
        | ErrorCode::DatabaseLocked
        | ErrorCode::CannotOpen,
        _,
      )) => Self::Unavailable(e.to_string()),
      _ => Self::Database(e),
    }
  }
}

impl From<Denied> for Error {
  fn from(denied: Denied) -> Self { Self::Core(denied.into()) }
}

impl From<ValidationErrors> for Error {
  fn from(errors: ValidationErrors) -> Self { Self::Core(errors.into()) }
}

impl Failure for Error {
  fn kind(&self) -> FailureKind<'_> {
    match self {
      Self::Core(e) => e.kind(),
      Self::Constraint(_) => FailureKind::Rejected,
      Self::Unavailable(_) => FailureKind::Unavailable,
      Self::Database(_)
      | Self::Json(_)
      | Self::Uuid(_)
      | Self::DateParse(_)
      | Self::Encoding(_) => {
        FailureKind::Internal
      }
    }
  }
}
