//! Error types for `casefile-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::{
  policy::{Denied, Entity},
  validate::ValidationErrors,
};

#[derive(Debug, Error)]
pub enum Error {
  #[error("validation failed: {0}")]
  Invalid(ValidationErrors),

  #[error(transparent)]
  Denied(#[from] Denied),

  #[error("{entity} not found: {id}")]
  NotFound { entity: Entity, id: Uuid },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl From<ValidationErrors> for Error {
  fn from(errors: ValidationErrors) -> Self { Self::Invalid(errors) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

// ─── Classification ──────────────────────────────────────────────────────────

/// The caller-facing category of a failure.
///
/// Backends keep their own error enums; the request layer only needs to know
/// which of these buckets a failure falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind<'a> {
  /// Rejected before touching the store; carries the per-field messages.
  Invalid(&'a ValidationErrors),
  NotFound { entity: Entity, id: Uuid },
  /// The access policy refused the operation.
  Forbidden,
  /// The store refused the write (check constraint, foreign key, unique).
  Rejected,
  /// The store could not be reached or is busy. Safe to retry manually.
  Unavailable,
  Internal,
}

/// Implemented by every store error type so handlers can map it to a
/// response without knowing the backend.
pub trait Failure: std::error::Error + Send + Sync + 'static {
  fn kind(&self) -> FailureKind<'_>;
}

impl Failure for Error {
  fn kind(&self) -> FailureKind<'_> {
    match self {
      Self::Invalid(errors) => FailureKind::Invalid(errors),
      Self::Denied(_) => FailureKind::Forbidden,
      Self::NotFound { entity, id } => FailureKind::NotFound {
        entity: *entity,
        id:     *id,
      },
      Self::Serialization(_) => FailureKind::Internal,
    }
  }
}
