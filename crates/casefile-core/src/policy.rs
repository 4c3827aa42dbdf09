//! Row-level access policy.
//!
//! Every data-access call is preceded by [`authorize`], keyed on the entity,
//! the operation, the requesting account and the account that owns the row.
//! Reads of the operational tables are open to the whole workspace; writes
//! are restricted to the owner. Profiles are private to their account.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// The tables guarded by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
  Profile,
  Officer,
  Case,
  Suspect,
  Evidence,
  LabReport,
}

impl Entity {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Profile => "profile",
      Self::Officer => "officer",
      Self::Case => "case",
      Self::Suspect => "suspect",
      Self::Evidence => "evidence",
      Self::LabReport => "lab_report",
    }
  }
}

impl fmt::Display for Entity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
  Read,
  Insert,
  Update,
  Delete,
}

impl fmt::Display for Operation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Read => "read",
      Self::Insert => "insert",
      Self::Update => "update",
      Self::Delete => "delete",
    })
  }
}

/// The authenticated account on whose behalf a call is made.
///
/// Only the server's authentication layer constructs one from verified
/// credentials; everything below it takes the identity as given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Requester(Uuid);

impl Requester {
  pub fn new(account_id: Uuid) -> Self { Self(account_id) }

  pub fn account_id(self) -> Uuid { self.0 }
}

/// A refused operation. Deliberately carries no detail about the row so the
/// caller only learns that it was not authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("not authorized to {operation} {entity}")]
pub struct Denied {
  pub entity:    Entity,
  pub operation: Operation,
}

/// Which rows of a table a requester may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
  /// Every row in the shared workspace.
  Workspace,
  /// Only rows owned by this account.
  Owner(Uuid),
}

/// Scope applied to list and count reads.
pub fn visibility(entity: Entity, who: Requester) -> Visibility {
  match entity {
    Entity::Profile => Visibility::Owner(who.account_id()),
    _ => Visibility::Workspace,
  }
}

/// Decide whether `who` may perform `operation` on a row owned by `owner`.
///
/// For inserts `owner` is the owner stamped on the new row.
pub fn authorize(
  entity: Entity,
  operation: Operation,
  who: Requester,
  owner: Uuid,
) -> Result<(), Denied> {
  let is_owner = who.account_id() == owner;
  let allowed = match (entity, operation) {
    (Entity::Profile, Operation::Delete) => false,
    (Entity::Profile, _) => is_owner,
    (_, Operation::Read) => true,
    (_, Operation::Insert | Operation::Update | Operation::Delete) => is_owner,
  };

  if allowed { Ok(()) } else { Err(Denied { entity, operation }) }
}
