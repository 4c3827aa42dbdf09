//! The traits every stored record implements.
//!
//! A record is one row of an operational table. Callers never construct one
//! directly: they submit a [`Draft`], and the store assigns the id, the owner
//! and the timestamps.

use chrono::NaiveDate;
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{policy::Entity, validate::ValidationErrors};

/// Column holding the owning account on every operational table.
pub const OWNER_COLUMN: &str = "user_id";

/// One row of an operational table.
///
/// Records serialise to a flat JSON object whose keys are the column names of
/// [`Record::TABLE`].
pub trait Record:
  Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
  const ENTITY: Entity;
  const TABLE: &'static str;
  /// Columns with a store-side default. Left out of the insert when the draft
  /// leaves them unset, and left unchanged by an update in that case.
  const DEFAULTED: &'static [&'static str] = &[];

  type Draft: Draft;

  fn id(&self) -> Uuid;
  fn owner(&self) -> Uuid;
}

/// The caller-editable subset of a record, as submitted on create and update.
pub trait Draft:
  Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
  /// Trim text fields in place.
  fn normalize(&mut self) {}

  fn validate(&self) -> Result<(), ValidationErrors>;

  /// Validate a draft about to become a new row, where unset dates with a
  /// store-side default take the value `today`.
  fn validate_new(&self, _today: NaiveDate) -> Result<(), ValidationErrors> {
    self.validate()
  }

  /// Normalise, then validate.
  fn prepare(mut self) -> Result<Self, ValidationErrors> {
    self.normalize();
    self.validate()?;
    Ok(self)
  }

  /// Normalise, then validate for an insert.
  fn prepare_new(mut self, today: NaiveDate) -> Result<Self, ValidationErrors> {
    self.normalize();
    self.validate_new(today)?;
    Ok(self)
  }
}

/// A record that belongs to a parent record and is deleted with it.
pub trait Child: Record {
  type Parent: Record;
  /// Foreign-key column referencing the parent's id.
  const PARENT_COLUMN: &'static str;
}

/// An enumerated column value, stored as its snake_case name and guarded by
/// a CHECK constraint.
pub trait Domain: Copy + Send + Sync + 'static {
  const ALL: &'static [Self];

  fn as_str(self) -> &'static str;
}

/// A record with a `status` column.
pub trait HasStatus: Record {
  type Status: Domain;
}

/// Trim a required text field in place.
pub(crate) fn trim_in_place(value: &mut String) {
  let trimmed = value.trim();
  if trimmed.len() != value.len() {
    *value = trimmed.to_owned();
  }
}
