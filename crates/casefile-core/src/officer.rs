//! Officers, who may be assigned as the lead on a case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  policy::Entity,
  record::{Draft, Record, trim_in_place},
  validate::{ValidationErrors, normalize_optional},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Officer {
  pub id:           Uuid,
  pub name:         String,
  pub rank:         String,
  /// Unique in practice; not enforced.
  pub badge_number: Option<String>,
  pub email:        Option<String>,
  pub phone:        Option<String>,
  pub user_id:      Uuid,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfficerDraft {
  pub name:         String,
  pub rank:         String,
  pub badge_number: Option<String>,
  pub email:        Option<String>,
  pub phone:        Option<String>,
}

impl Record for Officer {
  const ENTITY: Entity = Entity::Officer;
  const TABLE: &'static str = "officers";

  type Draft = OfficerDraft;

  fn id(&self) -> Uuid { self.id }

  fn owner(&self) -> Uuid { self.user_id }
}

impl Draft for OfficerDraft {
  fn normalize(&mut self) {
    trim_in_place(&mut self.name);
    trim_in_place(&mut self.rank);
    normalize_optional(&mut self.badge_number);
    normalize_optional(&mut self.email);
    normalize_optional(&mut self.phone);
  }

  fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.require("name", &self.name);
    errors.require("rank", &self.rank);
    if let Some(email) = &self.email
      && !email.contains('@')
    {
      errors.add("email", "must be an email address");
    }
    errors.finish()
  }
}
