//! Suspects and persons of interest attached to a case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  case::{Case, CaseSummary},
  policy::Entity,
  record::{Child, Domain, Draft, HasStatus, Record, trim_in_place},
  validate::{ValidationErrors, normalize_optional},
};

pub const MAX_AGE: i32 = 150;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SuspectStatus {
  #[default]
  Suspect,
  PersonOfInterest,
  Cleared,
  Arrested,
}

impl Domain for SuspectStatus {
  const ALL: &'static [Self] = &[
    Self::Suspect,
    Self::PersonOfInterest,
    Self::Cleared,
    Self::Arrested,
  ];

  fn as_str(self) -> &'static str {
    match self {
      Self::Suspect => "suspect",
      Self::PersonOfInterest => "person_of_interest",
      Self::Cleared => "cleared",
      Self::Arrested => "arrested",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suspect {
  pub id:          Uuid,
  pub case_id:     Uuid,
  pub name:        String,
  pub age:         Option<i32>,
  pub gender:      Option<String>,
  pub address:     Option<String>,
  pub phone:       Option<String>,
  pub description: Option<String>,
  pub status:      SuspectStatus,
  pub user_id:     Uuid,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuspectDraft {
  pub case_id:     Uuid,
  pub name:        String,
  pub age:         Option<i32>,
  pub gender:      Option<String>,
  pub address:     Option<String>,
  pub phone:       Option<String>,
  pub description: Option<String>,
  #[serde(default)]
  pub status:      SuspectStatus,
}

impl SuspectDraft {
  pub fn new(case_id: Uuid, name: impl Into<String>) -> Self {
    Self {
      case_id,
      name: name.into(),
      age: None,
      gender: None,
      address: None,
      phone: None,
      description: None,
      status: SuspectStatus::default(),
    }
  }
}

impl Record for Suspect {
  const ENTITY: Entity = Entity::Suspect;
  const TABLE: &'static str = "suspects";

  type Draft = SuspectDraft;

  fn id(&self) -> Uuid { self.id }

  fn owner(&self) -> Uuid { self.user_id }
}

impl Child for Suspect {
  type Parent = Case;
  const PARENT_COLUMN: &'static str = "case_id";
}

impl HasStatus for Suspect {
  type Status = SuspectStatus;
}

impl Draft for SuspectDraft {
  fn normalize(&mut self) {
    trim_in_place(&mut self.name);
    normalize_optional(&mut self.gender);
    normalize_optional(&mut self.address);
    normalize_optional(&mut self.phone);
    normalize_optional(&mut self.description);
  }

  fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.require("name", &self.name);
    if let Some(age) = self.age
      && !(0..=MAX_AGE).contains(&age)
    {
      errors.add("age", format!("must be between 0 and {MAX_AGE}"));
    }
    errors.finish()
  }
}

/// A suspect with the case it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuspectWithCase {
  #[serde(flatten)]
  pub suspect: Suspect,
  pub case:    CaseSummary,
}
