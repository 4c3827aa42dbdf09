//! Cases: the root of the ownership chain.
//!
//! Deleting a case removes its evidence and suspects, and through the
//! evidence, every lab report filed against it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  policy::Entity,
  record::{Domain, Draft, HasStatus, Record, trim_in_place},
  validate::{ValidationErrors, normalize_optional},
};

// ─── Domains ─────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
  #[default]
  Open,
  Closed,
  Pending,
  UnderInvestigation,
}

impl Domain for CaseStatus {
  const ALL: &'static [Self] = &[
    Self::Open,
    Self::Closed,
    Self::Pending,
    Self::UnderInvestigation,
  ];

  fn as_str(self) -> &'static str {
    match self {
      Self::Open => "open",
      Self::Closed => "closed",
      Self::Pending => "pending",
      Self::UnderInvestigation => "under_investigation",
    }
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CasePriority {
  Low,
  #[default]
  Medium,
  High,
  Critical,
}

impl Domain for CasePriority {
  const ALL: &'static [Self] =
    &[Self::Low, Self::Medium, Self::High, Self::Critical];

  fn as_str(self) -> &'static str {
    match self {
      Self::Low => "low",
      Self::Medium => "medium",
      Self::High => "high",
      Self::Critical => "critical",
    }
  }
}

// ─── Case ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
  pub id:              Uuid,
  pub case_number:     String,
  pub title:           String,
  pub description:     Option<String>,
  pub status:          CaseStatus,
  pub priority:        CasePriority,
  pub date_opened:     NaiveDate,
  pub date_closed:     Option<NaiveDate>,
  pub location:        Option<String>,
  pub lead_officer_id: Option<Uuid>,
  pub user_id:         Uuid,
  pub created_at:      DateTime<Utc>,
  pub updated_at:      DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseDraft {
  pub case_number:     String,
  pub title:           String,
  pub description:     Option<String>,
  #[serde(default)]
  pub status:          CaseStatus,
  #[serde(default)]
  pub priority:        CasePriority,
  /// Defaults to the current date when unset.
  pub date_opened:     Option<NaiveDate>,
  pub date_closed:     Option<NaiveDate>,
  pub location:        Option<String>,
  pub lead_officer_id: Option<Uuid>,
}

impl CaseDraft {
  pub fn new(case_number: impl Into<String>, title: impl Into<String>) -> Self {
    Self {
      case_number: case_number.into(),
      title: title.into(),
      ..Default::default()
    }
  }

  fn check(&self, date_opened: Option<NaiveDate>) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.require("case_number", &self.case_number);
    errors.require("title", &self.title);
    errors.ordered_dates("date_closed", date_opened, self.date_closed);
    errors.finish()
  }
}

impl Record for Case {
  const ENTITY: Entity = Entity::Case;
  const TABLE: &'static str = "cases";
  const DEFAULTED: &'static [&'static str] = &["date_opened"];

  type Draft = CaseDraft;

  fn id(&self) -> Uuid { self.id }

  fn owner(&self) -> Uuid { self.user_id }
}

impl HasStatus for Case {
  type Status = CaseStatus;
}

impl Draft for CaseDraft {
  fn normalize(&mut self) {
    trim_in_place(&mut self.case_number);
    trim_in_place(&mut self.title);
    normalize_optional(&mut self.description);
    normalize_optional(&mut self.location);
  }

  fn validate(&self) -> Result<(), ValidationErrors> {
    self.check(self.date_opened)
  }

  fn validate_new(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
    self.check(self.date_opened.or(Some(today)))
  }
}

/// The parent-case columns shown next to evidence and suspects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSummary {
  pub id:          Uuid,
  pub case_number: String,
  pub title:       String,
}
