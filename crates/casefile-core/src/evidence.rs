//! Evidence items collected for a case.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  case::{Case, CaseSummary},
  policy::Entity,
  record::{Child, Domain, Draft, HasStatus, Record, trim_in_place},
  validate::{ValidationErrors, normalize_optional},
};

// ─── Domains ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceType {
  Physical,
  Digital,
  Documentary,
  Testimonial,
  Biological,
  Trace,
}

impl Domain for EvidenceType {
  const ALL: &'static [Self] = &[
    Self::Physical,
    Self::Digital,
    Self::Documentary,
    Self::Testimonial,
    Self::Biological,
    Self::Trace,
  ];

  fn as_str(self) -> &'static str {
    match self {
      Self::Physical => "physical",
      Self::Digital => "digital",
      Self::Documentary => "documentary",
      Self::Testimonial => "testimonial",
      Self::Biological => "biological",
      Self::Trace => "trace",
    }
  }
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceStatus {
  #[default]
  InStorage,
  InLab,
  Released,
  Disposed,
}

impl Domain for EvidenceStatus {
  const ALL: &'static [Self] =
    &[Self::InStorage, Self::InLab, Self::Released, Self::Disposed];

  fn as_str(self) -> &'static str {
    match self {
      Self::InStorage => "in_storage",
      Self::InLab => "in_lab",
      Self::Released => "released",
      Self::Disposed => "disposed",
    }
  }
}

// ─── Evidence ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
  pub id:               Uuid,
  pub case_id:          Uuid,
  pub evidence_number:  String,
  pub description:      String,
  pub evidence_type:    EvidenceType,
  pub location_found:   Option<String>,
  pub date_collected:   Option<NaiveDate>,
  pub collected_by:     Option<String>,
  /// Free-text handling history; not modelled further.
  pub chain_of_custody: Option<String>,
  pub storage_location: Option<String>,
  pub status:           EvidenceStatus,
  pub user_id:          Uuid,
  pub created_at:       DateTime<Utc>,
  pub updated_at:       DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceDraft {
  pub case_id:          Uuid,
  pub evidence_number:  String,
  pub description:      String,
  pub evidence_type:    EvidenceType,
  pub location_found:   Option<String>,
  pub date_collected:   Option<NaiveDate>,
  pub collected_by:     Option<String>,
  pub chain_of_custody: Option<String>,
  pub storage_location: Option<String>,
  #[serde(default)]
  pub status:           EvidenceStatus,
}

impl EvidenceDraft {
  pub fn new(
    case_id: Uuid,
    evidence_number: impl Into<String>,
    description: impl Into<String>,
    evidence_type: EvidenceType,
  ) -> Self {
    Self {
      case_id,
      evidence_number: evidence_number.into(),
      description: description.into(),
      evidence_type,
      location_found: None,
      date_collected: None,
      collected_by: None,
      chain_of_custody: None,
      storage_location: None,
      status: EvidenceStatus::default(),
    }
  }
}

impl Record for Evidence {
  const ENTITY: Entity = Entity::Evidence;
  const TABLE: &'static str = "evidence";

  type Draft = EvidenceDraft;

  fn id(&self) -> Uuid { self.id }

  fn owner(&self) -> Uuid { self.user_id }
}

impl Child for Evidence {
  type Parent = Case;
  const PARENT_COLUMN: &'static str = "case_id";
}

impl HasStatus for Evidence {
  type Status = EvidenceStatus;
}

impl Draft for EvidenceDraft {
  fn normalize(&mut self) {
    trim_in_place(&mut self.evidence_number);
    trim_in_place(&mut self.description);
    normalize_optional(&mut self.location_found);
    normalize_optional(&mut self.collected_by);
    normalize_optional(&mut self.chain_of_custody);
    normalize_optional(&mut self.storage_location);
  }

  fn validate(&self) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.require("evidence_number", &self.evidence_number);
    errors.require("description", &self.description);
    errors.finish()
  }
}

/// The parent-evidence columns shown next to lab reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSummary {
  pub id:              Uuid,
  pub evidence_number: String,
  pub description:     String,
}

/// An evidence item with the case it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceWithCase {
  #[serde(flatten)]
  pub evidence: Evidence,
  pub case:     CaseSummary,
}
