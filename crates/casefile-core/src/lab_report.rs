//! Laboratory analysis reports filed against an evidence item.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  evidence::{Evidence, EvidenceSummary},
  policy::Entity,
  record::{Child, Domain, Draft, HasStatus, Record, trim_in_place},
  validate::{ValidationErrors, normalize_optional},
};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum LabReportStatus {
  #[default]
  Pending,
  InProgress,
  Completed,
  Inconclusive,
}

impl Domain for LabReportStatus {
  const ALL: &'static [Self] = &[
    Self::Pending,
    Self::InProgress,
    Self::Completed,
    Self::Inconclusive,
  ];

  fn as_str(self) -> &'static str {
    match self {
      Self::Pending => "pending",
      Self::InProgress => "in_progress",
      Self::Completed => "completed",
      Self::Inconclusive => "inconclusive",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabReport {
  pub id:              Uuid,
  pub evidence_id:     Uuid,
  pub report_number:   String,
  pub analysis_type:   String,
  pub analysis_result: Option<String>,
  pub technician_name: Option<String>,
  pub lab_name:        Option<String>,
  pub date_submitted:  NaiveDate,
  pub date_completed:  Option<NaiveDate>,
  pub status:          LabReportStatus,
  pub notes:           Option<String>,
  pub user_id:         Uuid,
  pub created_at:      DateTime<Utc>,
  pub updated_at:      DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabReportDraft {
  pub evidence_id:     Uuid,
  pub report_number:   String,
  pub analysis_type:   String,
  pub analysis_result: Option<String>,
  pub technician_name: Option<String>,
  pub lab_name:        Option<String>,
  /// Defaults to the current date when unset.
  pub date_submitted:  Option<NaiveDate>,
  pub date_completed:  Option<NaiveDate>,
  #[serde(default)]
  pub status:          LabReportStatus,
  pub notes:           Option<String>,
}

impl LabReportDraft {
  pub fn new(
    evidence_id: Uuid,
    report_number: impl Into<String>,
    analysis_type: impl Into<String>,
  ) -> Self {
    Self {
      evidence_id,
      report_number: report_number.into(),
      analysis_type: analysis_type.into(),
      analysis_result: None,
      technician_name: None,
      lab_name: None,
      date_submitted: None,
      date_completed: None,
      status: LabReportStatus::default(),
      notes: None,
    }
  }

  fn check(
    &self,
    date_submitted: Option<NaiveDate>,
  ) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    errors.require("report_number", &self.report_number);
    errors.require("analysis_type", &self.analysis_type);
    errors.ordered_dates("date_completed", date_submitted, self.date_completed);
    errors.finish()
  }
}

impl Record for LabReport {
  const ENTITY: Entity = Entity::LabReport;
  const TABLE: &'static str = "lab_reports";
  const DEFAULTED: &'static [&'static str] = &["date_submitted"];

  type Draft = LabReportDraft;

  fn id(&self) -> Uuid { self.id }

  fn owner(&self) -> Uuid { self.user_id }
}

impl Child for LabReport {
  type Parent = Evidence;
  const PARENT_COLUMN: &'static str = "evidence_id";
}

impl HasStatus for LabReport {
  type Status = LabReportStatus;
}

impl Draft for LabReportDraft {
  fn normalize(&mut self) {
    trim_in_place(&mut self.report_number);
    trim_in_place(&mut self.analysis_type);
    normalize_optional(&mut self.analysis_result);
    normalize_optional(&mut self.technician_name);
    normalize_optional(&mut self.lab_name);
    normalize_optional(&mut self.notes);
  }

  fn validate(&self) -> Result<(), ValidationErrors> {
    self.check(self.date_submitted)
  }

  fn validate_new(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
    self.check(self.date_submitted.or(Some(today)))
  }
}

/// A lab report with the evidence item it analyses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabReportWithEvidence {
  #[serde(flatten)]
  pub lab_report: LabReport,
  pub evidence:   EvidenceSummary,
}
