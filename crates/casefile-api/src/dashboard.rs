//! `GET /dashboard`: aggregate counts over the shared workspace.

use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use casefile_core::{
  Requester,
  case::{Case, CaseStatus},
  evidence::Evidence,
  lab_report::{LabReport, LabReportStatus},
  officer::Officer,
  store::{RecordStore, StatusFilter},
  suspect::Suspect,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
  pub total_cases:         u64,
  /// Cases in any status other than `closed`.
  pub open_cases:          u64,
  pub total_evidence:      u64,
  pub total_suspects:      u64,
  pub total_officers:      u64,
  pub total_lab_reports:   u64,
  pub pending_lab_reports: u64,
}

impl DashboardSummary {
  pub async fn collect<S: RecordStore>(
    store: &S,
    who: Requester,
  ) -> Result<Self, S::Error> {
    Ok(Self {
      total_cases:         store.count::<Case>(who).await?,
      open_cases:          store
        .count_by_status::<Case>(who, StatusFilter::IsNot(CaseStatus::Closed))
        .await?,
      total_evidence:      store.count::<Evidence>(who).await?,
      total_suspects:      store.count::<Suspect>(who).await?,
      total_officers:      store.count::<Officer>(who).await?,
      total_lab_reports:   store.count::<LabReport>(who).await?,
      pending_lab_reports: store
        .count_by_status::<LabReport>(
          who,
          StatusFilter::Is(LabReportStatus::Pending),
        )
        .await?,
    })
  }
}

/// `GET /dashboard`
pub async fn summary<S: RecordStore>(
  State(store): State<Arc<S>>,
  Extension(who): Extension<Requester>,
) -> Result<Json<DashboardSummary>, ApiError> {
  let summary = DashboardSummary::collect(store.as_ref(), who)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(summary))
}
