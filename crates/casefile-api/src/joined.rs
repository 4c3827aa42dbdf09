//! Read-only listings that embed a summary of each row's parent.

use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use casefile_core::{
  Requester,
  evidence::EvidenceWithCase,
  lab_report::LabReportWithEvidence,
  store::RecordStore,
  suspect::SuspectWithCase,
};

use crate::error::ApiError;

/// `GET /evidence/with-case`
pub async fn evidence_with_case<S: RecordStore>(
  State(store): State<Arc<S>>,
  Extension(who): Extension<Requester>,
) -> Result<Json<Vec<EvidenceWithCase>>, ApiError> {
  let rows = store
    .evidence_with_case(who)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(rows))
}

/// `GET /suspects/with-case`
pub async fn suspects_with_case<S: RecordStore>(
  State(store): State<Arc<S>>,
  Extension(who): Extension<Requester>,
) -> Result<Json<Vec<SuspectWithCase>>, ApiError> {
  let rows = store
    .suspects_with_case(who)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(rows))
}

/// `GET /lab-reports/with-evidence`
pub async fn lab_reports_with_evidence<S: RecordStore>(
  State(store): State<Arc<S>>,
  Extension(who): Extension<Requester>,
) -> Result<Json<Vec<LabReportWithEvidence>>, ApiError> {
  let rows = store
    .lab_reports_with_evidence(who)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(rows))
}
