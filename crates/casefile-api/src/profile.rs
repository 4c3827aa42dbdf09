//! Handlers for the requester's own profile.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/profile` | 404 if never provisioned |
//! | `PUT`  | `/profile` | Body: `{"full_name":"…","role":"…"}`; `role` optional |

use std::sync::Arc;

use axum::{Extension, Json, extract::State};
use casefile_core::{
  Requester,
  account::{Profile, ProfileDraft},
  store::RecordStore,
};

use crate::error::ApiError;

/// `GET /profile`
pub async fn get_own<S: RecordStore>(
  State(store): State<Arc<S>>,
  Extension(who): Extension<Requester>,
) -> Result<Json<Profile>, ApiError> {
  let profile = store
    .get_profile(who, who.account_id())
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("profile not found".to_owned()))?;
  Ok(Json(profile))
}

/// `PUT /profile`
pub async fn update_own<S: RecordStore>(
  State(store): State<Arc<S>>,
  Extension(who): Extension<Requester>,
  Json(draft): Json<ProfileDraft>,
) -> Result<Json<Profile>, ApiError> {
  let profile = store
    .update_profile(who, who.account_id(), draft)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(profile))
}
