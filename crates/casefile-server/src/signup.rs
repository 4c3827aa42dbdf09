//! Account registration and the `/auth` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/auth/signup` | Body: [`Registration`]; unauthenticated; 201 |
//! | `GET`  | `/auth/me` | The requester's profile |
//!
//! Registration creates the account and then provisions its profile from
//! the signup metadata. The two steps are separate store calls.

use axum::{
  Extension, Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use casefile_api::ApiError;
use casefile_core::{
  Failure as _, FailureKind, Requester,
  account::{NewAccount, Profile, Registration},
  store::RecordStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, auth::hash_password, error::Error};

/// Returned by a successful signup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedUp {
  pub account_id: Uuid,
  pub email:      String,
  pub profile:    Profile,
}

/// Create an account for `registration` and provision its profile.
pub async fn register<S: RecordStore>(
  store: &S,
  registration: Registration,
) -> Result<SignedUp, Error> {
  let registration = registration.prepare().map_err(ApiError::Invalid)?;
  let password_hash = hash_password(&registration.password)?;

  let account = store
    .create_account(NewAccount {
      email: registration.email.clone(),
      password_hash,
    })
    .await
    .map_err(|e| {
      if matches!(e.kind(), FailureKind::Rejected) {
        Error::EmailTaken
      } else {
        ApiError::store(e).into()
      }
    })?;

  let who = Requester::new(account.id);
  let profile = store
    .provision_profile(who, registration.profile())
    .await
    .map_err(|e| {
      tracing::error!(account_id = %account.id, error = %e, "profile provisioning failed");
      ApiError::store(e)
    })?;

  tracing::info!(account_id = %account.id, "account registered");
  Ok(SignedUp {
    account_id: account.id,
    email: account.email,
    profile,
  })
}

/// `POST /auth/signup`
pub async fn handler<S: RecordStore + 'static>(
  State(state): State<AppState<S>>,
  Json(registration): Json<Registration>,
) -> Result<impl IntoResponse, Error> {
  let signed_up = register(state.store.as_ref(), registration).await?;
  Ok((StatusCode::CREATED, Json(signed_up)))
}

/// `GET /auth/me`
pub async fn me<S: RecordStore + 'static>(
  State(state): State<AppState<S>>,
  Extension(who): Extension<Requester>,
) -> Result<Json<Profile>, Error> {
  let profile = state
    .store
    .get_profile(who, who.account_id())
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound("profile not found".to_owned()))?;
  Ok(Json(profile))
}
