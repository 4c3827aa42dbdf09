//! HTTP Basic authentication against the stored accounts.
//!
//! The username is the account email. A verified request carries its
//! [`Requester`] as a request extension for the API handlers.

use argon2::{
  Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
  password_hash::SaltString,
};
use axum::{
  extract::{Request, State},
  http::{HeaderMap, header},
  middleware::Next,
  response::Response,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use casefile_api::ApiError;
use casefile_core::{Requester, store::RecordStore};
use rand_core::OsRng;

use crate::{AppState, error::Error};

/// Credentials as presented in an `Authorization: Basic` header.
#[derive(Debug, PartialEq, Eq)]
pub struct Credentials {
  pub email:    String,
  pub password: String,
}

/// Decode the `Authorization` header. The email is normalised the same way
/// signup normalises it.
pub fn credentials(headers: &HeaderMap) -> Result<Credentials, Error> {
  let header_val = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(Error::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(Error::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| Error::Unauthorized)?;
  let creds   = std::str::from_utf8(&decoded).map_err(|_| Error::Unauthorized)?;

  let (email, password) = creds.split_once(':').ok_or(Error::Unauthorized)?;

  Ok(Credentials {
    email:    email.trim().to_lowercase(),
    password: password.to_owned(),
  })
}

/// Resolve `creds` to the account they belong to.
pub async fn verify<S: RecordStore>(
  store: &S,
  creds: Credentials,
) -> Result<Requester, Error> {
  let account = store
    .find_account_by_email(creds.email)
    .await
    .map_err(ApiError::store)?
    .ok_or(Error::Unauthorized)?;

  let parsed_hash = PasswordHash::new(&account.password_hash)
    .map_err(|_| Error::Unauthorized)?;

  Argon2::default()
    .verify_password(creds.password.as_bytes(), &parsed_hash)
    .map_err(|_| Error::Unauthorized)?;

  Ok(Requester::new(account.id))
}

/// Middleware: reject unauthenticated requests with 401, otherwise attach
/// the [`Requester`].
pub async fn require_auth<S: RecordStore + 'static>(
  State(state): State<AppState<S>>,
  mut req: Request,
  next: Next,
) -> Result<Response, Error> {
  let creds = credentials(req.headers())?;
  let who = verify(state.store.as_ref(), creds).await?;
  tracing::debug!(account_id = %who.account_id(), "authenticated");
  req.extensions_mut().insert(who);
  Ok(next.run(req).await)
}

/// Produce an argon2 PHC string for `password` with a fresh salt.
pub fn hash_password(password: &str) -> Result<String, Error> {
  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|e| Error::Hash(e.to_string()))
}
