//! Accounts, their credentials and their profiles.
//!
//! An account is created at signup. Its profile is provisioned as the next,
//! explicit step of the same workflow and shares the account's id, so an
//! account can never end up with two profiles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  record::trim_in_place,
  validate::{ValidationErrors, normalize_optional},
};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const DEFAULT_ROLE: &str = "investigator";

// ─── Accounts ────────────────────────────────────────────────────────────────

/// Stored credentials. Never serialised to clients.
#[derive(Debug, Clone)]
pub struct Account {
  pub id:            Uuid,
  pub email:         String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
  pub created_at:    DateTime<Utc>,
}

/// Input to [`crate::store::RecordStore::create_account`]. The password has
/// already been hashed by the caller.
#[derive(Debug, Clone)]
pub struct NewAccount {
  pub email:         String,
  pub password_hash: String,
}

/// What a new user submits at signup.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
  pub email:     String,
  pub password:  String,
  pub full_name: String,
  pub role:      Option<String>,
}

impl Registration {
  /// Normalise and validate; the password is checked but never trimmed.
  pub fn prepare(mut self) -> Result<Self, ValidationErrors> {
    self.email = self.email.trim().to_lowercase();
    trim_in_place(&mut self.full_name);
    normalize_optional(&mut self.role);

    let mut errors = ValidationErrors::new();
    errors.require("email", &self.email);
    if !self.email.is_empty() && !self.email.contains('@') {
      errors.add("email", "must be an email address");
    }
    if self.password.chars().count() < MIN_PASSWORD_LEN {
      errors.add(
        "password",
        format!("must be at least {MIN_PASSWORD_LEN} characters"),
      );
    }
    errors.require("full_name", &self.full_name);
    errors.finish()?;
    Ok(self)
  }

  /// The metadata carried over into the provisioned profile.
  pub fn profile(&self) -> ProfileDraft {
    ProfileDraft {
      full_name: self.full_name.clone(),
      role:      self.role.clone(),
    }
  }
}

// ─── Profiles ────────────────────────────────────────────────────────────────

/// The per-account profile. Visible only to its own account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
  /// Equal to the owning account's id.
  pub id:         Uuid,
  pub full_name:  String,
  pub role:       String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileDraft {
  pub full_name: String,
  /// Defaults to [`DEFAULT_ROLE`] on provisioning; unchanged on update.
  pub role:      Option<String>,
}

impl ProfileDraft {
  pub fn prepare(mut self) -> Result<Self, ValidationErrors> {
    trim_in_place(&mut self.full_name);
    normalize_optional(&mut self.role);
    let mut errors = ValidationErrors::new();
    errors.require("full_name", &self.full_name);
    errors.finish()?;
    Ok(self)
  }
}
