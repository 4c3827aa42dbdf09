//! The `RecordStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g.
//! `casefile-store-sqlite`). Higher layers (`casefile-api`,
//! `casefile-server`) depend on this abstraction, not on any concrete
//! backend.
//!
//! Every method that touches an operational table takes the [`Requester`]
//! and consults [`crate::policy`] before reading or writing. Owners are
//! always stamped from the requester; drafts carry no owner field.

use std::future::Future;

use uuid::Uuid;

use crate::{
  account::{Account, NewAccount, Profile, ProfileDraft},
  error::Failure,
  evidence::EvidenceWithCase,
  lab_report::LabReportWithEvidence,
  policy::Requester,
  record::{Child, HasStatus, Record},
  suspect::SuspectWithCase,
};

// ─── Query types ─────────────────────────────────────────────────────────────

/// Status predicate for [`RecordStore::count_by_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter<T> {
  Is(T),
  IsNot(T),
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Casefile store backend.
///
/// Each call is a single atomic unit: a rejected call leaves no partial
/// writes behind.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: Failure;

  // ── Generic CRUD ──────────────────────────────────────────────────────

  /// Every visible row, newest first.
  fn list<R: Record>(
    &self,
    who: Requester,
  ) -> impl Future<Output = Result<Vec<R>, Self::Error>> + Send + '_;

  /// A single row by id. `None` if it does not exist.
  fn get<R: Record>(
    &self,
    who: Requester,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<R>, Self::Error>> + Send + '_;

  /// Validate `draft`, then persist it owned by `who`.
  fn insert<R: Record>(
    &self,
    who: Requester,
    draft: R::Draft,
  ) -> impl Future<Output = Result<R, Self::Error>> + Send + '_;

  /// Validate `draft`, then overwrite the row. Only the owner may update.
  fn update<R: Record>(
    &self,
    who: Requester,
    id: Uuid,
    draft: R::Draft,
  ) -> impl Future<Output = Result<R, Self::Error>> + Send + '_;

  /// Remove the row and, through the foreign keys, its dependents. Only the
  /// owner may delete.
  fn delete<R: Record>(
    &self,
    who: Requester,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Rows belonging to one parent, newest first.
  fn list_children<R: Child>(
    &self,
    who: Requester,
    parent_id: Uuid,
  ) -> impl Future<Output = Result<Vec<R>, Self::Error>> + Send + '_;

  // ── Aggregates ────────────────────────────────────────────────────────

  fn count<R: Record>(
    &self,
    who: Requester,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  fn count_by_status<R: HasStatus>(
    &self,
    who: Requester,
    filter: StatusFilter<R::Status>,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Joined reads ──────────────────────────────────────────────────────

  fn evidence_with_case(
    &self,
    who: Requester,
  ) -> impl Future<Output = Result<Vec<EvidenceWithCase>, Self::Error>> + Send + '_;

  fn suspects_with_case(
    &self,
    who: Requester,
  ) -> impl Future<Output = Result<Vec<SuspectWithCase>, Self::Error>> + Send + '_;

  fn lab_reports_with_evidence(
    &self,
    who: Requester,
  ) -> impl Future<Output = Result<Vec<LabReportWithEvidence>, Self::Error>>
  + Send
  + '_;

  // ── Accounts & profiles ───────────────────────────────────────────────

  /// Persist a new account. Fails if the email is already registered.
  fn create_account(
    &self,
    input: NewAccount,
  ) -> impl Future<Output = Result<Account, Self::Error>> + Send + '_;

  fn find_account_by_email(
    &self,
    email: String,
  ) -> impl Future<Output = Result<Option<Account>, Self::Error>> + Send + '_;

  /// Create the profile for the requester's own account. Fails if one
  /// already exists.
  fn provision_profile(
    &self,
    who: Requester,
    metadata: ProfileDraft,
  ) -> impl Future<Output = Result<Profile, Self::Error>> + Send + '_;

  /// Read the profile of `account_id`; only its own account may.
  fn get_profile(
    &self,
    who: Requester,
    account_id: Uuid,
  ) -> impl Future<Output = Result<Option<Profile>, Self::Error>> + Send + '_;

  fn update_profile(
    &self,
    who: Requester,
    account_id: Uuid,
    draft: ProfileDraft,
  ) -> impl Future<Output = Result<Profile, Self::Error>> + Send + '_;
}
