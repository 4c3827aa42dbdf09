//! Integration tests for `SqliteStore` against an in-memory database.

use std::time::Duration;

use chrono::{NaiveDate, Utc};
use casefile_core::{
  Domain, FailureKind, Failure as _,
  account::{NewAccount, Profile, ProfileDraft},
  case::{Case, CaseDraft, CasePriority, CaseStatus},
  evidence::{Evidence, EvidenceDraft, EvidenceStatus, EvidenceType},
  lab_report::{LabReport, LabReportDraft, LabReportStatus},
  officer::{Officer, OfficerDraft},
  policy::{Denied, Entity, Operation, Requester},
  store::{RecordStore, StatusFilter},
  suspect::{Suspect, SuspectDraft, SuspectStatus},
};
use uuid::Uuid;

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

/// Register an account and return it as a requester.
async fn account(s: &SqliteStore, email: &str) -> Requester {
  let account = s
    .create_account(NewAccount {
      email:         email.into(),
      password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
    })
    .await
    .unwrap();
  Requester::new(account.id)
}

async fn open_case(s: &SqliteStore, who: Requester, number: &str) -> Case {
  s.insert::<Case>(who, CaseDraft::new(number, "Burglary"))
    .await
    .unwrap()
}

async fn collect_evidence(s: &SqliteStore, who: Requester, case_id: Uuid) -> Evidence {
  s.insert::<Evidence>(
    who,
    EvidenceDraft::new(case_id, "EV-001", "Crowbar", EvidenceType::Physical),
  )
  .await
  .unwrap()
}

fn is_denied(err: &Error, entity: Entity, operation: Operation) -> bool {
  matches!(
    err,
    Error::Core(casefile_core::Error::Denied(d)) if *d == Denied { entity, operation }
  )
}

/// Run raw SQL against the store, bypassing the record layer.
async fn raw_execute(
  s: &SqliteStore,
  sql: &'static str,
  params: Vec<String>,
) -> Result<usize, Error> {
  Ok(
    s.conn
      .call(move |conn| {
        Ok(conn.execute(sql, rusqlite::params_from_iter(params.iter()))?)
      })
      .await?,
  )
}

// ─── Cases ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_case_applies_defaults() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;

  let mut draft = CaseDraft::new("CASE-2024-001", "Burglary");
  draft.status = CaseStatus::Open;
  draft.priority = CasePriority::Medium;
  let case = s.insert::<Case>(a, draft).await.unwrap();

  assert_eq!(case.case_number, "CASE-2024-001");
  assert_eq!(case.status, CaseStatus::Open);
  assert_eq!(case.priority, CasePriority::Medium);
  assert_eq!(case.date_opened, Utc::now().date_naive());
  assert_eq!(case.user_id, a.account_id());

  let fetched = s.get::<Case>(a, case.id).await.unwrap().unwrap();
  assert_eq!(fetched, case);
}

#[tokio::test]
async fn owner_is_stamped_from_requester() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;
  let b = account(&s, "b@example.com").await;

  // A body claiming another owner; the field is not part of the draft.
  let draft: CaseDraft = serde_json::from_value(serde_json::json!({
    "case_number": "CASE-7",
    "title": "Fraud",
    "user_id": b.account_id(),
  }))
  .unwrap();
  let case = s.insert::<Case>(a, draft).await.unwrap();
  assert_eq!(case.user_id, a.account_id());

  let suspect = s
    .insert::<Suspect>(a, SuspectDraft::new(case.id, "John Roe"))
    .await
    .unwrap();
  let evidence = collect_evidence(&s, a, case.id).await;
  let report = s
    .insert::<LabReport>(a, LabReportDraft::new(evidence.id, "LR-1", "DNA"))
    .await
    .unwrap();
  assert_eq!(suspect.user_id, a.account_id());
  assert_eq!(evidence.user_id, a.account_id());
  assert_eq!(report.user_id, a.account_id());
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_store() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;

  let err = s
    .insert::<Case>(a, CaseDraft::new("", "  "))
    .await
    .unwrap_err();
  match err.kind() {
    FailureKind::Invalid(fields) => {
      assert_eq!(fields.get("case_number"), Some("is required"));
      assert_eq!(fields.get("title"), Some("is required"));
    }
    other => panic!("expected validation failure, got {other:?}"),
  }
  assert_eq!(s.count::<Case>(a).await.unwrap(), 0);
}

#[tokio::test]
async fn list_is_newest_first() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;
  let first = open_case(&s, a, "CASE-1").await;
  let second = open_case(&s, a, "CASE-2").await;

  let cases = s.list::<Case>(a).await.unwrap();
  let ids: Vec<_> = cases.iter().map(|c| c.id).collect();
  assert_eq!(ids, [second.id, first.id]);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;
  assert!(s.get::<Case>(a, Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn update_overwrites_fields_and_refreshes_updated_at() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;
  let case = open_case(&s, a, "CASE-1").await;

  tokio::time::sleep(Duration::from_millis(5)).await;

  let mut draft = CaseDraft::new("CASE-1", "Burglary at Dock 4");
  draft.status = CaseStatus::UnderInvestigation;
  draft.priority = CasePriority::High;
  let updated = s.update::<Case>(a, case.id, draft).await.unwrap();

  assert_eq!(updated.title, "Burglary at Dock 4");
  assert_eq!(updated.status, CaseStatus::UnderInvestigation);
  assert_eq!(updated.created_at, case.created_at);
  assert!(updated.updated_at > case.updated_at);
  // `date_opened` was unset in the draft and keeps its stored value.
  assert_eq!(updated.date_opened, case.date_opened);
}

#[tokio::test]
async fn update_missing_row_is_not_found() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;

  let missing = Uuid::new_v4();
  let err = s
    .update::<Case>(a, missing, CaseDraft::new("CASE-1", "Ghost"))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), FailureKind::NotFound {
    entity: Entity::Case,
    id:     missing,
  });
}

#[tokio::test]
async fn closing_before_opening_is_rejected_by_the_store() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;

  let mut draft = CaseDraft::new("CASE-1", "Arson");
  draft.date_opened = NaiveDate::from_ymd_opt(2024, 5, 2);
  let case = s.insert::<Case>(a, draft).await.unwrap();

  // The draft alone cannot see the stored opening date.
  let mut edit = CaseDraft::new("CASE-1", "Arson");
  edit.date_closed = NaiveDate::from_ymd_opt(2024, 5, 1);
  let err = s.update::<Case>(a, case.id, edit).await.unwrap_err();
  assert!(matches!(err, Error::Constraint(_)), "{err:?}");
}

#[tokio::test]
async fn closing_before_the_default_opening_date_is_a_field_error() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;
  let today = Utc::now().date_naive();
  let yesterday = today.pred_opt().unwrap();

  let mut draft = CaseDraft::new("CASE-1", "Arson");
  draft.status = CaseStatus::Closed;
  draft.date_closed = Some(yesterday);
  let err = s.insert::<Case>(a, draft.clone()).await.unwrap_err();
  match err.kind() {
    FailureKind::Invalid(fields) => assert!(fields.get("date_closed").is_some()),
    other => panic!("unexpected {other:?}"),
  }

  let case = open_case(&s, a, "CASE-2").await;
  let evidence = collect_evidence(&s, a, case.id).await;
  let mut report = LabReportDraft::new(evidence.id, "LR-1", "DNA");
  report.date_completed = Some(yesterday);
  let err = s.insert::<LabReport>(a, report.clone()).await.unwrap_err();
  match err.kind() {
    FailureKind::Invalid(fields) => {
      assert!(fields.get("date_completed").is_some())
    }
    other => panic!("unexpected {other:?}"),
  }
  assert_eq!(s.count::<Case>(a).await.unwrap(), 1);
  assert_eq!(s.count::<LabReport>(a).await.unwrap(), 0);

  // A historical record with both dates is accepted.
  draft.date_opened = yesterday.pred_opt();
  let closed = s.insert::<Case>(a, draft).await.unwrap();
  assert_eq!(closed.date_closed, Some(yesterday));

  report.date_submitted = yesterday.pred_opt();
  let completed = s.insert::<LabReport>(a, report).await.unwrap();
  assert_eq!(completed.date_completed, Some(yesterday));
}

// ─── Referential integrity ───────────────────────────────────────────────────

#[tokio::test]
async fn evidence_for_missing_case_is_rejected() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;

  let err = s
    .insert::<Evidence>(
      a,
      EvidenceDraft::new(Uuid::new_v4(), "EV-404", "Glove", EvidenceType::Trace),
    )
    .await
    .unwrap_err();

  assert!(matches!(err, Error::Constraint(_)), "{err:?}");
  assert_eq!(err.kind(), FailureKind::Rejected);
  assert_eq!(s.count::<Evidence>(a).await.unwrap(), 0);
}

#[tokio::test]
async fn deleting_a_case_cascades() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;

  let case = open_case(&s, a, "CASE-1").await;
  let keep = open_case(&s, a, "CASE-2").await;
  let evidence = collect_evidence(&s, a, case.id).await;
  collect_evidence(&s, a, keep.id).await;
  s.insert::<Suspect>(a, SuspectDraft::new(case.id, "John Roe"))
    .await
    .unwrap();
  s.insert::<LabReport>(a, LabReportDraft::new(evidence.id, "LR-1", "DNA"))
    .await
    .unwrap();

  s.delete::<Case>(a, case.id).await.unwrap();

  assert!(s.get::<Case>(a, case.id).await.unwrap().is_none());
  assert!(s.get::<Evidence>(a, evidence.id).await.unwrap().is_none());
  assert_eq!(s.count::<Evidence>(a).await.unwrap(), 1);
  assert_eq!(s.count::<Suspect>(a).await.unwrap(), 0);
  assert_eq!(s.count::<LabReport>(a).await.unwrap(), 0);
}

#[tokio::test]
async fn deleting_an_officer_clears_the_lead() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;

  let officer = s
    .insert::<Officer>(
      a,
      OfficerDraft {
        name: "Jane Doe".into(),
        rank: "Detective".into(),
        ..Default::default()
      },
    )
    .await
    .unwrap();
  let mut draft = CaseDraft::new("CASE-1", "Burglary");
  draft.lead_officer_id = Some(officer.id);
  let case = s.insert::<Case>(a, draft).await.unwrap();
  assert_eq!(case.lead_officer_id, Some(officer.id));

  s.delete::<Officer>(a, officer.id).await.unwrap();

  let case = s.get::<Case>(a, case.id).await.unwrap().unwrap();
  assert!(case.lead_officer_id.is_none());
}

// ─── Access policy ───────────────────────────────────────────────────────────

#[tokio::test]
async fn reads_are_workspace_wide() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;
  let b = account(&s, "b@example.com").await;

  let case = open_case(&s, a, "CASE-1").await;

  let seen = s.list::<Case>(b).await.unwrap();
  assert_eq!(seen.len(), 1);
  assert!(s.get::<Case>(b, case.id).await.unwrap().is_some());
  assert_eq!(s.count::<Case>(b).await.unwrap(), 1);
}

#[tokio::test]
async fn other_account_cannot_delete_a_suspect() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;
  let b = account(&s, "b@example.com").await;

  let case = open_case(&s, a, "CASE-1").await;
  let suspect = s
    .insert::<Suspect>(a, SuspectDraft::new(case.id, "John Roe"))
    .await
    .unwrap();

  let err = s.delete::<Suspect>(b, suspect.id).await.unwrap_err();
  assert!(is_denied(&err, Entity::Suspect, Operation::Delete), "{err:?}");
  assert_eq!(err.kind(), FailureKind::Forbidden);

  let still = s.get::<Suspect>(b, suspect.id).await.unwrap();
  assert_eq!(still, Some(suspect));
}

#[tokio::test]
async fn other_account_cannot_update() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;
  let b = account(&s, "b@example.com").await;

  let case = open_case(&s, a, "CASE-1").await;
  let evidence = collect_evidence(&s, a, case.id).await;

  let mut edit = EvidenceDraft::new(case.id, "EV-001", "Tampered", EvidenceType::Digital);
  edit.status = EvidenceStatus::Disposed;
  let err = s
    .update::<Evidence>(b, evidence.id, edit)
    .await
    .unwrap_err();
  assert!(is_denied(&err, Entity::Evidence, Operation::Update), "{err:?}");

  let unchanged = s.get::<Evidence>(a, evidence.id).await.unwrap().unwrap();
  assert_eq!(unchanged, evidence);
}

#[tokio::test]
async fn other_account_may_attach_to_a_shared_case() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;
  let b = account(&s, "b@example.com").await;

  let case = open_case(&s, a, "CASE-1").await;
  let evidence = collect_evidence(&s, b, case.id).await;
  assert_eq!(evidence.user_id, b.account_id());

  // …but still may not delete the case that holds it.
  let err = s.delete::<Case>(b, case.id).await.unwrap_err();
  assert!(is_denied(&err, Entity::Case, Operation::Delete));
}

// ─── Value domains ───────────────────────────────────────────────────────────

#[tokio::test]
async fn every_domain_value_is_accepted() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;
  let case = open_case(&s, a, "CASE-1").await;

  for &status in CaseStatus::ALL {
    for &priority in CasePriority::ALL {
      let mut draft = CaseDraft::new("CASE-X", "Domain check");
      draft.status = status;
      draft.priority = priority;
      s.insert::<Case>(a, draft).await.unwrap();
    }
  }
  for &status in SuspectStatus::ALL {
    let mut draft = SuspectDraft::new(case.id, "John Roe");
    draft.status = status;
    s.insert::<Suspect>(a, draft).await.unwrap();
  }
  for &kind in EvidenceType::ALL {
    for &status in EvidenceStatus::ALL {
      let mut draft = EvidenceDraft::new(case.id, "EV", "Item", kind);
      draft.status = status;
      s.insert::<Evidence>(a, draft).await.unwrap();
    }
  }
  let evidence = collect_evidence(&s, a, case.id).await;
  for &status in LabReportStatus::ALL {
    let mut draft = LabReportDraft::new(evidence.id, "LR", "Toxicology");
    draft.status = status;
    s.insert::<LabReport>(a, draft).await.unwrap();
  }
}

#[tokio::test]
async fn out_of_domain_values_are_rejected_by_the_store() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;
  let case = open_case(&s, a, "CASE-1").await;
  let suspect = s
    .insert::<Suspect>(a, SuspectDraft::new(case.id, "John Roe"))
    .await
    .unwrap();
  let evidence = collect_evidence(&s, a, case.id).await;
  let report = s
    .insert::<LabReport>(a, LabReportDraft::new(evidence.id, "LR-1", "DNA"))
    .await
    .unwrap();

  let attempts: [(&'static str, Uuid); 6] = [
    ("UPDATE cases SET status = 'archived' WHERE id = ?1", case.id),
    ("UPDATE cases SET priority = 'urgent' WHERE id = ?1", case.id),
    ("UPDATE suspects SET status = 'fugitive' WHERE id = ?1", suspect.id),
    ("UPDATE evidence SET evidence_type = 'hearsay' WHERE id = ?1", evidence.id),
    ("UPDATE evidence SET status = 'lost' WHERE id = ?1", evidence.id),
    ("UPDATE lab_reports SET status = 'cancelled' WHERE id = ?1", report.id),
  ];
  for (sql, id) in attempts {
    let err = raw_execute(&s, sql, vec![id.to_string()]).await.unwrap_err();
    assert!(matches!(err, Error::Constraint(_)), "{sql}: {err:?}");
  }

  // Nothing changed.
  let case_now = s.get::<Case>(a, case.id).await.unwrap().unwrap();
  assert_eq!(case_now.status, CaseStatus::Open);
  assert_eq!(case_now.priority, CasePriority::Medium);
}

#[tokio::test]
async fn out_of_domain_values_are_rejected_on_insert() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;
  let case = open_case(&s, a, "CASE-1").await;
  let evidence = collect_evidence(&s, a, case.id).await;

  let owner = a.account_id().to_string();
  let new_id = || Uuid::new_v4().to_string();
  let attempts: [(&'static str, Vec<String>); 6] = [
    (
      "INSERT INTO cases (id, case_number, title, status, user_id)
       VALUES (?1, 'CASE-2', 'Arson', 'archived', ?2)",
      vec![new_id(), owner.clone()],
    ),
    (
      "INSERT INTO cases (id, case_number, title, priority, user_id)
       VALUES (?1, 'CASE-3', 'Fraud', 'urgent', ?2)",
      vec![new_id(), owner.clone()],
    ),
    (
      "INSERT INTO suspects (id, case_id, name, status, user_id)
       VALUES (?1, ?2, 'John Roe', 'fugitive', ?3)",
      vec![new_id(), case.id.to_string(), owner.clone()],
    ),
    (
      "INSERT INTO evidence (id, case_id, evidence_number, description, evidence_type, user_id)
       VALUES (?1, ?2, 'EV-2', 'Rumour', 'hearsay', ?3)",
      vec![new_id(), case.id.to_string(), owner.clone()],
    ),
    (
      "INSERT INTO evidence (id, case_id, evidence_number, description, evidence_type, status, user_id)
       VALUES (?1, ?2, 'EV-3', 'Knife', 'physical', 'lost', ?3)",
      vec![new_id(), case.id.to_string(), owner.clone()],
    ),
    (
      "INSERT INTO lab_reports (id, evidence_id, report_number, analysis_type, status, user_id)
       VALUES (?1, ?2, 'LR-1', 'DNA', 'cancelled', ?3)",
      vec![new_id(), evidence.id.to_string(), owner.clone()],
    ),
  ];
  for (sql, params) in attempts {
    let err = raw_execute(&s, sql, params).await.unwrap_err();
    assert!(matches!(err, Error::Constraint(_)), "{sql}: {err:?}");
  }

  // No rows were created.
  assert_eq!(s.count::<Case>(a).await.unwrap(), 1);
  assert_eq!(s.count::<Suspect>(a).await.unwrap(), 0);
  assert_eq!(s.count::<Evidence>(a).await.unwrap(), 1);
  assert_eq!(s.count::<LabReport>(a).await.unwrap(), 0);
}

// ─── Children, joins and counts ──────────────────────────────────────────────

#[tokio::test]
async fn children_and_joined_reads() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;

  let case = open_case(&s, a, "CASE-1").await;
  let other = open_case(&s, a, "CASE-2").await;
  let evidence = collect_evidence(&s, a, case.id).await;
  collect_evidence(&s, a, other.id).await;
  s.insert::<Suspect>(a, SuspectDraft::new(case.id, "John Roe"))
    .await
    .unwrap();
  let report = s
    .insert::<LabReport>(a, LabReportDraft::new(evidence.id, "LR-1", "DNA"))
    .await
    .unwrap();

  let children = s.list_children::<Evidence>(a, case.id).await.unwrap();
  assert_eq!(children.len(), 1);
  assert_eq!(children[0].id, evidence.id);

  let reports = s.list_children::<LabReport>(a, evidence.id).await.unwrap();
  assert_eq!(reports, [report.clone()]);

  let joined = s.evidence_with_case(a).await.unwrap();
  assert_eq!(joined.len(), 2);
  let row = joined.iter().find(|j| j.evidence.id == evidence.id).unwrap();
  assert_eq!(row.case.id, case.id);
  assert_eq!(row.case.case_number, "CASE-1");
  assert_eq!(row.case.title, "Burglary");

  let suspects = s.suspects_with_case(a).await.unwrap();
  assert_eq!(suspects.len(), 1);
  assert_eq!(suspects[0].suspect.name, "John Roe");
  assert_eq!(suspects[0].case.id, case.id);

  let reports = s.lab_reports_with_evidence(a).await.unwrap();
  assert_eq!(reports.len(), 1);
  assert_eq!(reports[0].lab_report, report);
  assert_eq!(reports[0].evidence.evidence_number, "EV-001");
}

#[tokio::test]
async fn status_counts() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;

  let case = open_case(&s, a, "CASE-1").await;
  let mut closed = CaseDraft::new("CASE-2", "Vandalism");
  closed.status = CaseStatus::Closed;
  s.insert::<Case>(a, closed).await.unwrap();
  let mut pending = CaseDraft::new("CASE-3", "Theft");
  pending.status = CaseStatus::Pending;
  s.insert::<Case>(a, pending).await.unwrap();

  let evidence = collect_evidence(&s, a, case.id).await;
  s.insert::<LabReport>(a, LabReportDraft::new(evidence.id, "LR-1", "DNA"))
    .await
    .unwrap();
  let mut done = LabReportDraft::new(evidence.id, "LR-2", "Ballistics");
  done.status = LabReportStatus::Completed;
  s.insert::<LabReport>(a, done).await.unwrap();

  assert_eq!(s.count::<Case>(a).await.unwrap(), 3);
  assert_eq!(
    s.count_by_status::<Case>(a, StatusFilter::IsNot(CaseStatus::Closed))
      .await
      .unwrap(),
    2
  );
  assert_eq!(
    s.count_by_status::<LabReport>(a, StatusFilter::Is(LabReportStatus::Pending))
      .await
      .unwrap(),
    1
  );
}

// ─── Accounts & profiles ─────────────────────────────────────────────────────

#[tokio::test]
async fn duplicate_email_is_rejected() {
  let s = store().await;
  account(&s, "a@example.com").await;

  let err = s
    .create_account(NewAccount {
      email:         "a@example.com".into(),
      password_hash: "x".into(),
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Constraint(_)), "{err:?}");
}

#[tokio::test]
async fn find_account_by_email() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;

  let found = s
    .find_account_by_email("a@example.com".into())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(found.id, a.account_id());
  assert!(
    s.find_account_by_email("nobody@example.com".into())
      .await
      .unwrap()
      .is_none()
  );
}

fn metadata(full_name: &str) -> ProfileDraft {
  ProfileDraft { full_name: full_name.into(), role: None }
}

#[tokio::test]
async fn profile_is_provisioned_once() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;

  let profile: Profile = s.provision_profile(a, metadata("Ada Lovelace")).await.unwrap();
  assert_eq!(profile.id, a.account_id());
  assert_eq!(profile.full_name, "Ada Lovelace");
  assert_eq!(profile.role, "investigator");

  let err = s
    .provision_profile(a, metadata("Ada Again"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Constraint(_)), "{err:?}");

  let stored = s.get_profile(a, a.account_id()).await.unwrap().unwrap();
  assert_eq!(stored.full_name, "Ada Lovelace");
}

#[tokio::test]
async fn profiles_are_private() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;
  let b = account(&s, "b@example.com").await;
  s.provision_profile(a, metadata("Ada")).await.unwrap();

  let err = s.get_profile(b, a.account_id()).await.unwrap_err();
  assert!(is_denied(&err, Entity::Profile, Operation::Read));

  let err = s
    .update_profile(b, a.account_id(), metadata("Mallory"))
    .await
    .unwrap_err();
  assert!(is_denied(&err, Entity::Profile, Operation::Update));
}

#[tokio::test]
async fn update_own_profile() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;
  s.provision_profile(a, metadata("Ada")).await.unwrap();

  let updated = s
    .update_profile(
      a,
      a.account_id(),
      ProfileDraft { full_name: "Ada King".into(), role: Some("analyst".into()) },
    )
    .await
    .unwrap();
  assert_eq!(updated.full_name, "Ada King");
  assert_eq!(updated.role, "analyst");

  // An unset role keeps the stored one.
  let updated = s
    .update_profile(a, a.account_id(), metadata("Ada Lovelace"))
    .await
    .unwrap();
  assert_eq!(updated.role, "analyst");
}

#[tokio::test]
async fn updating_a_missing_profile_is_not_found() {
  let s = store().await;
  let a = account(&s, "a@example.com").await;
  let err = s
    .update_profile(a, a.account_id(), metadata("Ada"))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), FailureKind::NotFound {
    entity: Entity::Profile,
    id:     a.account_id(),
  });
}
