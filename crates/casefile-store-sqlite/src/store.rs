//! [`SqliteStore`], the SQLite implementation of [`RecordStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, types::Value};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as Json};
use uuid::Uuid;

use casefile_core::{
  Child, Domain, Draft as _, HasStatus, Record,
  account::{Account, DEFAULT_ROLE, NewAccount, Profile, ProfileDraft},
  evidence::{Evidence, EvidenceWithCase},
  lab_report::{LabReport, LabReportWithEvidence},
  policy::{self, Denied, Entity, Operation, Requester, Visibility},
  record::OWNER_COLUMN,
  store::{RecordStore, StatusFilter},
  suspect::{Suspect, SuspectWithCase},
};

use crate::{
  Error, Result,
  encode::{
    RawAccount, decode_row, draft_columns, encode_uuid, nest_prefixed,
    row_to_json,
  },
  schema::SCHEMA,
};

// ─── Joined reads ────────────────────────────────────────────────────────────

const EVIDENCE_WITH_CASE: &str = "
  SELECT e.*,
         c.id          AS case__id,
         c.case_number AS case__case_number,
         c.title       AS case__title
  FROM evidence e
  JOIN cases c ON c.id = e.case_id";

const SUSPECTS_WITH_CASE: &str = "
  SELECT s.*,
         c.id          AS case__id,
         c.case_number AS case__case_number,
         c.title       AS case__title
  FROM suspects s
  JOIN cases c ON c.id = s.case_id";

const LAB_REPORTS_WITH_EVIDENCE: &str = "
  SELECT l.*,
         e.id              AS evidence__id,
         e.evidence_number AS evidence__evidence_number,
         e.description     AS evidence__description
  FROM lab_reports l
  JOIN evidence e ON e.id = l.evidence_id";

// ─── Query helpers ───────────────────────────────────────────────────────────

/// A conjunction of `column <op> ?N` conditions with their bound values.
#[derive(Default)]
struct Where {
  conds:  Vec<String>,
  params: Vec<Value>,
}

impl Where {
  fn cond(mut self, column: &str, op: &str, value: impl Into<Value>) -> Self {
    self.params.push(value.into());
    self.conds.push(format!("{column} {op} ?{}", self.params.len()));
    self
  }

  fn eq(self, column: &str, value: impl Into<Value>) -> Self {
    self.cond(column, "=", value)
  }

  /// Restrict to rows the requester may see.
  fn visible_to(self, entity: Entity, who: Requester, owner_column: &str) -> Self {
    match policy::visibility(entity, who) {
      Visibility::Workspace => self,
      Visibility::Owner(id) => self.eq(owner_column, encode_uuid(id)),
    }
  }

  fn sql(&self) -> String {
    if self.conds.is_empty() {
      String::new()
    } else {
      format!(" WHERE {}", self.conds.join(" AND "))
    }
  }
}

fn column_names(stmt: &rusqlite::Statement<'_>) -> Vec<String> {
  stmt.column_names().into_iter().map(str::to_owned).collect()
}

fn query_rows(
  conn: &rusqlite::Connection,
  sql: &str,
  params: &[Value],
) -> rusqlite::Result<Vec<Map<String, Json>>> {
  let mut stmt = conn.prepare(sql)?;
  let columns = column_names(&stmt);
  let rows = stmt
    .query_map(rusqlite::params_from_iter(params.iter()), |row| {
      row_to_json(row, &columns)
    })?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  Ok(rows)
}

fn select_by_id(
  conn: &rusqlite::Connection,
  table: &str,
  id: &str,
) -> rusqlite::Result<Option<Map<String, Json>>> {
  let mut stmt = conn.prepare(&format!("SELECT * FROM {table} WHERE id = ?1"))?;
  let columns = column_names(&stmt);
  let row = stmt
    .query_row([id], |row| row_to_json(row, &columns))
    .optional()?;
  Ok(row)
}

/// The owning account of a row, if the row exists.
fn owner_of(
  conn: &rusqlite::Connection,
  table: &str,
  id: &str,
) -> tokio_rusqlite::Result<Option<Uuid>> {
  let owner: Option<String> = conn
    .query_row(
      &format!("SELECT {OWNER_COLUMN} FROM {table} WHERE id = ?1"),
      [id],
      |row| row.get(0),
    )
    .optional()?;

  owner
    .map(|s| Uuid::parse_str(&s))
    .transpose()
    .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))
}

fn insert_sql(table: &str, columns: &[(String, Value)]) -> String {
  let names: Vec<&str> = columns.iter().map(|(c, _)| c.as_str()).collect();
  let slots: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
  format!(
    "INSERT INTO {table} ({}) VALUES ({})",
    names.join(", "),
    slots.join(", ")
  )
}

/// `UPDATE … SET a = ?1, b = ?2 WHERE id = ?3`; the id is bound last.
fn update_sql(table: &str, columns: &[(String, Value)]) -> String {
  let assignments: Vec<String> = columns
    .iter()
    .enumerate()
    .map(|(i, (c, _))| format!("{c} = ?{}", i + 1))
    .collect();
  format!(
    "UPDATE {table} SET {} WHERE id = ?{}",
    assignments.join(", "),
    columns.len() + 1
  )
}

/// Outcome of a policy-guarded mutation, decided inside the transaction.
enum Guarded<T> {
  Done(T),
  Missing,
  Denied(Denied),
}

impl<T> Guarded<T> {
  fn into_result(self, entity: Entity, id: Uuid) -> Result<T> {
    match self {
      Self::Done(value) => Ok(value),
      Self::Missing => {
        Err(casefile_core::Error::NotFound { entity, id }.into())
      }
      Self::Denied(denied) => {
        tracing::warn!(%entity, %id, operation = %denied.operation, "policy denied mutation");
        Err(denied.into())
      }
    }
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Casefile record store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. The single
/// connection serialises all writers.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, as the tests do.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn rows(&self, sql: String, params: Vec<Value>) -> Result<Vec<Map<String, Json>>> {
    let rows = self
      .conn
      .call(move |conn| Ok(query_rows(conn, &sql, &params)?))
      .await?;
    Ok(rows)
  }

  async fn scalar(&self, sql: String, params: Vec<Value>) -> Result<u64> {
    let n: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(&sql, rusqlite::params_from_iter(params.iter()), |row| {
          row.get(0)
        })?)
      })
      .await?;
    Ok(u64::try_from(n).unwrap_or_default())
  }

  /// Run a joined read and fold the parent columns (aliased `{prefix}col`)
  /// into a nested `key` object.
  async fn joined<T: DeserializeOwned>(
    &self,
    who: Requester,
    entity: Entity,
    base: &str,
    alias: &str,
    prefix: &'static str,
    key: &'static str,
  ) -> Result<Vec<T>> {
    let filter =
      Where::default().visible_to(entity, who, &format!("{alias}.{OWNER_COLUMN}"));
    let sql = format!(
      "{base}{} ORDER BY {alias}.created_at DESC, {alias}.rowid DESC",
      filter.sql()
    );

    self
      .rows(sql, filter.params)
      .await?
      .into_iter()
      .map(|mut row| {
        nest_prefixed(&mut row, prefix, key);
        decode_row(row)
      })
      .collect()
  }

  async fn select_where<R: Record>(&self, filter: Where) -> Result<Vec<R>> {
    let sql = format!(
      "SELECT * FROM {}{} ORDER BY created_at DESC, rowid DESC",
      R::TABLE,
      filter.sql()
    );
    self
      .rows(sql, filter.params)
      .await?
      .into_iter()
      .map(decode_row)
      .collect()
  }

  async fn count_where(&self, table: &str, filter: Where) -> Result<u64> {
    let sql = format!("SELECT COUNT(*) FROM {table}{}", filter.sql());
    self.scalar(sql, filter.params).await
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  // ── Generic CRUD ──────────────────────────────────────────────────────────

  async fn list<R: Record>(&self, who: Requester) -> Result<Vec<R>> {
    let filter = Where::default().visible_to(R::ENTITY, who, OWNER_COLUMN);
    self.select_where(filter).await
  }

  async fn get<R: Record>(&self, who: Requester, id: Uuid) -> Result<Option<R>> {
    let id_str = encode_uuid(id);
    let table = R::TABLE;

    let row = self
      .conn
      .call(move |conn| Ok(select_by_id(conn, table, &id_str)?))
      .await?;

    let Some(row) = row else { return Ok(None) };
    let record: R = decode_row(row)?;
    policy::authorize(R::ENTITY, Operation::Read, who, record.owner())?;
    Ok(Some(record))
  }

  async fn insert<R: Record>(&self, who: Requester, draft: R::Draft) -> Result<R> {
    // Matches the `date('now')` column defaults, which are UTC.
    let draft = draft.prepare_new(Utc::now().date_naive())?;
    let owner = who.account_id();
    policy::authorize(R::ENTITY, Operation::Insert, who, owner)?;

    let id = Uuid::new_v4();
    let id_str = encode_uuid(id);
    let mut columns = vec![
      ("id".to_owned(), Value::Text(id_str.clone())),
      (OWNER_COLUMN.to_owned(), Value::Text(encode_uuid(owner))),
    ];
    // Unset columns fall back to their store defaults.
    columns.extend(
      draft_columns(&draft)?
        .into_iter()
        .filter(|(_, value)| *value != Value::Null),
    );

    let table = R::TABLE;
    let row = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          &insert_sql(table, &columns),
          rusqlite::params_from_iter(columns.iter().map(|(_, v)| v)),
        )?;
        let row = select_by_id(&tx, table, &id_str)?;
        tx.commit()?;
        Ok(row)
      })
      .await?;

    let row = row.ok_or(casefile_core::Error::NotFound { entity: R::ENTITY, id })?;
    tracing::info!(entity = %R::ENTITY, %id, "record inserted");
    decode_row(row)
  }

  async fn update<R: Record>(
    &self,
    who: Requester,
    id: Uuid,
    draft: R::Draft,
  ) -> Result<R> {
    let draft = draft.prepare()?;
    let mut columns: Vec<(String, Value)> = draft_columns(&draft)?
      .into_iter()
      .filter(|(column, value)| {
        !(*value == Value::Null && R::DEFAULTED.contains(&column.as_str()))
      })
      .collect();

    let id_str = encode_uuid(id);
    let entity = R::ENTITY;
    let table = R::TABLE;

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let Some(owner) = owner_of(&tx, table, &id_str)? else {
          return Ok(Guarded::Missing);
        };
        if let Err(denied) = policy::authorize(entity, Operation::Update, who, owner) {
          return Ok(Guarded::Denied(denied));
        }

        let sql = update_sql(table, &columns);
        columns.push(("id".to_owned(), Value::Text(id_str.clone())));
        tx.execute(
          &sql,
          rusqlite::params_from_iter(columns.iter().map(|(_, v)| v)),
        )?;
        let row = select_by_id(&tx, table, &id_str)?;
        tx.commit()?;
        Ok(row.map_or(Guarded::Missing, Guarded::Done))
      })
      .await?;

    let row = outcome.into_result(entity, id)?;
    tracing::info!(%entity, %id, "record updated");
    decode_row(row)
  }

  async fn delete<R: Record>(&self, who: Requester, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    let entity = R::ENTITY;
    let table = R::TABLE;

    let outcome = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let Some(owner) = owner_of(&tx, table, &id_str)? else {
          return Ok(Guarded::Missing);
        };
        if let Err(denied) = policy::authorize(entity, Operation::Delete, who, owner) {
          return Ok(Guarded::Denied(denied));
        }

        tx.execute(&format!("DELETE FROM {table} WHERE id = ?1"), [&id_str])?;
        tx.commit()?;
        Ok(Guarded::Done(()))
      })
      .await?;

    outcome.into_result(entity, id)?;
    tracing::info!(%entity, %id, "record deleted");
    Ok(())
  }

  async fn list_children<R: Child>(
    &self,
    who: Requester,
    parent_id: Uuid,
  ) -> Result<Vec<R>> {
    let filter = Where::default()
      .eq(R::PARENT_COLUMN, encode_uuid(parent_id))
      .visible_to(R::ENTITY, who, OWNER_COLUMN);
    self.select_where(filter).await
  }

  // ── Aggregates ────────────────────────────────────────────────────────────

  async fn count<R: Record>(&self, who: Requester) -> Result<u64> {
    let filter = Where::default().visible_to(R::ENTITY, who, OWNER_COLUMN);
    self.count_where(R::TABLE, filter).await
  }

  async fn count_by_status<R: HasStatus>(
    &self,
    who: Requester,
    filter: StatusFilter<R::Status>,
  ) -> Result<u64> {
    let (op, status) = match filter {
      StatusFilter::Is(status) => ("=", status),
      StatusFilter::IsNot(status) => ("<>", status),
    };
    let filter = Where::default()
      .cond("status", op, status.as_str().to_owned())
      .visible_to(R::ENTITY, who, OWNER_COLUMN);
    self.count_where(R::TABLE, filter).await
  }

  // ── Joined reads ──────────────────────────────────────────────────────────

  async fn evidence_with_case(&self, who: Requester) -> Result<Vec<EvidenceWithCase>> {
    self
      .joined(who, Evidence::ENTITY, EVIDENCE_WITH_CASE, "e", "case__", "case")
      .await
  }

  async fn suspects_with_case(&self, who: Requester) -> Result<Vec<SuspectWithCase>> {
    self
      .joined(who, Suspect::ENTITY, SUSPECTS_WITH_CASE, "s", "case__", "case")
      .await
  }

  async fn lab_reports_with_evidence(
    &self,
    who: Requester,
  ) -> Result<Vec<LabReportWithEvidence>> {
    self
      .joined(
        who,
        LabReport::ENTITY,
        LAB_REPORTS_WITH_EVIDENCE,
        "l",
        "evidence__",
        "evidence",
      )
      .await
  }

  // ── Accounts & profiles ───────────────────────────────────────────────────

  async fn create_account(&self, input: NewAccount) -> Result<Account> {
    let id_str = encode_uuid(Uuid::new_v4());

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO accounts (id, email, password_hash) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, input.email, input.password_hash],
        )?;
        let raw = tx.query_row(
          "SELECT id, email, password_hash, created_at FROM accounts WHERE id = ?1",
          [&id_str],
          raw_account,
        )?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    let account = raw.into_account()?;
    tracing::info!(account_id = %account.id, "account created");
    Ok(account)
  }

  async fn find_account_by_email(&self, email: String) -> Result<Option<Account>> {
    let raw = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, email, password_hash, created_at FROM accounts WHERE email = ?1",
              [&email],
              raw_account,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawAccount::into_account).transpose()
  }

  async fn provision_profile(
    &self,
    who: Requester,
    metadata: ProfileDraft,
  ) -> Result<Profile> {
    let metadata = metadata.prepare()?;
    let account_id = who.account_id();
    policy::authorize(Entity::Profile, Operation::Insert, who, account_id)?;

    let id_str = encode_uuid(account_id);
    let role = metadata.role.unwrap_or_else(|| DEFAULT_ROLE.to_owned());
    let full_name = metadata.full_name;

    let row = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO profiles (id, full_name, role) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, full_name, role],
        )?;
        let row = select_by_id(&tx, "profiles", &id_str)?;
        tx.commit()?;
        Ok(row)
      })
      .await?;

    let row = row.ok_or(casefile_core::Error::NotFound {
      entity: Entity::Profile,
      id:     account_id,
    })?;
    tracing::info!(%account_id, "profile provisioned");
    decode_row(row)
  }

  async fn get_profile(
    &self,
    who: Requester,
    account_id: Uuid,
  ) -> Result<Option<Profile>> {
    policy::authorize(Entity::Profile, Operation::Read, who, account_id)?;
    let id_str = encode_uuid(account_id);

    let row = self
      .conn
      .call(move |conn| Ok(select_by_id(conn, "profiles", &id_str)?))
      .await?;

    row.map(decode_row).transpose()
  }

  async fn update_profile(
    &self,
    who: Requester,
    account_id: Uuid,
    draft: ProfileDraft,
  ) -> Result<Profile> {
    let draft = draft.prepare()?;
    policy::authorize(Entity::Profile, Operation::Update, who, account_id)?;
    let id_str = encode_uuid(account_id);

    let row = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE profiles SET full_name = ?1, role = COALESCE(?2, role) WHERE id = ?3",
          rusqlite::params![draft.full_name, draft.role, id_str],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        let row = select_by_id(&tx, "profiles", &id_str)?;
        tx.commit()?;
        Ok(row)
      })
      .await?;

    let row = row.ok_or(casefile_core::Error::NotFound {
      entity: Entity::Profile,
      id:     account_id,
    })?;
    decode_row(row)
  }
}

fn raw_account(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawAccount> {
  Ok(RawAccount {
    id:            row.get(0)?,
    email:         row.get(1)?,
    password_hash: row.get(2)?,
    created_at:    row.get(3)?,
  })
}
