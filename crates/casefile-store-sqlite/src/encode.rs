//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Records travel through `serde_json`: a draft is serialised to a JSON
//! object whose keys are column names, and a row is read back into a JSON
//! object keyed by column name before being deserialised into the record.
//! UUIDs are stored as hyphenated lowercase strings, timestamps as RFC 3339.

use chrono::{DateTime, Utc};
use rusqlite::types::{Value, ValueRef};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value as Json};
use uuid::Uuid;

use casefile_core::account::Account;

use crate::{Error, Result};

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── JSON ⇄ SQL ──────────────────────────────────────────────────────────────

/// Column/value pairs for a draft, one per serialised field.
pub fn draft_columns<D: Serialize>(draft: &D) -> Result<Vec<(String, Value)>> {
  match serde_json::to_value(draft)? {
    Json::Object(map) => Ok(
      map
        .into_iter()
        .map(|(column, value)| (column, json_to_sql(value)))
        .collect(),
    ),
    other => Err(Error::Encoding(format!(
      "draft did not serialise to an object: {other}"
    ))),
  }
}

fn json_to_sql(value: Json) -> Value {
  match value {
    Json::Null => Value::Null,
    Json::Bool(b) => Value::Integer(i64::from(b)),
    Json::Number(n) => match n.as_i64() {
      Some(i) => Value::Integer(i),
      None => Value::Real(n.as_f64().unwrap_or_default()),
    },
    Json::String(s) => Value::Text(s),
    nested @ (Json::Array(_) | Json::Object(_)) => Value::Text(nested.to_string()),
  }
}

/// Read every column of `row` into a JSON object keyed by column name.
pub fn row_to_json(
  row: &rusqlite::Row<'_>,
  columns: &[String],
) -> rusqlite::Result<Map<String, Json>> {
  let mut map = Map::with_capacity(columns.len());
  for (idx, column) in columns.iter().enumerate() {
    let value = match row.get_ref(idx)? {
      ValueRef::Null => Json::Null,
      ValueRef::Integer(i) => Json::from(i),
      ValueRef::Real(f) => Json::from(f),
      ValueRef::Text(t) => Json::String(String::from_utf8_lossy(t).into_owned()),
      ValueRef::Blob(_) => Json::Null,
    };
    map.insert(column.clone(), value);
  }
  Ok(map)
}

/// Move every `prefix`-ed key of `row` into a nested object under `key`,
/// stripping the prefix. Used to shape joined reads.
pub fn nest_prefixed(row: &mut Map<String, Json>, prefix: &str, key: &str) {
  let moved: Vec<String> = row
    .keys()
    .filter(|k| k.starts_with(prefix))
    .cloned()
    .collect();

  let mut nested = Map::with_capacity(moved.len());
  for column in moved {
    if let Some(value) = row.remove(&column) {
      nested.insert(column[prefix.len()..].to_owned(), value);
    }
  }
  row.insert(key.to_owned(), Json::Object(nested));
}

pub fn decode_row<T: DeserializeOwned>(row: Map<String, Json>) -> Result<T> {
  Ok(serde_json::from_value(Json::Object(row))?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from an `accounts` row.
pub struct RawAccount {
  pub id:            String,
  pub email:         String,
  pub password_hash: String,
  pub created_at:    String,
}

impl RawAccount {
  pub fn into_account(self) -> Result<Account> {
    Ok(Account {
      id:            decode_uuid(&self.id)?,
      email:         self.email,
      password_hash: self.password_hash,
      created_at:    decode_dt(&self.created_at)?,
    })
  }
}
