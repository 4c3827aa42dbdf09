//! Per-field validation of drafts, run before any store interaction.

use std::{collections::BTreeMap, fmt};

use chrono::NaiveDate;
use serde::Serialize;

/// Field name → human-readable message. Empty means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
  pub fn new() -> Self { Self::default() }

  /// Record a problem with `field`. The first message for a field wins.
  pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
    self.0.entry(field).or_insert_with(|| message.into());
  }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn get(&self, field: &str) -> Option<&str> {
    self.0.get(field).map(String::as_str)
  }

  pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.0.keys().copied()
  }

  /// `Ok(())` when nothing was recorded.
  pub fn finish(self) -> Result<(), Self> {
    if self.is_empty() { Ok(()) } else { Err(self) }
  }

  // ── Checks ────────────────────────────────────────────────────────────

  /// The value must contain something other than whitespace.
  pub fn require(&mut self, field: &'static str, value: &str) {
    if value.trim().is_empty() {
      self.add(field, "is required");
    }
  }

  /// `later`, when both are present, must not precede `earlier`.
  pub fn ordered_dates(
    &mut self,
    field: &'static str,
    earlier: Option<NaiveDate>,
    later: Option<NaiveDate>,
  ) {
    if let (Some(earlier), Some(later)) = (earlier, later)
      && later < earlier
    {
      self.add(field, format!("must not be before {earlier}"));
    }
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for (field, message) in &self.0 {
      if !first {
        f.write_str("; ")?;
      }
      write!(f, "{field} {message}")?;
      first = false;
    }
    Ok(())
  }
}

impl std::error::Error for ValidationErrors {}

/// Trim surrounding whitespace and collapse blank strings to `None`.
pub fn normalize_optional(value: &mut Option<String>) {
  if let Some(v) = value.take() {
    let trimmed = v.trim();
    if !trimmed.is_empty() {
      *value = Some(trimmed.to_owned());
    }
  }
}
