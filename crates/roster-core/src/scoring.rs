//! The scoring engine: derives Total, Percentage, and Grade for every row.
//!
//! Pure: no I/O, no registry mutation. Every subject is assumed to be scored
//! out of 100, so the denominator is `100 * subject count`.

use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

use crate::{Error, Result, subject::Subject, table::Table};

/// Marks available per subject.
pub const MAX_MARK: i64 = 100;

/// Letter grade derived from a percentage.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display, EnumString, AsRefStr,
)]
pub enum Grade {
  A,
  B,
  C,
  D,
  F,
  /// No subjects to grade against.
  #[default]
  #[strum(serialize = "N/A")]
  #[serde(rename = "N/A")]
  NotApplicable,
}

/// Map a percentage to a grade; thresholds are checked from the top down.
pub fn grade_for(percentage: f64) -> Grade {
  if percentage >= 90.0 {
    Grade::A
  } else if percentage >= 75.0 {
    Grade::B
  } else if percentage >= 60.0 {
    Grade::C
  } else if percentage >= 40.0 {
    Grade::D
  } else {
    Grade::F
  }
}

/// Round to two decimal places, exact halves to even (`12.625` gives `12.62`).
pub fn round2(value: f64) -> f64 { (value * 100.0).round_ties_even() / 100.0 }

/// Recompute the derived fields of every row in `table`.
///
/// Only subjects that are actually columns of `table` count; a registry entry
/// with no column is ignored rather than treated as an error. A row whose
/// marks do not fit in an `i64` total is a [`Error::Validation`].
pub fn recalculate(mut table: Table, subjects: &[Subject]) -> Result<Table> {
  let valid: Vec<usize> = subjects
    .iter()
    .filter_map(|s| table.column_index(s.as_str()))
    .collect();

  if valid.is_empty() {
    for record in &mut table.records {
      record.total = 0;
      record.percentage = 0.0;
      record.grade = Grade::NotApplicable;
    }
    return Ok(table);
  }

  let max_score = (MAX_MARK * valid.len() as i64) as f64;
  for record in &mut table.records {
    let total = valid
      .iter()
      .map(|&col| record.marks.get(col).copied().flatten().unwrap_or(0))
      .try_fold(0i64, i64::checked_add)
      .ok_or_else(|| {
        Error::Validation(format!("total for roll {:?} is too large", record.roll))
      })?;
    let percentage = round2(total as f64 / max_score * 100.0);
    record.total = total;
    record.percentage = percentage;
    record.grade = grade_for(percentage);
  }
  Ok(table)
}
