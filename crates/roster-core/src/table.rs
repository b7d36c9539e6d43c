//! The roster table: fixed-width rows over an explicit subject schema.
//!
//! Schema changes are expressed as explicit evolution steps
//! ([`Table::add_column`], [`Table::drop_column`], [`Table::conform_to`]);
//! nothing infers columns implicitly.

use serde::Serialize;

use crate::{scoring::Grade, subject::Subject};

// ─── Standard columns ────────────────────────────────────────────────────────

pub const ROLL_NO: &str = "Roll No";
pub const NAME: &str = "Name";
pub const TOTAL: &str = "Total";
pub const PERCENTAGE: &str = "Percentage";
pub const GRADE: &str = "Grade";

/// Columns present regardless of subject configuration.
pub const STANDARD_COLUMNS: [&str; 5] = [ROLL_NO, NAME, TOTAL, PERCENTAGE, GRADE];

// ─── Record ──────────────────────────────────────────────────────────────────

/// One student row.
///
/// `marks` is positionally aligned with the owning table's `subjects`; `None`
/// is an absent cell and scores as 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
  pub roll:       String,
  pub name:       String,
  pub marks:      Vec<Option<i64>>,
  pub total:      i64,
  pub percentage: f64,
  pub grade:      Grade,
}

impl Record {
  /// A row with the given marks and not-yet-computed derived fields.
  pub fn new(
    roll: impl Into<String>,
    name: impl Into<String>,
    marks: Vec<Option<i64>>,
  ) -> Self {
    Self {
      roll: roll.into(),
      name: name.into(),
      marks,
      total: 0,
      percentage: 0.0,
      grade: Grade::NotApplicable,
    }
  }
}

// ─── Table ───────────────────────────────────────────────────────────────────

/// The full ordered set of records plus the subject columns they carry.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
  pub subjects: Vec<Subject>,
  pub records:  Vec<Record>,
}

impl Table {
  /// An empty table with the given subject columns.
  pub fn with_subjects(subjects: Vec<Subject>) -> Self {
    Self { subjects, records: Vec::new() }
  }

  pub fn is_empty(&self) -> bool { self.records.is_empty() }

  pub fn len(&self) -> usize { self.records.len() }

  /// Full column list: `[Roll No, Name, ..subjects.., Total, Percentage, Grade]`.
  pub fn columns(&self) -> Vec<String> {
    let mut cols = Vec::with_capacity(self.subjects.len() + STANDARD_COLUMNS.len());
    cols.push(ROLL_NO.to_string());
    cols.push(NAME.to_string());
    cols.extend(self.subjects.iter().map(|s| s.to_string()));
    cols.extend([TOTAL, PERCENTAGE, GRADE].map(str::to_string));
    cols
  }

  /// Position of the column whose identity matches `subject`.
  pub fn column_index(&self, subject: &str) -> Option<usize> {
    self.subjects.iter().position(|s| s.matches(subject))
  }

  pub fn has_column(&self, subject: &str) -> bool {
    self.column_index(subject).is_some()
  }

  /// The cell at `row` for `subject`, if both exist and the cell is filled.
  pub fn mark(&self, row: usize, subject: &str) -> Option<i64> {
    let col = self.column_index(subject)?;
    self.records.get(row)?.marks.get(col).copied().flatten()
  }

  pub fn contains_roll(&self, roll: &str) -> bool {
    self.records.iter().any(|r| r.roll == roll)
  }

  /// Append a column; every existing row receives `fill`.
  pub fn add_column(&mut self, subject: Subject, fill: Option<i64>) {
    self.subjects.push(subject);
    for record in &mut self.records {
      record.marks.push(fill);
    }
  }

  /// Drop the column matching `subject`. Returns whether one was removed.
  pub fn drop_column(&mut self, subject: &str) -> bool {
    let Some(col) = self.column_index(subject) else {
      return false;
    };
    self.subjects.remove(col);
    for record in &mut self.records {
      if col < record.marks.len() {
        record.marks.remove(col);
      }
    }
    true
  }

  /// Reshape to exactly `subjects`, in that order.
  ///
  /// Existing cells follow their column; columns the table lacks are
  /// back-filled with `None`; columns not listed are dropped.
  pub fn conform_to(&mut self, subjects: &[Subject]) {
    let mapping: Vec<Option<usize>> = subjects
      .iter()
      .map(|s| self.column_index(s.as_str()))
      .collect();

    for record in &mut self.records {
      record.marks = mapping
        .iter()
        .map(|col| col.and_then(|c| record.marks.get(c).copied().flatten()))
        .collect();
    }
    self.subjects = subjects.to_vec();
  }

  /// Whether the table's subject columns already equal `subjects`, in order.
  pub fn conforms_to(&self, subjects: &[Subject]) -> bool {
    self.subjects == subjects
  }

  /// Remove every row whose roll equals `roll`. Returns the number removed.
  pub fn remove_roll(&mut self, roll: &str) -> usize {
    let before = self.records.len();
    self.records.retain(|r| r.roll != roll);
    before - self.records.len()
  }
}
