//! Subjects and the schema registry that orders them.
//!
//! Subject identity is always case-insensitive; the stored and displayed form
//! is the title-cased spelling under which the subject was first registered.

use std::fmt;

use serde::Serialize;

use crate::{Error, Result, table::STANDARD_COLUMNS};

// ─── Subject ─────────────────────────────────────────────────────────────────

/// A gradable category, held in its canonical display form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Subject(String);

impl Subject {
  /// Wrap an already-canonical name, e.g. a column header read from disk.
  pub fn new(canonical: impl Into<String>) -> Self { Self(canonical.into()) }

  pub fn as_str(&self) -> &str { &self.0 }

  /// Identity test: `raw` is trimmed and both sides are compared lower-cased.
  pub fn matches(&self, raw: &str) -> bool {
    self.0.to_lowercase() == raw.trim().to_lowercase()
  }
}

impl fmt::Display for Subject {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl AsRef<str> for Subject {
  fn as_ref(&self) -> &str { &self.0 }
}

/// Title-case `raw`: a cased letter is upper-cased when it follows an uncased
/// character (or starts the string) and lower-cased otherwise.
///
/// `"data science"` → `"Data Science"`, `"o'neil"` → `"O'Neil"`,
/// `"2nd year"` → `"2Nd Year"`.
pub fn title_case(raw: &str) -> String {
  let mut out = String::with_capacity(raw.len());
  let mut prev_cased = false;
  for c in raw.chars() {
    let cased = c.is_uppercase() || c.is_lowercase();
    if cased && prev_cased {
      out.extend(c.to_lowercase());
    } else if cased {
      out.extend(c.to_uppercase());
    } else {
      out.push(c);
    }
    prev_cased = cased;
  }
  out
}

// ─── Registry ────────────────────────────────────────────────────────────────

/// The ordered set of subjects known to the roster.
///
/// Insertion order is column order in every persisted table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaRegistry {
  subjects: Vec<Subject>,
}

impl SchemaRegistry {
  pub fn new() -> Self { Self::default() }

  /// Every header that is not a standard column, in file order.
  pub fn derive_from_headers<S: AsRef<str>>(headers: &[S]) -> Vec<Subject> {
    headers
      .iter()
      .map(AsRef::<str>::as_ref)
      .filter(|h| !STANDARD_COLUMNS.contains(h))
      .map(Subject::new)
      .collect()
  }

  /// Build a registry from a persisted header row.
  pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
    Self { subjects: Self::derive_from_headers(headers) }
  }

  pub fn subjects(&self) -> &[Subject] { &self.subjects }

  pub fn len(&self) -> usize { self.subjects.len() }

  pub fn is_empty(&self) -> bool { self.subjects.is_empty() }

  /// Return the registered subject whose identity matches `name`.
  pub fn find_case_insensitive(&self, name: &str) -> Option<&Subject> {
    self.subjects.iter().find(|s| s.matches(name))
  }

  /// Register a new subject under the title-cased form of `name`.
  pub fn add(&mut self, name: &str) -> Result<Subject> {
    let name = name.trim();
    if name.is_empty() {
      return Err(Error::EmptyInput);
    }
    if let Some(existing) = self.find_case_insensitive(name) {
      return Err(Error::DuplicateSubject(existing.to_string()));
    }

    let canonical = title_case(name);
    if STANDARD_COLUMNS
      .iter()
      .any(|c| c.eq_ignore_ascii_case(&canonical))
    {
      return Err(Error::Validation(format!(
        "{canonical:?} is a reserved column name"
      )));
    }
    if canonical.contains(['\n', '\r']) {
      return Err(Error::Validation(
        "subject name must be a single line".to_string(),
      ));
    }

    let subject = Subject::new(canonical);
    self.subjects.push(subject.clone());
    Ok(subject)
  }

  /// Append a subject exactly as spelled, e.g. a column found on disk.
  pub(crate) fn adopt(&mut self, subject: Subject) { self.subjects.push(subject); }

  /// Remove the subject whose identity matches `name`, returning it.
  pub fn remove(&mut self, name: &str) -> Result<Subject> {
    if self.subjects.is_empty() {
      return Err(Error::EmptyRegistry);
    }
    let pos = self
      .subjects
      .iter()
      .position(|s| s.matches(name))
      .ok_or_else(|| Error::NotFound(name.trim().to_string()))?;
    Ok(self.subjects.remove(pos))
  }

  /// Comma-separated listing, for prompts.
  pub fn subjects_display(&self) -> String {
    self
      .subjects
      .iter()
      .map(Subject::as_str)
      .collect::<Vec<_>>()
      .join(", ")
  }
}
