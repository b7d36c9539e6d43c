//! Record operations: the four mutating use-cases plus read access.
//!
//! Each operation is one load → mutate → recalculate → save cycle against
//! the store. The next registry and table are built as new values and the
//! registry is committed only after the save succeeds, so a failure at any
//! step leaves both the file and the in-memory schema untouched.

use tracing::{debug, info, warn};

use crate::{
  Error, Result,
  scoring::recalculate,
  store::TableStore,
  subject::{SchemaRegistry, Subject},
  table::{Record, Table},
};

// ─── Input ───────────────────────────────────────────────────────────────────

/// A student as entered by the user, before validation.
///
/// Marks are kept as typed (`(subject, mark)`); parsing happens in
/// [`Roster::add_student`].
#[derive(Debug, Clone, Default)]
pub struct NewStudent {
  pub roll:  String,
  pub name:  String,
  pub marks: Vec<(String, String)>,
}

impl NewStudent {
  pub fn new(roll: impl Into<String>, name: impl Into<String>) -> Self {
    Self { roll: roll.into(), name: name.into(), marks: Vec::new() }
  }

  pub fn with_mark(mut self, subject: impl Into<String>, mark: impl Into<String>) -> Self {
    self.marks.push((subject.into(), mark.into()));
    self
  }
}

// ─── Service ─────────────────────────────────────────────────────────────────

/// The roster service: a store plus the schema registry cached from it.
pub struct Roster<S> {
  store:    S,
  registry: SchemaRegistry,
}

impl<S: TableStore> Roster<S> {
  /// Initialise `store` and build the registry from its header row.
  pub fn open(store: S) -> Result<Self> {
    let mut roster = Self { store, registry: SchemaRegistry::new() };
    roster.initialize()?;
    Ok(roster)
  }

  /// Ensure the store exists and rebuild the registry from it. Idempotent.
  pub fn initialize(&mut self) -> Result<()> {
    self.store.initialize().map_err(Error::store)?;
    let table = self.store.load().map_err(Error::store)?;
    self.registry = SchemaRegistry::from_headers(&table.columns());
    debug!(subjects = self.registry.len(), rows = table.len(), "roster initialised");
    Ok(())
  }

  pub fn store(&self) -> &S { &self.store }

  pub fn registry(&self) -> &SchemaRegistry { &self.registry }

  /// Subjects in column order.
  pub fn list_subjects(&self) -> &[Subject] { self.registry.subjects() }

  /// The current table shaped to the registry, for rendering. Nothing is
  /// written back.
  pub fn list_records(&self) -> Result<Table> {
    let mut registry = self.registry.clone();
    self.load_conformed(&mut registry)
  }

  // ── Students ──────────────────────────────────────────────────────────

  /// Validate and append a student, then recalculate and persist.
  pub fn add_student(&mut self, input: NewStudent) -> Result<Record> {
    if input.roll.trim().is_empty() {
      return Err(Error::Validation("roll number is required".to_string()));
    }
    if input.name.trim().is_empty() {
      return Err(Error::Validation("name is required".to_string()));
    }
    let marks = self.parse_marks(&input.marks)?;

    let mut registry = self.registry.clone();
    let mut table = self.load_conformed(&mut registry)?;
    if table.contains_roll(&input.roll) {
      return Err(Error::DuplicateRoll(input.roll));
    }

    let row = table
      .subjects
      .iter()
      .map(|col| marks.iter().find(|(s, _)| s == col).map(|(_, m)| *m))
      .collect();
    let index = table.records.len();
    table.records.push(Record::new(input.roll, input.name, row));

    let table = recalculate(table, registry.subjects())?;
    self.store.save(&table).map_err(Error::store)?;
    self.registry = registry;

    let record = table.records[index].clone();
    info!(roll = %record.roll, total = record.total, grade = %record.grade, "student added");
    Ok(record)
  }

  /// Remove every row whose roll equals `roll` (exact string comparison).
  ///
  /// Returns the number of rows removed; when nothing matches the store is
  /// not written.
  pub fn delete_student(&mut self, roll: &str) -> Result<usize> {
    let mut table = self.store.load().map_err(Error::store)?;
    let removed = table.remove_roll(roll);
    if removed == 0 {
      debug!(roll, "no student to delete");
      return Ok(0);
    }

    // Other rows' derived fields do not depend on this one.
    self.store.save(&table).map_err(Error::store)?;
    info!(roll, removed, "student deleted");
    Ok(removed)
  }

  // ── Subjects ──────────────────────────────────────────────────────────

  /// Register a subject and add it as a zero-filled column.
  ///
  /// With no students yet only the registry changes; the column appears in
  /// the file with the next write.
  pub fn add_subject(&mut self, raw_name: &str) -> Result<Subject> {
    if raw_name.trim().is_empty() {
      return Err(Error::EmptyInput);
    }
    if let Some(existing) = self.registry.find_case_insensitive(raw_name) {
      return Err(Error::DuplicateSubject(existing.to_string()));
    }

    let mut registry = self.registry.clone();
    let mut table = self.load_conformed(&mut registry)?;
    let subject = registry.add(raw_name)?;

    if table.is_empty() {
      self.registry = registry;
      info!(subject = %subject, "subject registered");
      return Ok(subject);
    }

    table.add_column(subject.clone(), Some(0));
    let table = recalculate(table, registry.subjects())?;
    self.store.save(&table).map_err(Error::store)?;
    self.registry = registry;

    info!(subject = %subject, rows = table.len(), "subject added");
    Ok(subject)
  }

  /// Unregister a subject, drop its column, recalculate, and persist.
  ///
  /// Performs no confirmation; callers confirm destructive intent first.
  pub fn remove_subject(&mut self, raw_name: &str) -> Result<Subject> {
    if self.registry.is_empty() {
      return Err(Error::EmptyRegistry);
    }
    if self.registry.find_case_insensitive(raw_name).is_none() {
      return Err(Error::NotFound(raw_name.trim().to_string()));
    }

    let mut registry = self.registry.clone();
    let mut table = self.load_conformed(&mut registry)?;
    let subject = registry.remove(raw_name)?;
    table.drop_column(subject.as_str());

    let table = recalculate(table, registry.subjects())?;
    self.store.save(&table).map_err(Error::store)?;
    self.registry = registry;

    info!(subject = %subject, rows = table.len(), "subject removed");
    Ok(subject)
  }

  // ── Helpers ───────────────────────────────────────────────────────────

  /// Resolve each typed mark to a registered subject and an integer.
  fn parse_marks(&self, marks: &[(String, String)]) -> Result<Vec<(Subject, i64)>> {
    let mut parsed: Vec<(Subject, i64)> = Vec::with_capacity(marks.len());
    for (name, raw) in marks {
      let subject = self
        .registry
        .find_case_insensitive(name)
        .ok_or_else(|| Error::Validation(format!("unknown subject {:?}", name.trim())))?;
      if parsed.iter().any(|(s, _)| s == subject) {
        return Err(Error::Validation(format!("mark for {subject} given twice")));
      }
      let mark = raw.trim().parse::<i64>().map_err(|_| {
        Error::Validation(format!("mark for {subject} must be a whole number, got {raw:?}"))
      })?;
      parsed.push((subject.clone(), mark));
    }
    Ok(parsed)
  }

  /// Load the table and bring it in line with `registry`.
  ///
  /// Columns the registry does not know (e.g. added to the file by another
  /// tool) are adopted into `registry` rather than dropped; registry subjects
  /// the table lacks are back-filled as absent cells.
  fn load_conformed(&self, registry: &mut SchemaRegistry) -> Result<Table> {
    let mut table = self.store.load().map_err(Error::store)?;
    for column in &table.subjects {
      if registry.find_case_insensitive(column.as_str()).is_none() {
        warn!(subject = %column, "adopting column missing from the registry");
        registry.adopt(column.clone());
      }
    }
    if !table.conforms_to(registry.subjects()) {
      debug!(
        from = table.subjects.len(),
        to = registry.len(),
        "conforming table columns to registry"
      );
      table.conform_to(registry.subjects());
    }
    Ok(table)
  }
}
