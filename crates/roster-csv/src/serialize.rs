//! CSV table serializer.
//!
//! Fields are quoted only when they contain a delimiter, a quote, or a line
//! break; embedded quotes are doubled.

use roster_core::{Record, Table};

// ─── Field escaping ──────────────────────────────────────────────────────────

pub(crate) fn escape_field(s: &str) -> String {
  if s.contains([',', '"', '\n', '\r']) {
    format!("\"{}\"", s.replace('"', "\"\""))
  } else {
    s.to_string()
  }
}

/// Percentages always carry a decimal point (`70.0`, `66.67`).
pub(crate) fn format_percentage(p: f64) -> String {
  if p.fract() == 0.0 { format!("{p:.1}") } else { p.to_string() }
}

fn format_mark(mark: Option<i64>) -> String {
  mark.map(|m| m.to_string()).unwrap_or_default()
}

fn push_line(out: &mut String, fields: impl IntoIterator<Item = String>) {
  let line: Vec<String> = fields.into_iter().map(|f| escape_field(&f)).collect();
  out.push_str(&line.join(","));
  out.push('\n');
}

fn record_fields(record: &Record, width: usize) -> Vec<String> {
  let mut fields = Vec::with_capacity(width + 5);
  fields.push(record.roll.clone());
  fields.push(record.name.clone());
  // Short rows are padded so the line matches the header.
  fields.extend((0..width).map(|i| format_mark(record.marks.get(i).copied().flatten())));
  fields.push(record.total.to_string());
  fields.push(format_percentage(record.percentage));
  fields.push(record.grade.to_string());
  fields
}

// ─── Table serializer ────────────────────────────────────────────────────────

pub(crate) fn serialize_table(table: &Table) -> String {
  let width = table.subjects.len();
  let mut out = String::new();
  push_line(&mut out, table.columns());
  for record in &table.records {
    push_line(&mut out, record_fields(record, width));
  }
  out
}
