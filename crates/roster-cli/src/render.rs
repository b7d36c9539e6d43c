//! Plain-text rendering of a roster table.

use roster_core::{Record, Table};

fn record_cells(record: &Record, width: usize) -> Vec<String> {
  let mut cells = Vec::with_capacity(width + 5);
  cells.push(record.roll.clone());
  cells.push(record.name.clone());
  cells.extend((0..width).map(|i| match record.marks.get(i).copied().flatten() {
    Some(m) => m.to_string(),
    None => "-".to_string(),
  }));
  cells.push(record.total.to_string());
  cells.push(format!("{:.2}", record.percentage));
  cells.push(record.grade.to_string());
  cells
}

/// Render `table` as left-aligned columns with a rule under the header.
pub fn render_table(table: &Table) -> String {
  let header = table.columns();
  let rows: Vec<Vec<String>> = table
    .records
    .iter()
    .map(|r| record_cells(r, table.subjects.len()))
    .collect();

  let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
  for row in &rows {
    for (w, cell) in widths.iter_mut().zip(row) {
      *w = (*w).max(cell.chars().count());
    }
  }

  let format_row = |cells: &[String]| {
    cells
      .iter()
      .zip(&widths)
      .map(|(c, &w)| format!("{c:<w$}"))
      .collect::<Vec<_>>()
      .join("  ")
      .trim_end()
      .to_string()
  };

  let mut out = format_row(&header);
  out.push('\n');
  out.push_str(&widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
  out.push('\n');
  for row in &rows {
    out.push_str(&format_row(row));
    out.push('\n');
  }
  out
}
