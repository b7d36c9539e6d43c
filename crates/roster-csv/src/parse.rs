//! CSV table parser.
//!
//! Pipeline:
//!   raw &str
//!     └─ split_records()   → Vec<RawRecord>
//!          └─ Layout::from_header() → column positions
//!               └─ decode_record() → Record
//!                    └─ Table { subjects, records }

use std::{collections::HashSet, str::FromStr};

use roster_core::{
  Grade, Record, Subject, Table,
  table::{GRADE, NAME, PERCENTAGE, ROLL_NO, STANDARD_COLUMNS, TOTAL},
};

use crate::error::{Error, Result};

// ─── Record splitting ────────────────────────────────────────────────────────

/// One logical CSV record and the line it starts on (1-based).
#[derive(Debug)]
pub(crate) struct RawRecord {
  pub line:   usize,
  pub fields: Vec<String>,
}

/// Split `input` into records, honouring double-quoted fields (which may
/// contain commas, doubled quotes, and line breaks). Blank lines are skipped;
/// `\r\n` is accepted as a line ending.
pub(crate) fn split_records(input: &str) -> Result<Vec<RawRecord>> {
  let input = input.strip_prefix('\u{feff}').unwrap_or(input);

  let mut records = Vec::new();
  let mut fields: Vec<String> = Vec::new();
  let mut field = String::new();
  let mut in_quotes = false;
  let mut line = 1usize;
  let mut start_line = 1usize;

  let mut chars = input.chars().peekable();
  while let Some(c) = chars.next() {
    if in_quotes {
      match c {
        '"' if chars.peek() == Some(&'"') => {
          chars.next();
          field.push('"');
        }
        '"' => in_quotes = false,
        '\n' => {
          line += 1;
          field.push(c);
        }
        _ => field.push(c),
      }
      continue;
    }

    match c {
      '"' => in_quotes = true,
      ',' => fields.push(std::mem::take(&mut field)),
      '\r' if chars.peek() == Some(&'\n') => {}
      '\n' => {
        fields.push(std::mem::take(&mut field));
        push_record(&mut records, start_line, std::mem::take(&mut fields));
        line += 1;
        start_line = line;
      }
      _ => field.push(c),
    }
  }

  if in_quotes {
    return Err(Error::UnterminatedQuote { line: start_line });
  }
  if !field.is_empty() || !fields.is_empty() {
    fields.push(field);
    push_record(&mut records, start_line, fields);
  }
  Ok(records)
}

fn push_record(records: &mut Vec<RawRecord>, line: usize, fields: Vec<String>) {
  // A blank line yields a single empty field.
  if fields.len() == 1 && fields[0].is_empty() {
    return;
  }
  records.push(RawRecord { line, fields });
}

// ─── Header layout ───────────────────────────────────────────────────────────

/// Where each column lives in the file's header.
struct Layout {
  width:      usize,
  roll:       usize,
  name:       usize,
  total:      Option<usize>,
  percentage: Option<usize>,
  grade:      Option<usize>,
  /// Subject columns in file order, with their header text.
  subjects:   Vec<(usize, String)>,
}

impl Layout {
  fn from_header(header: &[String]) -> Result<Self> {
    let mut seen = HashSet::new();
    for (i, col) in header.iter().enumerate() {
      if col.is_empty() {
        return Err(Error::EmptyColumn(i + 1));
      }
      // Subjects are matched case-insensitively, so `Math` and `math` collide.
      if !seen.insert(col.trim().to_lowercase()) {
        return Err(Error::DuplicateColumn(col.clone()));
      }
    }

    let find = |name: &str| header.iter().position(|c| c == name);
    let subjects = header
      .iter()
      .enumerate()
      .filter(|(_, c)| !STANDARD_COLUMNS.contains(&c.as_str()))
      .map(|(i, c)| (i, c.clone()))
      .collect();

    Ok(Self {
      width: header.len(),
      roll: find(ROLL_NO).ok_or(Error::MissingColumn(ROLL_NO))?,
      name: find(NAME).ok_or(Error::MissingColumn(NAME))?,
      total: find(TOTAL),
      percentage: find(PERCENTAGE),
      grade: find(GRADE),
      subjects,
    })
  }
}

// ─── Cell decoding ───────────────────────────────────────────────────────────

/// Parse an integer cell. Whole-number floats (`"80.0"`) are accepted since
/// spreadsheet tools write integer columns that way once a cell is blank.
fn parse_int(line: usize, column: &str, value: &str) -> Result<Option<i64>> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Ok(None);
  }
  if let Ok(n) = trimmed.parse::<i64>() {
    return Ok(Some(n));
  }
  // `i64::MAX as f64` rounds up to 2^63, so the upper bound is exclusive.
  const RANGE: std::ops::Range<f64> = (i64::MIN as f64)..(i64::MAX as f64);
  match trimmed.parse::<f64>() {
    Ok(f) if f.fract() == 0.0 && RANGE.contains(&f) => Ok(Some(f as i64)),
    _ => Err(Error::InvalidNumber {
      line,
      column: column.to_string(),
      value:  value.to_string(),
    }),
  }
}

fn parse_percentage(line: usize, value: &str) -> Result<f64> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Ok(0.0);
  }
  match trimmed.parse::<f64>() {
    Ok(f) if f.is_finite() => Ok(f),
    _ => Err(Error::InvalidNumber {
      line,
      column: PERCENTAGE.to_string(),
      value:  value.to_string(),
    }),
  }
}

fn parse_grade(line: usize, value: &str) -> Result<Grade> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Ok(Grade::NotApplicable);
  }
  Grade::from_str(trimmed).map_err(|_| Error::InvalidGrade {
    line,
    value: value.to_string(),
  })
}

fn decode_record(layout: &Layout, raw: RawRecord) -> Result<Record> {
  if raw.fields.len() != layout.width {
    return Err(Error::FieldCount {
      line:     raw.line,
      expected: layout.width,
      found:    raw.fields.len(),
    });
  }
  let cell = |i: usize| raw.fields[i].as_str();
  let line = raw.line;

  let marks = layout
    .subjects
    .iter()
    .map(|(i, column)| parse_int(line, column, cell(*i)))
    .collect::<Result<Vec<_>>>()?;

  let total = match layout.total {
    Some(i) => parse_int(line, TOTAL, cell(i))?.unwrap_or(0),
    None => 0,
  };
  let percentage = match layout.percentage {
    Some(i) => parse_percentage(line, cell(i))?,
    None => 0.0,
  };
  let grade = match layout.grade {
    Some(i) => parse_grade(line, cell(i))?,
    None => Grade::NotApplicable,
  };

  Ok(Record {
    roll: cell(layout.roll).to_string(),
    name: cell(layout.name).to_string(),
    marks,
    total,
    percentage,
    grade,
  })
}

// ─── Table parser ────────────────────────────────────────────────────────────

pub(crate) fn parse_table(input: &str) -> Result<Table> {
  let mut records = split_records(input)?.into_iter();
  let header = records.next().ok_or(Error::MissingHeader)?;
  let layout = Layout::from_header(&header.fields)?;

  let rows = records
    .map(|raw| decode_record(&layout, raw))
    .collect::<Result<Vec<_>>>()?;

  Ok(Table {
    subjects: layout
      .subjects
      .iter()
      .map(|(_, name)| Subject::new(name.as_str()))
      .collect(),
    records:  rows,
  })
}
