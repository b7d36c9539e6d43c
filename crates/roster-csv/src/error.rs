//! Error types for the roster CSV codec.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("missing header row")]
  MissingHeader,

  #[error("missing required column {0:?}")]
  MissingColumn(&'static str),

  #[error("duplicate column {0:?}")]
  DuplicateColumn(String),

  #[error("empty column name at position {0}")]
  EmptyColumn(usize),

  #[error("line {line}: unterminated quoted field")]
  UnterminatedQuote { line: usize },

  #[error("line {line}: expected {expected} fields, found {found}")]
  FieldCount { line: usize, expected: usize, found: usize },

  #[error("line {line}: invalid number in {column:?}: {value:?}")]
  InvalidNumber { line: usize, column: String, value: String },

  #[error("line {line}: invalid grade {value:?}")]
  InvalidGrade { line: usize, value: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
