//! Error types for `roster-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Missing or malformed required input (roll, name, or a mark).
  #[error("invalid input: {0}")]
  Validation(String),

  #[error("roll number {0:?} already exists")]
  DuplicateRoll(String),

  /// Carries the canonical spelling of the subject already registered.
  #[error("subject {0:?} already exists")]
  DuplicateSubject(String),

  #[error("subject {0:?} not found")]
  NotFound(String),

  #[error("no subjects to remove")]
  EmptyRegistry,

  #[error("subject name is empty")]
  EmptyInput,

  /// The backing store could not be read or written.
  #[error("storage error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
