//! Error type for `roster-store-file`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("i/o error on {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    source: std::io::Error,
  },

  /// The file exists but does not hold a valid table.
  #[error("malformed table in {}: {source}", path.display())]
  Format {
    path:   PathBuf,
    source: roster_csv::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
