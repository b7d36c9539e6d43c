//! [`FileStore`]: the flat-file implementation of [`TableStore`].

use std::{
  fs::{self, File},
  io::{self, Write as _},
  path::{Path, PathBuf},
};

use roster_core::{Table, TableStore};
use tracing::debug;

use crate::{Error, Result};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A roster table backed by a single CSV file.
#[derive(Debug, Clone)]
pub struct FileStore {
  path: PathBuf,
}

impl FileStore {
  /// A store for `path`. Nothing is touched on disk until the first call.
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  /// Open (or create) the table at `path`.
  pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
    let store = Self::new(path);
    store.initialize()?;
    Ok(store)
  }

  pub fn path(&self) -> &Path { &self.path }

  /// Sibling scratch file the next version is written to before the rename.
  fn temp_path(&self) -> PathBuf {
    let name = self
      .path
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| "roster".to_string());
    self.path.with_file_name(format!(".{name}.tmp"))
  }

  fn parent_dir(&self) -> Option<&Path> {
    self.path.parent().filter(|p| !p.as_os_str().is_empty())
  }

  fn io_error(&self, source: io::Error) -> Error {
    Error::Io { path: self.path.clone(), source }
  }

  /// Write `contents` to the scratch file, fsync it, and rename it over the
  /// target. A crash leaves either the old or the new complete file.
  fn write_atomic(&self, contents: &str) -> Result<()> {
    let tmp = self.temp_path();
    if let Err(source) = write_then_rename(&tmp, &self.path, contents) {
      let _ = fs::remove_file(&tmp);
      return Err(self.io_error(source));
    }

    // Make the rename itself durable where the platform allows it.
    if let Some(dir) = self.parent_dir()
      && let Ok(handle) = File::open(dir)
    {
      let _ = handle.sync_all();
    }
    Ok(())
  }
}

fn write_then_rename(tmp: &Path, target: &Path, contents: &str) -> io::Result<()> {
  let mut file = File::create(tmp)?;
  file.write_all(contents.as_bytes())?;
  file.sync_all()?;
  drop(file);
  fs::rename(tmp, target)
}

// ─── TableStore impl ─────────────────────────────────────────────────────────

impl TableStore for FileStore {
  type Error = Error;

  fn load(&self) -> Result<Table> {
    let text = match fs::read_to_string(&self.path) {
      Ok(text) => text,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        debug!(path = %self.path.display(), "no table on disk yet");
        return Ok(Table::default());
      }
      Err(e) => return Err(self.io_error(e)),
    };

    let table = roster_csv::parse(&text).map_err(|source| Error::Format {
      path: self.path.clone(),
      source,
    })?;
    debug!(
      path = %self.path.display(),
      rows = table.len(),
      subjects = table.subjects.len(),
      "table loaded"
    );
    Ok(table)
  }

  fn save(&self, table: &Table) -> Result<()> {
    self.write_atomic(&roster_csv::serialize(table))?;
    debug!(
      path = %self.path.display(),
      rows = table.len(),
      subjects = table.subjects.len(),
      "table saved"
    );
    Ok(())
  }

  fn initialize(&self) -> Result<()> {
    match fs::metadata(&self.path) {
      Ok(_) => return Ok(()),
      Err(e) if e.kind() == io::ErrorKind::NotFound => {}
      Err(e) => return Err(self.io_error(e)),
    }

    if let Some(dir) = self.parent_dir() {
      fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;
    }
    self.write_atomic(&roster_csv::serialize(&Table::default()))?;
    debug!(path = %self.path.display(), "created empty table");
    Ok(())
  }
}
