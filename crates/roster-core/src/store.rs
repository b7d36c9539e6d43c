//! The `TableStore` trait.
//!
//! Implemented by storage backends (e.g. `roster-store-file`). The record
//! operations in [`crate::roster`] depend on this abstraction, not on any
//! concrete backend.

use crate::table::Table;

/// Whole-table persistence.
///
/// There are no partial writes: `save` always receives the complete, final
/// table and replaces whatever was stored before.
pub trait TableStore {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the persisted table. A store with nothing persisted yet yields an
  /// empty table with no subject columns.
  fn load(&self) -> Result<Table, Self::Error>;

  /// Replace the persisted table with `table`.
  fn save(&self, table: &Table) -> Result<(), Self::Error>;

  /// Persist an empty table with only the standard columns, unless one
  /// already exists. Idempotent.
  fn initialize(&self) -> Result<(), Self::Error>;
}
