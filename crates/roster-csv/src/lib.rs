//! Comma-separated codec for the roster table.
//!
//! Converts between CSV text and [`roster_core::Table`]. Pure synchronous;
//! no file I/O.
//!
//! # Quick start
//!
//! ```no_run
//! let csv = "Roll No,Name,Math,Total,Percentage,Grade\n1,Ada,91,91,91.0,A\n";
//! let table = roster_csv::parse(csv).unwrap();
//! assert_eq!(roster_csv::serialize(&table), csv);
//! ```

pub mod error;
mod parse;
mod serialize;

pub use error::{Error, Result};
use roster_core::Table;

// ─── Public API ──────────────────────────────────────────────────────────────

/// Parse a complete table from `input`.
///
/// The header row is required. Standard columns are located by name; every
/// other header is a subject column, in file order.
pub fn parse(input: &str) -> Result<Table> { parse::parse_table(input) }

/// Serialize `table` with columns in the order given by
/// [`Table::columns`], `\n` line endings, and a trailing newline.
pub fn serialize(table: &Table) -> String { serialize::serialize_table(table) }

// ─── Round-trip test ─────────────────────────────────────────────────────────
