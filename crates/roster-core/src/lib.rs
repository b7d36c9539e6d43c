//! Core types and operations for the student roster.
//!
//! This crate is deliberately free of file I/O. It owns the subject schema,
//! the scoring rules, and the four record operations; persistence is reached
//! only through the [`store::TableStore`] trait.

pub mod error;
pub mod roster;
pub mod scoring;
pub mod store;
pub mod subject;
pub mod table;

pub use error::{Error, Result};
pub use roster::{NewStudent, Roster};
pub use scoring::{Grade, recalculate};
pub use store::TableStore;
pub use subject::{SchemaRegistry, Subject};
pub use table::{Record, Table};
