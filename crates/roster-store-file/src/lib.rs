//! Flat-file backend for the roster.
//!
//! Keeps the whole table in one CSV file and replaces it atomically on every
//! save.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::FileStore;

#[cfg(test)]
mod tests;
