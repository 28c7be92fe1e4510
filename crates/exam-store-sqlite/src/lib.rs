//! SQLite backend for the exam importer.
//!
//! [`SqliteStore`] owns the connection; [`Session`] is the run-scoped
//! transaction the importer writes through.

mod encode;
mod schema;
mod session;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use session::Session;
pub use store::{SqliteStore, TableCounts};

#[cfg(test)]
mod tests;
