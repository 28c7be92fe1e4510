//! Exam document importer.
//!
//! Walks a `<root>/<licence>/<sitting>/*.json` tree and loads every document
//! into the SQLite exam store inside one transaction. See [`run_import`].

pub mod config;
pub mod error;
pub mod import;
pub mod show;
pub mod summary;

pub use config::{ImportConfig, ReimportPolicy};
pub use error::{Error, Result};
pub use import::{Importer, run_import};
pub use summary::{
  Disposition, FileOutcome, RunStatus, RunSummary, SkipReason, WriteStats,
};
