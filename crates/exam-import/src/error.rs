//! Error type for `exam-import`.
//!
//! Only run-level failures live here. Everything scoped to a single file is
//! reported through [`crate::FileOutcome`] and never aborts the run.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("import root does not exist: {}", .0.display())]
  RootMissing(PathBuf),

  #[error("configuration error: {0}")]
  Config(#[from] config::ConfigError),

  /// The store became unusable; every write of the run was rolled back.
  #[error("fatal storage error, run rolled back: {0}")]
  Fatal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
