//! Error type for `exam-store-sqlite`.

use exam_core::{ExamKey, SinkError};
use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] exam_core::Error),

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("exam not found: {0}")]
  ExamNotFound(ExamKey),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl SinkError for Error {
  /// Failures that leave the connection unusable for the rest of the run.
  /// Constraint violations and type mismatches are scoped to one record.
  fn is_fatal(&self) -> bool {
    let Error::Database(err) = self else {
      return false;
    };
    match err.sqlite_error_code() {
      Some(code) => matches!(
        code,
        ErrorCode::CannotOpen
          | ErrorCode::SystemIoFailure
          | ErrorCode::DatabaseCorrupt
          | ErrorCode::NotADatabase
          | ErrorCode::DiskFull
          | ErrorCode::DatabaseBusy
          | ErrorCode::DatabaseLocked
          | ErrorCode::ReadOnly
          | ErrorCode::OutOfMemory
          | ErrorCode::ApiMisuse
      ),
      None => matches!(err, rusqlite::Error::InvalidPath(_)),
    }
  }
}
