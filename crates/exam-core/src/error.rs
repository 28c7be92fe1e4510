//! Error types for `exam-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A stored `correct_answer` column held text outside `a|b|c|d|unknown`.
  #[error("invalid answer key: {0:?}")]
  InvalidAnswerKey(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
