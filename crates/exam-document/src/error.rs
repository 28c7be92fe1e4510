//! Error types for the exam document codec.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The bytes are valid under neither the primary nor the fallback
  /// encoding.
  #[error("{}: not decodable as UTF-8 or CP949", .path.display())]
  Decode { path: PathBuf },

  #[error("{}: {source}", .path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed JSON: {0}")]
  Json(#[from] serde_json::Error),

  /// The document decoded but lacks the subject/question shape.
  #[error("missing structure: {0}")]
  MissingStructure(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
