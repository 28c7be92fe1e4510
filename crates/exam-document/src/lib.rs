//! Exam document codec.
//!
//! Turns one exam JSON file into [`exam_core`] records. Pure synchronous;
//! no database dependencies.
//!
//! Pipeline:
//!   file bytes
//!     └─ read_text()       → DecodedText (UTF-8, else CP949)
//!          └─ parse_document() → Document
//!               └─ map_document()  → MappedDocument { subjects, … }

pub mod error;
mod map;
mod model;
mod read;

pub use error::{Error, Result};
pub use map::{DEFAULT_IMAGE_MARKER, MappedDocument, map_document};
pub use model::{Document, SubjectContainer, SubjectEntry, parse_document};
pub use read::{DecodedText, TextEncoding, decode_bytes, read_text};
