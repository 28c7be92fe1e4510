//! Core types and the storage seam for the exam importer.
//!
//! This crate is deliberately free of database and file-format dependencies.
//! The codec, store and importer crates all depend on it; it depends on
//! nothing of theirs.

pub mod answer;
pub mod error;
pub mod exam;
pub mod path;
pub mod sink;
pub mod view;

pub use answer::{AnswerKey, normalize_answer};
pub use error::{Error, Result};
pub use exam::{
  Exam, ExamId, ExamKey, NewQuestion, NewSubject, Question, QuestionId,
  Subject, SubjectId,
};
pub use path::exam_key_from_dir;
pub use sink::{ExamSink, SinkError};
pub use view::{ExamDetail, SubjectDetail};
