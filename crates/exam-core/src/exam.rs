//! Exam, subject and question records.
//!
//! `New*` types are what the document mapper produces and the writer
//! consumes. The id-carrying types are read back from the store.

use std::fmt;

use crate::AnswerKey;

pub type ExamId = i64;
pub type SubjectId = i64;
pub type QuestionId = i64;

// ─── Natural key ─────────────────────────────────────────────────────────────

/// Identity of one exam sitting. At most one `exams` row exists per value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExamKey {
  /// Licence category, e.g. `항해사`.
  pub license_type: String,
  /// Grade label, e.g. `6급`.
  pub grade:        String,
  pub year:         i32,
  pub inning:       i32,
}

impl fmt::Display for ExamKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} {} ({}/{})",
      self.license_type, self.grade, self.year, self.inning
    )
  }
}

// ─── Mapped records ──────────────────────────────────────────────────────────

/// A subject decoded from a document, with its questions in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubject {
  pub name:      String,
  pub questions: Vec<NewQuestion>,
}

/// A question decoded from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
  pub number:         i64,
  pub text:           String,
  pub option_a:       Option<String>,
  pub option_b:       Option<String>,
  pub option_c:       Option<String>,
  pub option_d:       Option<String>,
  pub correct_answer: AnswerKey,
  /// First string field of the source entry that starts with the image
  /// marker, if any.
  pub image_ref:      Option<String>,
}

// ─── Persisted rows ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exam {
  pub id:  ExamId,
  pub key: ExamKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
  pub id:      SubjectId,
  pub exam_id: ExamId,
  pub name:    String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
  pub id:             QuestionId,
  pub subject_id:     SubjectId,
  pub number:         i64,
  pub text:           String,
  pub option_a:       Option<String>,
  pub option_b:       Option<String>,
  pub option_c:       Option<String>,
  pub option_d:       Option<String>,
  pub correct_answer: AnswerKey,
  pub image_ref:      Option<String>,
}
