//! The `ExamSink` trait: the write side of an import run.
//!
//! Implemented by storage backends (e.g. `exam-store-sqlite`'s session).
//! The importer drives this abstraction, not any concrete backend, and owns
//! the sink for exactly one run: every write lands in one transaction that
//! is finalised once by [`ExamSink::commit`] or [`ExamSink::rollback`].

use crate::{ExamId, ExamKey, NewQuestion, QuestionId, SubjectId};

/// Errors raised by a sink must say whether the run can continue.
pub trait SinkError: std::error::Error + Send + Sync + 'static {
  /// `true` when the backend has lost connectivity (or is otherwise unusable)
  /// and the whole run must be rolled back. `false` for failures scoped to
  /// the record being written.
  fn is_fatal(&self) -> bool;
}

pub trait ExamSink {
  type Error: SinkError;

  /// Fetch-or-create the exam row for `key`. Repeated calls with an equal
  /// key return the same id.
  fn upsert_exam(&mut self, key: &ExamKey) -> Result<ExamId, Self::Error>;

  /// Delete every subject (and, by cascade, question) owned by `exam_id`.
  /// Returns the number of subjects removed.
  fn clear_subjects(&mut self, exam_id: ExamId) -> Result<usize, Self::Error>;

  /// Insert a subject row. Not deduplicated.
  fn insert_subject(
    &mut self,
    exam_id: ExamId,
    name: &str,
  ) -> Result<SubjectId, Self::Error>;

  /// Insert a question row under `subject_id`. Not deduplicated.
  fn insert_question(
    &mut self,
    subject_id: SubjectId,
    question: &NewQuestion,
  ) -> Result<QuestionId, Self::Error>;

  /// Make every write of the run durable.
  fn commit(self) -> Result<(), Self::Error>
  where
    Self: Sized;

  /// Discard every write of the run.
  fn rollback(self) -> Result<(), Self::Error>
  where
    Self: Sized;
}
