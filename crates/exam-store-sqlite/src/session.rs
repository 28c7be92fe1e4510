//! [`Session`] — the run-scoped transaction, implementing [`ExamSink`].

use exam_core::{ExamId, ExamKey, ExamSink, NewQuestion, QuestionId, SubjectId};
use rusqlite::Transaction;
use tracing::debug;

use crate::{Error, Result};

/// One open write transaction. Every import write goes through here.
///
/// Dropping a session without calling [`ExamSink::commit`] rolls it back.
pub struct Session<'conn> {
  tx: Transaction<'conn>,
}

impl<'conn> Session<'conn> {
  pub(crate) fn new(tx: Transaction<'conn>) -> Self { Self { tx } }
}

impl ExamSink for Session<'_> {
  type Error = Error;

  /// `ON CONFLICT … DO UPDATE` turns the insert into a no-op update of the
  /// existing row, so `RETURNING id` yields the id either way.
  fn upsert_exam(&mut self, key: &ExamKey) -> Result<ExamId> {
    let id = self.tx.query_row(
      "INSERT INTO exams (license_type, grade, year, inning)
       VALUES (?1, ?2, ?3, ?4)
       ON CONFLICT (license_type, grade, year, inning)
         DO UPDATE SET license_type = excluded.license_type
       RETURNING id",
      rusqlite::params![key.license_type, key.grade, key.year, key.inning],
      |row| row.get(0),
    )?;
    debug!(exam_id = id, exam = %key, "exam upserted");
    Ok(id)
  }

  fn clear_subjects(&mut self, exam_id: ExamId) -> Result<usize> {
    let n = self
      .tx
      .execute("DELETE FROM subjects WHERE exam_id = ?1", [exam_id])?;
    Ok(n)
  }

  fn insert_subject(&mut self, exam_id: ExamId, name: &str) -> Result<SubjectId> {
    self.tx.execute(
      "INSERT INTO subjects (exam_id, name) VALUES (?1, ?2)",
      rusqlite::params![exam_id, name],
    )?;
    Ok(self.tx.last_insert_rowid())
  }

  fn insert_question(
    &mut self,
    subject_id: SubjectId,
    q: &NewQuestion,
  ) -> Result<QuestionId> {
    self.tx.execute(
      "INSERT INTO questions (
         subject_id, question_number, question_text,
         option_a, option_b, option_c, option_d,
         correct_answer, image_ref
       ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
      rusqlite::params![
        subject_id,
        q.number,
        q.text,
        q.option_a,
        q.option_b,
        q.option_c,
        q.option_d,
        q.correct_answer.as_str(),
        q.image_ref,
      ],
    )?;
    Ok(self.tx.last_insert_rowid())
  }

  fn commit(self) -> Result<()> {
    self.tx.commit()?;
    Ok(())
  }

  fn rollback(self) -> Result<()> {
    self.tx.rollback()?;
    Ok(())
  }
}
