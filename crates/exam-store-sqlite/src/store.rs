//! [`SqliteStore`] — connection ownership and read-back queries.

use std::path::Path;

use exam_core::{
  Exam, ExamDetail, ExamId, ExamKey, Question, Subject, SubjectDetail, SubjectId,
};
use rusqlite::{Connection, OptionalExtension as _, TransactionBehavior};

use crate::{
  Error, Result, Session,
  encode::{
    EXAM_COLUMNS, QUESTION_COLUMNS, RawQuestion, SUBJECT_COLUMNS, exam_from_row,
    subject_from_row,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An exam store backed by a single SQLite file.
pub struct SqliteStore {
  conn: Connection,
}

/// Row counts of the three tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
  pub exams:     i64,
  pub subjects:  i64,
  pub questions: i64,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = Connection::open(path)?;
    Self::init(conn)
  }

  /// Open an in-memory store — useful for testing.
  pub fn open_in_memory() -> Result<Self> {
    let conn = Connection::open_in_memory()?;
    Self::init(conn)
  }

  fn init(conn: Connection) -> Result<Self> {
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn })
  }

  /// Begin the run-scoped write transaction.
  ///
  /// The write lock is taken immediately so a concurrent writer fails here
  /// rather than halfway through the run. Dropping the session without
  /// committing rolls everything back.
  pub fn session(&mut self) -> Result<Session<'_>> {
    let tx = self
      .conn
      .transaction_with_behavior(TransactionBehavior::Immediate)?;
    Ok(Session::new(tx))
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub fn find_exam(&self, key: &ExamKey) -> Result<Option<Exam>> {
    let sql = format!(
      "SELECT {EXAM_COLUMNS} FROM exams
       WHERE license_type = ?1 AND grade = ?2 AND year = ?3 AND inning = ?4"
    );
    Ok(
      self
        .conn
        .query_row(
          &sql,
          rusqlite::params![key.license_type, key.grade, key.year, key.inning],
          exam_from_row,
        )
        .optional()?,
    )
  }

  pub fn list_exams(&self) -> Result<Vec<Exam>> {
    let sql = format!(
      "SELECT {EXAM_COLUMNS} FROM exams
       ORDER BY license_type, grade, year, inning"
    );
    let mut stmt = self.conn.prepare(&sql)?;
    let exams = stmt
      .query_map([], exam_from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(exams)
  }

  pub fn subjects_for_exam(&self, exam_id: ExamId) -> Result<Vec<Subject>> {
    let sql =
      format!("SELECT {SUBJECT_COLUMNS} FROM subjects WHERE exam_id = ?1 ORDER BY id");
    let mut stmt = self.conn.prepare(&sql)?;
    let subjects = stmt
      .query_map([exam_id], subject_from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(subjects)
  }

  pub fn questions_for_subject(&self, subject_id: SubjectId) -> Result<Vec<Question>> {
    let sql = format!(
      "SELECT {QUESTION_COLUMNS} FROM questions WHERE subject_id = ?1 ORDER BY id"
    );
    let mut stmt = self.conn.prepare(&sql)?;
    let raws = stmt
      .query_map([subject_id], RawQuestion::from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    raws.into_iter().map(RawQuestion::into_question).collect()
  }

  /// Load one exam with all of its subjects and questions.
  pub fn exam_detail(&self, key: &ExamKey) -> Result<ExamDetail> {
    let exam = self
      .find_exam(key)?
      .ok_or_else(|| Error::ExamNotFound(key.clone()))?;

    let subjects = self
      .subjects_for_exam(exam.id)?
      .into_iter()
      .map(|subject| {
        let questions = self.questions_for_subject(subject.id)?;
        Ok(SubjectDetail { subject, questions })
      })
      .collect::<Result<Vec<_>>>()?;

    Ok(ExamDetail { exam, subjects })
  }

  pub fn counts(&self) -> Result<TableCounts> {
    Ok(self.conn.query_row(
      "SELECT (SELECT COUNT(*) FROM exams),
              (SELECT COUNT(*) FROM subjects),
              (SELECT COUNT(*) FROM questions)",
      [],
      |row| {
        Ok(TableCounts {
          exams:     row.get(0)?,
          subjects:  row.get(1)?,
          questions: row.get(2)?,
        })
      },
    )?)
  }
}
