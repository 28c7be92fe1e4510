//! Row types read directly from SQLite and their conversion into
//! [`exam_core`] read models.

use exam_core::{AnswerKey, Exam, ExamKey, Question, Subject};

use crate::Result;

pub const EXAM_COLUMNS: &str = "id, license_type, grade, year, inning";
pub const SUBJECT_COLUMNS: &str = "id, exam_id, name";
pub const QUESTION_COLUMNS: &str = "id, subject_id, question_number, question_text, \
   option_a, option_b, option_c, option_d, correct_answer, image_ref";

pub fn exam_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Exam> {
  Ok(Exam {
    id:  row.get(0)?,
    key: ExamKey {
      license_type: row.get(1)?,
      grade:        row.get(2)?,
      year:         row.get(3)?,
      inning:       row.get(4)?,
    },
  })
}

pub fn subject_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Subject> {
  Ok(Subject {
    id:      row.get(0)?,
    exam_id: row.get(1)?,
    name:    row.get(2)?,
  })
}

/// Raw column values from a `questions` row; `correct_answer` still text.
pub struct RawQuestion {
  pub id:             i64,
  pub subject_id:     i64,
  pub number:         i64,
  pub text:           String,
  pub option_a:       Option<String>,
  pub option_b:       Option<String>,
  pub option_c:       Option<String>,
  pub option_d:       Option<String>,
  pub correct_answer: String,
  pub image_ref:      Option<String>,
}

impl RawQuestion {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(0)?,
      subject_id:     row.get(1)?,
      number:         row.get(2)?,
      text:           row.get(3)?,
      option_a:       row.get(4)?,
      option_b:       row.get(5)?,
      option_c:       row.get(6)?,
      option_d:       row.get(7)?,
      correct_answer: row.get(8)?,
      image_ref:      row.get(9)?,
    })
  }

  pub fn into_question(self) -> Result<Question> {
    Ok(Question {
      id:             self.id,
      subject_id:     self.subject_id,
      number:         self.number,
      text:           self.text,
      option_a:       self.option_a,
      option_b:       self.option_b,
      option_c:       self.option_c,
      option_d:       self.option_d,
      correct_answer: AnswerKey::from_stored(&self.correct_answer)?,
      image_ref:      self.image_ref,
    })
  }
}
