//! Read model for one persisted exam with its subjects and questions.

use crate::{Exam, Question, Subject};

/// An exam as stored, with subjects and questions in insertion order.
#[derive(Debug, Clone)]
pub struct ExamDetail {
  pub exam:     Exam,
  pub subjects: Vec<SubjectDetail>,
}

#[derive(Debug, Clone)]
pub struct SubjectDetail {
  pub subject:   Subject,
  pub questions: Vec<Question>,
}
