//! Reshaping a stored exam into the nested document layout for display.

use exam_core::{ExamDetail, Question};
use serde::Serialize;

/// `{ "subject": { grade, year, inning, "type": [ { "string", "questions" } ] } }`
#[derive(Debug, Serialize)]
pub struct ExamResponse {
  pub subject: ExamBody,
}

#[derive(Debug, Serialize)]
pub struct ExamBody {
  pub license_type: String,
  pub grade:        String,
  pub year:         i32,
  pub inning:       i32,
  #[serde(rename = "type")]
  pub subjects:     Vec<SubjectBody>,
}

#[derive(Debug, Serialize)]
pub struct SubjectBody {
  #[serde(rename = "string")]
  pub name:      String,
  pub questions: Vec<QuestionBody>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionBody {
  pub num:           i64,
  pub questions_str: String,
  pub ex1_str:       Option<String>,
  pub ex2_str:       Option<String>,
  pub ex3_str:       Option<String>,
  pub ex4_str:       Option<String>,
  /// Canonical key (`a`–`d` or `unknown`), not the source label.
  pub answer:        String,
  #[serde(rename = "image_ref", skip_serializing_if = "Option::is_none")]
  pub image_ref:     Option<String>,
}

impl From<&Question> for QuestionBody {
  fn from(q: &Question) -> Self {
    Self {
      num:           q.number,
      questions_str: q.text.clone(),
      ex1_str:       q.option_a.clone(),
      ex2_str:       q.option_b.clone(),
      ex3_str:       q.option_c.clone(),
      ex4_str:       q.option_d.clone(),
      answer:        q.correct_answer.to_string(),
      image_ref:     q.image_ref.clone(),
    }
  }
}

impl From<&ExamDetail> for ExamResponse {
  fn from(detail: &ExamDetail) -> Self {
    let key = &detail.exam.key;
    Self {
      subject: ExamBody {
        license_type: key.license_type.clone(),
        grade:        key.grade.clone(),
        year:         key.year,
        inning:       key.inning,
        subjects:     detail
          .subjects
          .iter()
          .map(|s| SubjectBody {
            name:      s.subject.name.clone(),
            questions: s.questions.iter().map(QuestionBody::from).collect(),
          })
          .collect(),
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use exam_core::{AnswerKey, Exam, ExamKey, Subject, SubjectDetail};
  use serde_json::json;

  use super::*;

  #[test]
  fn nested_layout() {
    let detail = ExamDetail {
      exam:     Exam {
        id:  1,
        key: ExamKey {
          license_type: "항해사".into(),
          grade:        "6급".into(),
          year:         2023,
          inning:       1,
        },
      },
      subjects: vec![SubjectDetail {
        subject:   Subject { id: 10, exam_id: 1, name: "항해".into() },
        questions: vec![Question {
          id:             100,
          subject_id:     10,
          number:         1,
          text:           "q".into(),
          option_a:       Some("a".into()),
          option_b:       None,
          option_c:       None,
          option_d:       None,
          correct_answer: AnswerKey::D,
          image_ref:      None,
        }],
      }],
    };

    let value = serde_json::to_value(ExamResponse::from(&detail)).unwrap();
    assert_eq!(
      value,
      json!({
        "subject": {
          "license_type": "항해사",
          "grade": "6급",
          "year": 2023,
          "inning": 1,
          "type": [{
            "string": "항해",
            "questions": [{
              "num": 1,
              "questionsStr": "q",
              "ex1Str": "a",
              "ex2Str": null,
              "ex3Str": null,
              "ex4Str": null,
              "answer": "d"
            }]
          }]
        }
      })
    );
  }
}
