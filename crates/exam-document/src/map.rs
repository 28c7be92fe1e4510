//! Mapping a [`Document`] into flat subject/question records.

use exam_core::{AnswerKey, NewQuestion, NewSubject, normalize_answer};
use serde_json::{Map, Value};

use crate::{Document, Error, Result};

/// Leading character of an auxiliary field that names an embedded image.
pub const DEFAULT_IMAGE_MARKER: char = '@';

/// The result of mapping one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappedDocument {
  /// Subjects with a usable name, in source order.
  pub subjects:         Vec<NewSubject>,
  /// Subject entries dropped because their name was missing or empty.
  pub skipped_subjects: usize,
}

/// Map every subject and question of `doc`.
///
/// Subjects without a name are skipped and counted. A question without a
/// number or text fails the whole document with
/// [`Error::MissingStructure`], so nothing from it is written.
pub fn map_document(doc: &Document, image_marker: char) -> Result<MappedDocument> {
  let entries = doc
    .subject
    .as_ref()
    .and_then(|s| s.subjects.as_deref())
    .ok_or_else(|| Error::MissingStructure("`subject` has no `type` list".into()))?;

  let mut mapped = MappedDocument::default();

  for entry in entries {
    let Some(name) = entry.name.as_deref().filter(|n| !n.is_empty()) else {
      mapped.skipped_subjects += 1;
      continue;
    };

    let questions = entry
      .questions
      .as_deref()
      .unwrap_or_default()
      .iter()
      .enumerate()
      .map(|(idx, q)| {
        map_question(q, image_marker).map_err(|field| {
          Error::MissingStructure(format!(
            "subject {name:?}, question entry {}: missing `{field}`",
            idx + 1
          ))
        })
      })
      .collect::<Result<Vec<_>>>()?;

    mapped.subjects.push(NewSubject { name: name.to_owned(), questions });
  }

  Ok(mapped)
}

/// Map one question entry. On failure returns the name of the missing
/// required field.
fn map_question(
  q: &Map<String, Value>,
  image_marker: char,
) -> std::result::Result<NewQuestion, &'static str> {
  let number = q.get("num").and_then(as_number).ok_or("num")?;
  let text = q
    .get("questionsStr")
    .and_then(Value::as_str)
    .ok_or("questionsStr")?
    .to_owned();

  let correct_answer = q
    .get("answer")
    .and_then(as_text)
    .map(|label| normalize_answer(&label))
    .unwrap_or(AnswerKey::Unknown);

  Ok(NewQuestion {
    number,
    text,
    option_a: q.get("ex1Str").and_then(as_text),
    option_b: q.get("ex2Str").and_then(as_text),
    option_c: q.get("ex3Str").and_then(as_text),
    option_d: q.get("ex4Str").and_then(as_text),
    correct_answer,
    image_ref: find_image_ref(q, image_marker),
  })
}

/// First string value starting with `marker`, scanning fields in
/// declaration order.
///
/// This is a heuristic: any string field qualifies, including the question
/// and option texts, so a new field whose values happen to start with the
/// marker would be picked up too.
fn find_image_ref(q: &Map<String, Value>, marker: char) -> Option<String> {
  q.values()
    .filter_map(Value::as_str)
    .find(|s| s.starts_with(marker))
    .map(str::to_owned)
}

fn as_number(v: &Value) -> Option<i64> {
  match v {
    Value::Number(n) => n.as_i64(),
    Value::String(s) => s.trim().parse().ok(),
    _ => None,
  }
}

/// Scalar JSON value as text; `null` and containers have none.
fn as_text(v: &Value) -> Option<String> {
  match v {
    Value::String(s) => Some(s.clone()),
    Value::Number(n) => Some(n.to_string()),
    Value::Bool(b) => Some(b.to_string()),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parse_document;

  fn mapped(json: &str) -> Result<MappedDocument> {
    map_document(&parse_document(json)?, DEFAULT_IMAGE_MARKER)
  }

  #[test]
  fn full_question() {
    let doc = mapped(
      r#"{"subject": {"type": [{"string": "항해", "questions": [{
        "num": 3,
        "questionsStr": "선박의 속력은?",
        "ex1Str": "10", "ex2Str": "20", "ex3Str": "30", "ex4Str": "40",
        "answer": "다"
      }]}]}}"#,
    )
    .unwrap();

    assert_eq!(doc.skipped_subjects, 0);
    assert_eq!(doc.subjects.len(), 1);
    assert_eq!(doc.subjects[0].name, "항해");
    assert_eq!(doc.subjects[0].questions, vec![NewQuestion {
      number:         3,
      text:           "선박의 속력은?".into(),
      option_a:       Some("10".into()),
      option_b:       Some("20".into()),
      option_c:       Some("30".into()),
      option_d:       Some("40".into()),
      correct_answer: AnswerKey::C,
      image_ref:      None,
    }]);
  }

  #[test]
  fn options_are_optional_and_answer_falls_back_to_unknown() {
    let doc = mapped(
      r#"{"subject": {"type": [{"string": "법규", "questions": [
        {"num": "7", "questionsStr": "q", "ex1Str": null},
        {"num": 8, "questionsStr": "q", "answer": "Z"},
        {"num": 9, "questionsStr": "q", "answer": "사"}
      ]}]}}"#,
    )
    .unwrap();

    let qs = &doc.subjects[0].questions;
    assert_eq!(qs[0].number, 7);
    assert_eq!(qs[0].option_a, None);
    assert_eq!(qs[0].option_d, None);
    assert_eq!(qs[0].correct_answer, AnswerKey::Unknown);
    assert_eq!(qs[1].correct_answer, AnswerKey::Unknown);
    assert_eq!(qs[2].correct_answer, AnswerKey::D);
  }

  #[test]
  fn nameless_subjects_are_skipped() {
    let doc = mapped(
      r#"{"subject": {"type": [
        {"questions": [{"num": 1, "questionsStr": "q"}]},
        {"string": "", "questions": []},
        {"string": "영어", "questions": [{"num": 1, "questionsStr": "q"}]}
      ]}}"#,
    )
    .unwrap();

    assert_eq!(doc.skipped_subjects, 2);
    assert_eq!(doc.subjects.len(), 1);
    assert_eq!(doc.subjects[0].name, "영어");
  }

  #[test]
  fn subject_without_questions_is_kept_empty() {
    let doc = mapped(r#"{"subject": {"type": [{"string": "기관"}]}}"#).unwrap();
    assert_eq!(doc.subjects.len(), 1);
    assert!(doc.subjects[0].questions.is_empty());
  }

  #[test]
  fn first_marker_field_in_declaration_order_wins() {
    let doc = mapped(
      r#"{"subject": {"type": [{"string": "s", "questions": [{
        "num": 1,
        "questionsStr": "그림을 보고 답하시오",
        "note": "plain",
        "img2": "@second.png",
        "img1": "@first.png",
        "answer": "가"
      }]}]}}"#,
    )
    .unwrap();
    assert_eq!(
      doc.subjects[0].questions[0].image_ref.as_deref(),
      Some("@second.png")
    );
  }

  #[test]
  fn custom_marker() {
    let doc = parse_document(
      r##"{"subject": {"type": [{"string": "s", "questions": [{
        "num": 1, "questionsStr": "q", "pic": "#fig1", "other": "@x"
      }]}]}}"##,
    )
    .unwrap();
    let doc = map_document(&doc, '#').unwrap();
    assert_eq!(doc.subjects[0].questions[0].image_ref.as_deref(), Some("#fig1"));
  }

  #[test]
  fn question_without_number_fails_document() {
    let r = mapped(
      r#"{"subject": {"type": [{"string": "s", "questions": [
        {"num": 1, "questionsStr": "ok"},
        {"questionsStr": "no number"}
      ]}]}}"#,
    );
    match r {
      Err(Error::MissingStructure(msg)) => {
        assert!(msg.contains("question entry 2"), "{msg}");
        assert!(msg.contains("`num`"), "{msg}");
      }
      other => panic!("expected missing structure, got {other:?}"),
    }
  }

  #[test]
  fn question_without_text_fails_document() {
    let r = mapped(
      r#"{"subject": {"type": [{"string": "s", "questions": [{"num": 1}]}]}}"#,
    );
    assert!(matches!(r, Err(Error::MissingStructure(m)) if m.contains("questionsStr")));
  }
}
