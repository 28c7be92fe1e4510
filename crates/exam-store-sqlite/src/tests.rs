//! Tests for `SqliteStore` and `Session` against an in-memory database.

use exam_core::{AnswerKey, ExamKey, ExamSink, NewQuestion, SinkError};

use crate::{Error, SqliteStore, TableCounts};

fn store() -> SqliteStore { SqliteStore::open_in_memory().expect("in-memory store") }

fn key(year: i32, inning: i32) -> ExamKey {
  ExamKey {
    license_type: "항해사".into(),
    grade:        "6급".into(),
    year,
    inning,
  }
}

fn question(number: i64, answer: AnswerKey) -> NewQuestion {
  NewQuestion {
    number,
    text: format!("문제 {number}"),
    option_a: Some("가".into()),
    option_b: Some("나".into()),
    option_c: None,
    option_d: None,
    correct_answer: answer,
    image_ref: None,
  }
}

// ─── Exam upsert ─────────────────────────────────────────────────────────────

#[test]
fn upsert_exam_reuses_id_for_equal_key() {
  let mut s = store();
  let mut session = s.session().unwrap();

  let first = session.upsert_exam(&key(2023, 1)).unwrap();
  let again = session.upsert_exam(&key(2023, 1)).unwrap();
  let other = session.upsert_exam(&key(2023, 2)).unwrap();
  session.commit().unwrap();

  assert_eq!(first, again);
  assert_ne!(first, other);
  assert_eq!(s.counts().unwrap().exams, 2);
}

#[test]
fn upsert_exam_is_idempotent_across_sessions() {
  let mut s = store();

  let first = {
    let mut session = s.session().unwrap();
    let id = session.upsert_exam(&key(2022, 4)).unwrap();
    session.commit().unwrap();
    id
  };
  let second = {
    let mut session = s.session().unwrap();
    let id = session.upsert_exam(&key(2022, 4)).unwrap();
    session.commit().unwrap();
    id
  };

  assert_eq!(first, second);
  assert_eq!(s.list_exams().unwrap().len(), 1);
}

// ─── Subjects & questions ────────────────────────────────────────────────────

#[test]
fn subjects_and_questions_roundtrip() {
  let mut s = store();
  let mut session = s.session().unwrap();
  let exam_id = session.upsert_exam(&key(2023, 1)).unwrap();
  let subject_id = session.insert_subject(exam_id, "항해").unwrap();

  let mut with_image = question(2, AnswerKey::Unknown);
  with_image.image_ref = Some("@fig2.png".into());
  session.insert_question(subject_id, &question(1, AnswerKey::D)).unwrap();
  session.insert_question(subject_id, &with_image).unwrap();
  session.commit().unwrap();

  let detail = s.exam_detail(&key(2023, 1)).unwrap();
  assert_eq!(detail.exam.id, exam_id);
  assert_eq!(detail.subjects.len(), 1);
  assert_eq!(detail.subjects[0].subject.name, "항해");

  let qs = &detail.subjects[0].questions;
  assert_eq!(qs.len(), 2);
  assert_eq!(qs[0].number, 1);
  assert_eq!(qs[0].correct_answer, AnswerKey::D);
  assert_eq!(qs[0].option_c, None);
  assert_eq!(qs[1].correct_answer, AnswerKey::Unknown);
  assert_eq!(qs[1].image_ref.as_deref(), Some("@fig2.png"));
}

#[test]
fn subject_inserts_are_not_deduplicated() {
  let mut s = store();
  let mut session = s.session().unwrap();
  let exam_id = session.upsert_exam(&key(2023, 1)).unwrap();
  let a = session.insert_subject(exam_id, "항해").unwrap();
  let b = session.insert_subject(exam_id, "항해").unwrap();
  session.commit().unwrap();

  assert_ne!(a, b);
  assert_eq!(s.subjects_for_exam(exam_id).unwrap().len(), 2);
}

#[test]
fn clear_subjects_cascades_to_questions() {
  let mut s = store();
  let mut session = s.session().unwrap();
  let exam_id = session.upsert_exam(&key(2023, 1)).unwrap();
  let keep_exam = session.upsert_exam(&key(2023, 2)).unwrap();
  for name in ["항해", "운용"] {
    let subject_id = session.insert_subject(exam_id, name).unwrap();
    session.insert_question(subject_id, &question(1, AnswerKey::A)).unwrap();
  }
  let kept = session.insert_subject(keep_exam, "법규").unwrap();
  session.insert_question(kept, &question(1, AnswerKey::B)).unwrap();

  assert_eq!(session.clear_subjects(exam_id).unwrap(), 2);
  session.commit().unwrap();

  assert_eq!(s.counts().unwrap(), TableCounts {
    exams:     2,
    subjects:  1,
    questions: 1,
  });
}

#[test]
fn subject_requires_live_exam() {
  let mut s = store();
  let mut session = s.session().unwrap();
  let err = session.insert_subject(9999, "orphan").unwrap_err();
  assert!(matches!(err, Error::Database(_)));
  assert!(!err.is_fatal(), "constraint violations are per-record");
}

// ─── Transaction scope ───────────────────────────────────────────────────────

#[test]
fn rollback_discards_every_write() {
  let mut s = store();
  let mut session = s.session().unwrap();
  let exam_id = session.upsert_exam(&key(2023, 1)).unwrap();
  let subject_id = session.insert_subject(exam_id, "항해").unwrap();
  session.insert_question(subject_id, &question(1, AnswerKey::A)).unwrap();
  session.rollback().unwrap();

  assert_eq!(s.counts().unwrap(), TableCounts::default());
}

#[test]
fn dropped_session_rolls_back() {
  let mut s = store();
  {
    let mut session = s.session().unwrap();
    session.upsert_exam(&key(2023, 1)).unwrap();
  }
  assert_eq!(s.counts().unwrap().exams, 0);
}

// ─── Reads ───────────────────────────────────────────────────────────────────

#[test]
fn find_exam_missing_returns_none() {
  let s = store();
  assert!(s.find_exam(&key(1999, 1)).unwrap().is_none());
  assert!(matches!(
    s.exam_detail(&key(1999, 1)),
    Err(Error::ExamNotFound(k)) if k == key(1999, 1)
  ));
}

#[test]
fn file_store_persists_after_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("exam.db");

  {
    let mut s = SqliteStore::open(&path).unwrap();
    let mut session = s.session().unwrap();
    session.upsert_exam(&key(2021, 3)).unwrap();
    session.commit().unwrap();
  }

  let s = SqliteStore::open(&path).unwrap();
  let exam = s.find_exam(&key(2021, 3)).unwrap().unwrap();
  assert_eq!(exam.key.inning, 3);
}

#[test]
fn open_on_non_database_file_is_fatal() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("not-a.db");
  std::fs::write(&path, vec![b'x'; 4096]).unwrap();

  let err = SqliteStore::open(&path).err().expect("open should fail");
  assert!(err.is_fatal(), "{err}");
}
