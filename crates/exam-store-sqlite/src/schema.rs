//! SQL schema for the exam store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS exams (
    id           INTEGER PRIMARY KEY,
    license_type TEXT    NOT NULL,
    grade        TEXT    NOT NULL,   -- e.g. '6급'
    year         INTEGER NOT NULL,
    inning       INTEGER NOT NULL,
    UNIQUE (license_type, grade, year, inning)
);

CREATE TABLE IF NOT EXISTS subjects (
    id      INTEGER PRIMARY KEY,
    exam_id INTEGER NOT NULL REFERENCES exams(id) ON DELETE CASCADE,
    name    TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS questions (
    id              INTEGER PRIMARY KEY,
    subject_id      INTEGER NOT NULL REFERENCES subjects(id) ON DELETE CASCADE,
    question_number INTEGER NOT NULL,
    question_text   TEXT    NOT NULL,
    option_a        TEXT,
    option_b        TEXT,
    option_c        TEXT,
    option_d        TEXT,
    correct_answer  TEXT    NOT NULL
                    CHECK (correct_answer IN ('a', 'b', 'c', 'd', 'unknown')),
    image_ref       TEXT
);

CREATE INDEX IF NOT EXISTS subjects_exam_idx     ON subjects(exam_id);
CREATE INDEX IF NOT EXISTS questions_subject_idx ON questions(subject_id);

PRAGMA user_version = 1;
";
