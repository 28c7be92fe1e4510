//! Answer-label normalisation.
//!
//! Source documents mark the correct option with a Korean ordinal syllable
//! rather than a letter. The lookup table below is fixed: `사` and `아` are
//! aliases that appear in the corpus and map to `d` and `a` respectively,
//! which is not their position in the syllable order.

use strum::{Display, EnumString, IntoStaticStr};

use crate::{Error, Result};

/// Canonical option key persisted in `questions.correct_answer`.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum AnswerKey {
  A,
  B,
  C,
  D,
  /// The source label was absent or not in the table.
  Unknown,
}

impl AnswerKey {
  /// Column text: `a`, `b`, `c`, `d` or `unknown`.
  pub fn as_str(self) -> &'static str { self.into() }

  /// Decode the stored column text back into a key.
  pub fn from_stored(s: &str) -> Result<Self> {
    s.parse().map_err(|_| Error::InvalidAnswerKey(s.to_owned()))
  }
}

const ANSWER_TABLE: &[(&str, AnswerKey)] = &[
  ("가", AnswerKey::A),
  ("나", AnswerKey::B),
  ("다", AnswerKey::C),
  ("라", AnswerKey::D),
  ("사", AnswerKey::D),
  ("아", AnswerKey::A),
];

/// Map a raw answer label to its canonical key.
///
/// Never fails: labels missing from the table resolve to
/// [`AnswerKey::Unknown`].
pub fn normalize_answer(label: &str) -> AnswerKey {
  // Surrounding whitespace is ignored, so " 가" is still A.
  let label = label.trim();
  ANSWER_TABLE
    .iter()
    .find(|(token, _)| *token == label)
    .map_or(AnswerKey::Unknown, |(_, key)| *key)
}
