//! Exam identity from the directory-naming convention.
//!
//! Layout: `<root>/<licenseType>/<gradeLetter><gradeDigits>_<YYYY>_<II>/`.
//! The pattern is anchored at the start of the directory name only, so a
//! suffix after the inning (`A6_2023_01_backup`) still matches.

use std::{path::Path, sync::LazyLock};

use regex::Regex;

use crate::ExamKey;

static SITTING_DIR: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^([A-Z])(\d+)_(\d{4})_(\d{2})").expect("sitting-directory regex")
});

/// Parse the exam key from the directory that holds a sitting's documents.
///
/// Returns `None` when the directory name does not follow the convention or
/// there is no parent segment to read the licence type from. That is a
/// skip, not an error.
pub fn exam_key_from_dir(dir: &Path) -> Option<ExamKey> {
  let dir_name = dir.file_name()?.to_str()?;
  let license_type = dir.parent()?.file_name()?.to_str()?;

  let caps = SITTING_DIR.captures(dir_name)?;
  let year = caps[3].parse().ok()?;
  let inning = caps[4].parse().ok()?;

  Some(ExamKey {
    license_type: license_type.to_owned(),
    grade: format!("{}급", &caps[2]),
    year,
    inning,
  })
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;

  #[test]
  fn navigator_grade_six() {
    let dir: PathBuf = ["exam", "항해사", "A6_2023_01"].iter().collect();
    let key = exam_key_from_dir(&dir).unwrap();
    assert_eq!(key, ExamKey {
      license_type: "항해사".into(),
      grade:        "6급".into(),
      year:         2023,
      inning:       1,
    });
  }

  #[test]
  fn grade_letter_is_dropped() {
    let dir: PathBuf = ["exam", "기관사", "B4_2022_02"].iter().collect();
    let key = exam_key_from_dir(&dir).unwrap();
    assert_eq!(key.license_type, "기관사");
    assert_eq!(key.grade, "4급");
    assert_eq!(key.year, 2022);
    assert_eq!(key.inning, 2);
  }

  #[test]
  fn multi_digit_grade_and_trailing_suffix() {
    let dir: PathBuf = ["root", "소형선박조종사", "C12_2021_04_old"]
      .iter()
      .collect();
    let key = exam_key_from_dir(&dir).unwrap();
    assert_eq!(key.grade, "12급");
    assert_eq!(key.inning, 4);
  }

  #[test]
  fn non_matching_names_yield_none() {
    for name in ["a6_2023_01", "A6-2023-01", "A6_23_01", "A6_2023_1", "misc"] {
      let dir = Path::new("exam").join("항해사").join(name);
      assert_eq!(exam_key_from_dir(&dir), None, "{name}");
    }
  }

  #[test]
  fn missing_parent_segment_yields_none() {
    assert_eq!(exam_key_from_dir(Path::new("A6_2023_01")), None);
  }
}
