//! Import configuration.
//!
//! Layered like the rest of our services: optional TOML file, then
//! `EXAM_IMPORT_*` environment variables, then command-line overrides applied
//! by the binary.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::Result;

/// What to do with subjects already stored for an exam being imported again.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ReimportPolicy {
  /// Insert alongside existing rows; a second run duplicates subjects and
  /// questions (the exam row itself is never duplicated).
  #[default]
  Append,
  /// Delete an exam's existing subjects the first time a run touches it.
  Replace,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
  /// Root of the `<licence>/<sitting>/*.json` tree.
  pub root:         PathBuf,
  /// SQLite database file.
  pub database:     PathBuf,
  /// Document extensions to import, compared case-insensitively.
  pub extensions:   Vec<String>,
  pub image_marker: char,
  pub reimport:     ReimportPolicy,
  /// Run the whole pipeline, then roll back instead of committing.
  pub dry_run:      bool,
}

impl Default for ImportConfig {
  fn default() -> Self {
    Self {
      root:         PathBuf::from("exam"),
      database:     PathBuf::from("exam.db"),
      extensions:   vec!["json".to_owned()],
      image_marker: exam_document::DEFAULT_IMAGE_MARKER,
      reimport:     ReimportPolicy::default(),
      dry_run:      false,
    }
  }
}

impl ImportConfig {
  /// Load from `file` (if it exists) and the environment.
  pub fn load(file: &Path) -> Result<Self> {
    Self::load_from(file, Self::environment())
  }

  /// The `EXAM_IMPORT_*` layer. `extensions` takes a comma-separated list.
  fn environment() -> config::Environment {
    config::Environment::with_prefix("EXAM_IMPORT")
      .try_parsing(true)
      .list_separator(",")
      .with_list_parse_key("extensions")
  }

  fn load_from(file: &Path, env: config::Environment) -> Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(env)
      .build()?;
    Ok(settings.try_deserialize()?)
  }

  pub fn is_document(&self, path: &Path) -> bool {
    path
      .extension()
      .and_then(|e| e.to_str())
      .is_some_and(|ext| {
        self.extensions.iter().any(|want| want.eq_ignore_ascii_case(ext))
      })
  }
}
