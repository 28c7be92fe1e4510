//! The import run: tree traversal, the per-file pipeline, and the single
//! run-scoped transaction.
//!
//! Per file: extract the exam key from the directory name, read and decode
//! the document, map it into records, write them. Each step's "skip" and
//! "fail" results are [`FileOutcome`] variants; only a fatal sink error
//! leaves the loop, and it rolls back the whole run.

use std::{
  collections::HashSet,
  path::{Path, PathBuf},
};

use exam_core::{ExamId, ExamKey, ExamSink, SinkError as _, exam_key_from_dir};
use exam_document::{MappedDocument, map_document, parse_document, read_text};
use exam_store_sqlite::SqliteStore;
use tracing::{error, info, info_span, warn};
use walkdir::WalkDir;

use crate::{
  Disposition, Error, FileOutcome, ImportConfig, ReimportPolicy, Result,
  RunSummary, SkipReason, WriteStats,
};

/// Open the configured database, run one import, and finalise it.
pub fn run_import(config: &ImportConfig) -> Result<RunSummary> {
  if !config.root.is_dir() {
    return Err(Error::RootMissing(config.root.clone()));
  }

  let mut store = SqliteStore::open(&config.database)
    .map_err(|e| Error::Fatal(Box::new(e)))?;
  let session = store.session().map_err(|e| Error::Fatal(Box::new(e)))?;
  Importer::new(config, session).run()
}

/// Drives one run against any [`ExamSink`]. Owns the sink until it is
/// committed or rolled back.
pub struct Importer<'cfg, S: ExamSink> {
  config:       &'cfg ImportConfig,
  sink:         S,
  summary:      RunSummary,
  /// Exams whose old subjects were already removed this run.
  cleared:      HashSet<ExamId>,
  /// Non-conforming directories already reported.
  skipped_dirs: HashSet<PathBuf>,
}

impl<'cfg, S: ExamSink> Importer<'cfg, S> {
  pub fn new(config: &'cfg ImportConfig, sink: S) -> Self {
    Self {
      config,
      sink,
      summary: RunSummary::new(),
      cleared: HashSet::new(),
      skipped_dirs: HashSet::new(),
    }
  }

  /// Traverse the tree depth-first, import every document, then commit (or
  /// roll back for a dry run).
  pub fn run(mut self) -> Result<RunSummary> {
    let span = info_span!(
      "import",
      run_id = %self.summary.run_id,
      root = %self.config.root.display(),
    );
    let _entered = span.enter();

    let walker = WalkDir::new(&self.config.root).sort_by_file_name();
    for entry in walker {
      let entry = match entry {
        Ok(entry) => entry,
        Err(err) => {
          warn!(error = %err, "unreadable directory entry");
          self.summary.walk_errors += 1;
          continue;
        }
      };
      // `path().is_file()` follows symlinks; `file_type()` would not.
      if !entry.path().is_file() || !self.config.is_document(entry.path()) {
        continue;
      }

      let path = entry.into_path();
      let outcome = match self.import_file(&path) {
        Ok(outcome) => outcome,
        Err(err) => {
          error!(
            path = %path.display(),
            error = %err,
            "fatal storage error; rolling back"
          );
          if let Err(rollback_err) = self.sink.rollback() {
            warn!(error = %rollback_err, "rollback failed");
          }
          return Err(Error::Fatal(Box::new(err)));
        }
      };
      self.summary.record(path, &outcome);
    }

    let disposition = if self.config.dry_run {
      self.sink.rollback().map_err(|e| Error::Fatal(Box::new(e)))?;
      info!("dry run: all writes rolled back");
      Disposition::RolledBack
    } else {
      self.sink.commit().map_err(|e| Error::Fatal(Box::new(e)))?;
      Disposition::Committed
    };
    self.summary.finish(disposition);

    info!(
      files = self.summary.files_seen,
      imported = self.summary.files_imported,
      skipped = self.summary.files_skipped(),
      failed = self.summary.files_failed,
      "import finished"
    );
    Ok(self.summary)
  }

  /// The per-file pipeline. `Err` is reserved for fatal sink errors.
  fn import_file(&mut self, path: &Path) -> Result<FileOutcome, S::Error> {
    let dir = path.parent().unwrap_or(Path::new(""));
    let Some(key) = exam_key_from_dir(dir) else {
      if self.skipped_dirs.insert(dir.to_path_buf()) {
        warn!(
          dir = %dir.display(),
          "skipped: directory name does not identify an exam"
        );
      }
      return Ok(FileOutcome::Skipped(SkipReason::PathConvention));
    };

    let decoded = match read_text(path) {
      Ok(decoded) => decoded,
      Err(exam_document::Error::Decode { .. }) => {
        warn!(path = %path.display(), "skipped: not decodable as UTF-8 or CP949");
        return Ok(FileOutcome::Skipped(SkipReason::Decode));
      }
      Err(err) => {
        error!(path = %path.display(), error = %err, "failed to read document");
        return Ok(FileOutcome::Failed(err.to_string()));
      }
    };
    if decoded.encoding != exam_document::TextEncoding::Utf8 {
      info!(
        path = %path.display(),
        encoding = %decoded.encoding,
        "decoded with fallback encoding"
      );
    }

    let mapped = match parse_document(&decoded.text)
      .and_then(|doc| map_document(&doc, self.config.image_marker))
    {
      Ok(mapped) => mapped,
      Err(exam_document::Error::MissingStructure(why)) => {
        warn!(
          path = %path.display(),
          reason = %why,
          "skipped: missing subject/question structure"
        );
        return Ok(FileOutcome::Skipped(SkipReason::MissingStructure));
      }
      Err(err) => {
        warn!(path = %path.display(), error = %err, "skipped: malformed document");
        return Ok(FileOutcome::Skipped(SkipReason::Decode));
      }
    };

    match self.write(path, &key, &mapped) {
      Ok(stats) => Ok(FileOutcome::Imported(stats)),
      Err(err) if err.is_fatal() => Err(err),
      Err(err) => {
        error!(
          path = %path.display(),
          error = %err,
          "failed while writing; earlier rows of this file are kept"
        );
        Ok(FileOutcome::Failed(err.to_string()))
      }
    }
  }

  fn write(
    &mut self,
    path: &Path,
    key: &ExamKey,
    mapped: &MappedDocument,
  ) -> Result<WriteStats, S::Error> {
    let exam_id = self.sink.upsert_exam(key)?;
    info!(path = %path.display(), exam = %key, exam_id, "importing");

    let mut stats = WriteStats {
      exam_id,
      subjects_skipped: mapped.skipped_subjects,
      ..WriteStats::default()
    };

    if self.config.reimport == ReimportPolicy::Replace
      && !self.cleared.contains(&exam_id)
    {
      stats.subjects_cleared = self.sink.clear_subjects(exam_id)?;
      self.cleared.insert(exam_id);
      if stats.subjects_cleared > 0 {
        info!(
          exam_id,
          removed = stats.subjects_cleared,
          "replaced previously imported subjects"
        );
      }
    }

    for subject in &mapped.subjects {
      let subject_id = self.sink.insert_subject(exam_id, &subject.name)?;
      for question in &subject.questions {
        self.sink.insert_question(subject_id, question)?;
      }
      stats.subjects += 1;
      stats.questions += subject.questions.len();
      info!(
        subject = %subject.name,
        questions = subject.questions.len(),
        "subject imported"
      );
    }

    Ok(stats)
  }
}
