//! Per-file outcomes and the run summary.

use std::{collections::HashSet, fmt, path::PathBuf};

use chrono::{DateTime, Utc};
use exam_core::ExamId;
use uuid::Uuid;

// ─── Per-file outcome ────────────────────────────────────────────────────────

/// Why a file was skipped without writing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
  /// The containing directory does not follow the sitting naming convention.
  PathConvention,
  /// The bytes decode under neither UTF-8 nor CP949, or are not JSON.
  Decode,
  /// The document lacks the subject/question shape.
  MissingStructure,
}

/// Rows written for one imported file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriteStats {
  pub exam_id:          ExamId,
  pub subjects:         usize,
  pub questions:        usize,
  /// Nameless subject entries that were dropped.
  pub subjects_skipped: usize,
  /// Pre-existing subjects removed under the replace policy.
  pub subjects_cleared: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
  Imported(WriteStats),
  Skipped(SkipReason),
  /// A non-fatal error; rows written before it stay in the run transaction.
  Failed(String),
}

// ─── Run summary ─────────────────────────────────────────────────────────────

/// How the run transaction was finalised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
  Committed,
  RolledBack,
}

/// Whether anything was skipped, for the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
  Clean,
  CompletedWithSkips,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
  pub run_id:                    Uuid,
  pub started_at:                DateTime<Utc>,
  pub finished_at:               Option<DateTime<Utc>>,
  pub disposition:               Option<Disposition>,
  pub files_seen:                usize,
  pub files_imported:            usize,
  pub skipped_path_convention:   usize,
  pub skipped_decode:            usize,
  pub skipped_missing_structure: usize,
  pub files_failed:              usize,
  pub walk_errors:               usize,
  pub subjects_written:          usize,
  pub subjects_skipped:          usize,
  pub subjects_cleared:          usize,
  pub questions_written:         usize,
  pub failed_paths:              Vec<PathBuf>,
  exams:                         HashSet<ExamId>,
}

impl RunSummary {
  pub fn new() -> Self {
    Self {
      run_id:                    Uuid::new_v4(),
      started_at:                Utc::now(),
      finished_at:               None,
      disposition:               None,
      files_seen:                0,
      files_imported:            0,
      skipped_path_convention:   0,
      skipped_decode:            0,
      skipped_missing_structure: 0,
      files_failed:              0,
      walk_errors:               0,
      subjects_written:          0,
      subjects_skipped:          0,
      subjects_cleared:          0,
      questions_written:         0,
      failed_paths:              Vec::new(),
      exams:                     HashSet::new(),
    }
  }

  pub fn record(&mut self, path: PathBuf, outcome: &FileOutcome) {
    self.files_seen += 1;
    match outcome {
      FileOutcome::Imported(stats) => {
        self.files_imported += 1;
        self.subjects_written += stats.subjects;
        self.subjects_skipped += stats.subjects_skipped;
        self.subjects_cleared += stats.subjects_cleared;
        self.questions_written += stats.questions;
        self.exams.insert(stats.exam_id);
      }
      FileOutcome::Skipped(SkipReason::PathConvention) => {
        self.skipped_path_convention += 1
      }
      FileOutcome::Skipped(SkipReason::Decode) => self.skipped_decode += 1,
      FileOutcome::Skipped(SkipReason::MissingStructure) => {
        self.skipped_missing_structure += 1
      }
      FileOutcome::Failed(_) => {
        self.files_failed += 1;
        self.failed_paths.push(path);
      }
    }
  }

  pub(crate) fn finish(&mut self, disposition: Disposition) {
    self.finished_at = Some(Utc::now());
    self.disposition = Some(disposition);
  }

  /// Distinct exams written to during the run.
  pub fn exams_touched(&self) -> usize { self.exams.len() }

  pub fn files_skipped(&self) -> usize {
    self.skipped_path_convention + self.skipped_decode + self.skipped_missing_structure
  }

  pub fn status(&self) -> RunStatus {
    if self.files_skipped() + self.files_failed + self.walk_errors + self.subjects_skipped
      == 0
    {
      RunStatus::Clean
    } else {
      RunStatus::CompletedWithSkips
    }
  }
}

impl Default for RunSummary {
  fn default() -> Self { Self::new() }
}

impl fmt::Display for RunSummary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let disposition = match self.disposition {
      Some(Disposition::Committed) => "committed",
      Some(Disposition::RolledBack) => "rolled back",
      None => "in progress",
    };
    let elapsed = self
      .finished_at
      .map(|end| (end - self.started_at).num_milliseconds())
      .unwrap_or_default();

    writeln!(f, "run {} {disposition} in {elapsed} ms", self.run_id)?;
    writeln!(
      f,
      "  files:     {} seen, {} imported, {} failed",
      self.files_seen, self.files_imported, self.files_failed
    )?;
    writeln!(
      f,
      "  skipped:   {} path convention, {} undecodable, {} missing structure",
      self.skipped_path_convention, self.skipped_decode, self.skipped_missing_structure
    )?;
    writeln!(
      f,
      "  rows:      {} exams, {} subjects ({} nameless skipped, {} replaced), {} questions",
      self.exams_touched(),
      self.subjects_written,
      self.subjects_skipped,
      self.subjects_cleared,
      self.questions_written
    )?;
    for path in &self.failed_paths {
      writeln!(f, "  failed:    {}", path.display())?;
    }
    if self.walk_errors > 0 {
      writeln!(f, "  unreadable directory entries: {}", self.walk_errors)?;
    }
    Ok(())
  }
}
