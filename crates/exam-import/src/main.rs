//! `exam-import` binary.
//!
//! Reads `exam-import.toml` (or the path given with `--config`), applies
//! `EXAM_IMPORT_*` environment variables and command-line overrides, and
//! either runs an import or prints one stored exam.
//!
//! Exit codes: `0` clean run, `2` run completed but some files or subjects
//! were skipped, `1` fatal error (all writes rolled back) or bad setup.
//!
//! ```
//! exam-import run --root ./exam --database exam.db
//! exam-import show --license 항해사 --grade 6급 --year 2023 --inning 1
//! ```

use std::{path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use exam_core::ExamKey;
use exam_import::{
  ImportConfig, ReimportPolicy, RunStatus, run_import, show::ExamResponse,
};
use exam_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Import exam documents into the exam store")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "exam-import.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Walk the exam tree and import every document in one transaction.
  Run {
    /// Root of the `<licence>/<sitting>/*.json` tree.
    #[arg(long)]
    root:     Option<PathBuf>,
    /// SQLite database file.
    #[arg(long)]
    database: Option<PathBuf>,
    /// How to treat subjects already stored for a re-imported exam.
    #[arg(long, value_enum)]
    reimport: Option<ReimportPolicy>,
    /// Roll back at the end instead of committing.
    #[arg(long)]
    dry_run:  bool,
  },
  /// Print one stored exam as JSON.
  Show {
    #[arg(long)]
    license:  String,
    /// Grade label, e.g. `6급`.
    #[arg(long)]
    grade:    String,
    #[arg(long)]
    year:     i32,
    #[arg(long)]
    inning:   i32,
    #[arg(long)]
    database: Option<PathBuf>,
  },
}

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  match try_main() {
    Ok(code) => code,
    Err(err) => {
      tracing::error!("{err:#}");
      ExitCode::from(1)
    }
  }
}

fn try_main() -> anyhow::Result<ExitCode> {
  let cli = Cli::parse();

  let mut config = ImportConfig::load(&cli.config)
    .with_context(|| format!("failed to load config from {:?}", cli.config))?;

  match cli.command {
    Command::Run { root, database, reimport, dry_run } => {
      if let Some(root) = root {
        config.root = root;
      }
      if let Some(database) = database {
        config.database = database;
      }
      if let Some(reimport) = reimport {
        config.reimport = reimport;
      }
      config.dry_run |= dry_run;

      let summary = run_import(&config).context("import aborted")?;
      print!("{summary}");

      Ok(match summary.status() {
        RunStatus::Clean => ExitCode::SUCCESS,
        RunStatus::CompletedWithSkips => ExitCode::from(2),
      })
    }

    Command::Show { license, grade, year, inning, database } => {
      let database = database.unwrap_or(config.database);
      let store = SqliteStore::open(&database)
        .with_context(|| format!("failed to open store at {database:?}"))?;

      let key = ExamKey { license_type: license, grade, year, inning };
      let detail = store.exam_detail(&key)?;
      let body = serde_json::to_string_pretty(&ExamResponse::from(&detail))?;
      println!("{body}");
      Ok(ExitCode::SUCCESS)
    }
  }
}
