use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

pub type XResult<T> = Result<T, ReportError>;

/// Reasons a report run stops. None of them are retried.
#[derive(Debug, Error)]
pub enum ReportError {
  #[error("Error getting working directory: {0}")]
  WorkingDir(#[source] io::Error),

  #[error("Error writing embedded recipe: {0}")]
  Recipe(#[source] io::Error),

  #[error("Error running make deps-report: {} is not a directory", .0.display())]
  ServiceDir(PathBuf),

  #[error("Error running make deps-report: failed to start {program}: {source}")]
  Spawn { program: String, source: io::Error },

  #[error("Error running make deps-report: {0}")]
  Build(ExitStatus),

  #[error("Error creating output directory {}: {source}", path.display())]
  OutputDir { path: PathBuf, source: io::Error },

  #[error("Error moving report: {} was not produced", .0.display())]
  MissingReport(PathBuf),

  #[error("Error moving report from {} to {}: {source}", from.display(), to.display())]
  Relocate {
    from: PathBuf,
    to: PathBuf,
    source: io::Error,
  },
}
