//! Produce a dependency report for a Go service and move it into an output directory.
//!
//! The report itself comes from the `deps-report` action of a make recipe. This crate
//! only runs that recipe inside the service directory and relocates the resulting
//! `deps-report.md`.

mod error;
mod recipe;

use clap::Parser;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::{debug, info};

pub use error::{ReportError, XResult};
pub use recipe::{Recipe, RecipeSource, EMBEDDED_RECIPE};

/// Name of the file the recipe leaves in the service directory.
pub const REPORT_FILE: &str = "deps-report.md";

/// Recipe target that generates the report.
pub const REPORT_ACTION: &str = "deps-report";

/// Generate a dependency report for a Go service
#[derive(Debug, Parser)]
#[command(name = "go-dep-report", version)]
pub struct Config {
  /// Go module directory to generate the report in
  #[arg(value_name = "go-service-dir", allow_hyphen_values = true)]
  pub service_dir: PathBuf,

  /// Directory the report is moved to, created if missing
  #[arg(value_name = "output-dir", allow_hyphen_values = true)]
  pub output_dir: PathBuf,

  /// Build tool program, `$MAKE` or `make`
  #[arg(skip = build_tool_from_env())]
  pub build_tool: OsString,

  #[arg(skip)]
  pub recipe: RecipeSource,

  // Anything after the output directory is accepted and ignored.
  #[arg(hide = true, num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
  ignored: Vec<OsString>,
}

impl Config {
  /// Config for a run over `service_dir`, with the build tool taken from the
  /// environment and the embedded recipe.
  pub fn new(service_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
    Self {
      service_dir: service_dir.into(),
      output_dir: output_dir.into(),
      build_tool: build_tool_from_env(),
      recipe: RecipeSource::default(),
      ignored: Vec::new(),
    }
  }

  /// Replaces the program run in place of make.
  pub fn with_build_tool(mut self, program: impl Into<OsString>) -> Self {
    self.build_tool = program.into();
    self
  }

  /// Replaces where the recipe comes from.
  pub fn with_recipe(mut self, recipe: RecipeSource) -> Self {
    self.recipe = recipe;
    self
  }
}

fn build_tool_from_env() -> OsString {
  std::env::var_os("MAKE")
    .filter(|program| !program.is_empty())
    .unwrap_or_else(|| OsString::from("make"))
}

/// Runs the whole pipeline and returns where the report ended up.
///
/// A temporary recipe lives until this function returns, whichever way it returns.
pub fn run(config: Config) -> XResult<PathBuf> {
  if !config.ignored.is_empty() {
    debug!(extra = ?config.ignored, "ignoring extra arguments");
  }
  let recipe = config.recipe.resolve()?;
  build_report(&config.build_tool, recipe.path(), &config.service_dir)?;
  prepare_output(&config.output_dir)?;
  relocate_report(&config.service_dir, &config.output_dir)
}

/// Runs `<program> -f <recipe> deps-report` inside `service_dir`.
///
/// The child writes straight to our stdout and stderr.
pub fn build_report(program: &OsStr, recipe: &Path, service_dir: &Path) -> XResult<()> {
  if !service_dir.is_dir() {
    return Err(ReportError::ServiceDir(service_dir.to_path_buf()));
  }

  info!(dir = %service_dir.display(), "running {REPORT_ACTION}");
  debug!(
    "{} -f {} {REPORT_ACTION}",
    program.to_string_lossy(),
    recipe.display()
  );

  let status = Command::new(program)
    .arg("-f")
    .arg(recipe)
    .arg(REPORT_ACTION)
    .current_dir(service_dir)
    .stdin(Stdio::null())
    .stdout(Stdio::inherit())
    .stderr(Stdio::inherit())
    .status()
    .map_err(|source| ReportError::Spawn {
      program: program.to_string_lossy().into_owned(),
      source,
    })?;

  if !status.success() {
    return Err(ReportError::Build(status));
  }
  Ok(())
}

pub fn prepare_output(output_dir: &Path) -> XResult<()> {
  debug!(dir = %output_dir.display(), "ensuring output directory");
  fs::create_dir_all(output_dir).map_err(|source| ReportError::OutputDir {
    path: output_dir.to_path_buf(),
    source,
  })
}

/// Renames the report into `output_dir`. No copy fallback across filesystems.
pub fn relocate_report(service_dir: &Path, output_dir: &Path) -> XResult<PathBuf> {
  let from = service_dir.join(REPORT_FILE);
  let to = output_dir.join(REPORT_FILE);

  match fs::rename(&from, &to) {
    Ok(()) => {
      info!(report = %to.display(), "report moved");
      Ok(to)
    }
    Err(err) if err.kind() == io::ErrorKind::NotFound && !from.exists() => {
      Err(ReportError::MissingReport(from))
    }
    Err(source) => Err(ReportError::Relocate { from, to, source }),
  }
}
