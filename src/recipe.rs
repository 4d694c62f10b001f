//! Locating the make recipe that defines the `deps-report` action.

use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ReportError, XResult};

/// Recipe bundled into the binary at build time.
pub const EMBEDDED_RECIPE: &[u8] =
  include_bytes!(concat!(env!("CARGO_MANIFEST_DIR"), "/recipe/Makefile"));

/// Where a run gets its recipe from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RecipeSource {
  /// [`EMBEDDED_RECIPE`], written to a fresh temporary file for each run.
  #[default]
  Embedded,
  /// `Makefile` in the current working directory.
  WorkingDir,
}

/// A recipe ready to hand to make. A `Temporary` recipe is deleted when dropped.
#[derive(Debug)]
pub enum Recipe {
  Temporary(NamedTempFile),
  External(PathBuf),
}

impl RecipeSource {
  pub fn resolve(&self) -> XResult<Recipe> {
    match self {
      RecipeSource::Embedded => materialize(EMBEDDED_RECIPE),
      RecipeSource::WorkingDir => {
        let cwd = env::current_dir().map_err(ReportError::WorkingDir)?;
        Ok(Recipe::External(cwd.join("Makefile")))
      }
    }
  }
}

impl Recipe {
  pub fn path(&self) -> &Path {
    match self {
      Recipe::Temporary(file) => file.path(),
      Recipe::External(path) => path,
    }
  }
}

fn materialize(contents: &[u8]) -> XResult<Recipe> {
  let mut file = tempfile::Builder::new()
    .prefix("go-dep-report-")
    .suffix(".mk")
    .tempfile()
    .map_err(ReportError::Recipe)?;
  file.write_all(contents).map_err(ReportError::Recipe)?;
  file.flush().map_err(ReportError::Recipe)?;
  debug!(path = %file.path().display(), "wrote embedded recipe");
  Ok(Recipe::Temporary(file))
}
