//! Running one operation over many files.
//!
//! Each file is handled on its own: a failure is logged and recorded in the
//! report, and the run moves on unless asked to stop at the first failure.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

/// All `*.json` files under `root`, sorted. A file given directly is
/// returned as is, whatever its extension.
pub fn json_files(root: &Path) -> io::Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Ok(vec![root.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && is_json(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

pub(crate) fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: usize,
    pub failures: Vec<BatchFailure>,
    /// Files left unprocessed after an early stop.
    pub skipped: usize,
}

impl BatchReport {
    pub fn processed(&self) -> usize {
        self.succeeded + self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.skipped == 0
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processed, {} failed",
            self.processed(),
            self.failures.len()
        )?;
        if self.skipped > 0 {
            write!(f, ", {} skipped", self.skipped)?;
        }
        Ok(())
    }
}

/// Applies `op` to each file. With `fail_fast` the run stops after the
/// first failure.
pub fn run<T, E, F>(files: &[PathBuf], fail_fast: bool, mut op: F) -> BatchReport
where
    E: fmt::Display,
    F: FnMut(&Path) -> Result<T, E>,
{
    let mut report = BatchReport::default();
    for (i, path) in files.iter().enumerate() {
        match op(path) {
            Ok(_) => {
                debug!(path = %path.display(), "ok");
                report.succeeded += 1;
            }
            Err(err) => {
                let message = format!("{err:#}");
                warn!(path = %path.display(), error = %message, "failed");
                report.failures.push(BatchFailure {
                    path: path.clone(),
                    message,
                });
                if fail_fast {
                    report.skipped = files.len() - i - 1;
                    break;
                }
            }
        }
    }
    report
}
