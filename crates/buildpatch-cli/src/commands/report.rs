//! Patched-file results, diffs and reports

use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

use buildpatch_content::{Edit, FilePatch, TextChanges, unified_diff};
use buildpatch_fs::{WriteOptions, compute_content_checksum, io};

use crate::error::{CliError, Result};

/// Result of patching one file in memory, before anything is written
#[derive(Debug)]
pub struct PatchedFile {
    /// File the original text came from
    pub source: PathBuf,
    /// File the patched text goes to
    pub target: PathBuf,
    pub original: String,
    pub patched: String,
    pub edits: Vec<Edit>,
}

/// Per-file summary for terminal and JSON output
#[derive(Debug, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub changed: bool,
    pub written: bool,
    pub edits: usize,
    #[serde(flatten)]
    pub changes: TextChanges,
    pub checksum_before: String,
    pub checksum_after: String,
}

impl PatchedFile {
    /// Read `source` and run `patch` over it.
    ///
    /// A missing source is treated as empty when `allow_missing` is set,
    /// which is how rendered files are created for the first time.
    pub fn load_and_patch(
        source: &Path,
        target: &Path,
        allow_missing: bool,
        patch: impl FnOnce(&str) -> buildpatch_content::Result<(String, Vec<Edit>)>,
    ) -> Result<Self> {
        let original = if allow_missing && !source.exists() {
            tracing::debug!(path = %source.display(), "source missing, starting from empty text");
            String::new()
        } else {
            io::read_text(source)?
        };

        let (patched, edits) = patch(&original).map_err(|e| CliError::patch(source, e))?;

        Ok(Self {
            source: source.to_path_buf(),
            target: target.to_path_buf(),
            original,
            patched,
            edits,
        })
    }

    /// Patch a recipe entry resolved against `root`.
    pub fn from_recipe(root: &Path, file: &FilePatch) -> Result<Self> {
        let path = root.join(&file.path);
        Self::load_and_patch(&path, &path, file.creates_file(), |text| file.apply(text))
    }

    pub fn is_changed(&self) -> bool {
        self.original != self.patched
    }

    /// Write the patched text unless it would leave the target as it was.
    ///
    /// Returns whether the file was written.
    pub fn commit(&self, options: WriteOptions) -> Result<bool> {
        if !self.is_changed() && self.source == self.target {
            tracing::debug!(path = %self.target.display(), "content unchanged, skipping write");
            return Ok(false);
        }
        io::write_text(&self.target, &self.patched, options)?;
        tracing::debug!(path = %self.target.display(), bytes = self.patched.len(), "wrote file");
        Ok(true)
    }

    pub fn report(&self, written: bool) -> FileReport {
        FileReport {
            path: self.target.clone(),
            changed: self.is_changed(),
            written,
            edits: self.edits.len(),
            changes: TextChanges::compute(&self.original, &self.patched),
            checksum_before: compute_content_checksum(&self.original),
            checksum_after: compute_content_checksum(&self.patched),
        }
    }

    pub fn diff(&self) -> String {
        unified_diff(
            &self.original,
            &self.patched,
            &self.source.display().to_string(),
            &self.target.display().to_string(),
        )
    }
}

/// Print a unified diff with colored hunks
pub fn print_diff(file: &PatchedFile) {
    let diff = file.diff();
    if diff.is_empty() {
        println!(
            "{} {} (no changes)",
            "OK".green().bold(),
            file.target.display()
        );
        return;
    }

    for line in diff.lines() {
        let styled = if line.starts_with("+++") || line.starts_with("---") {
            line.bold()
        } else if line.starts_with('+') {
            line.green()
        } else if line.starts_with('-') {
            line.red()
        } else if line.starts_with("@@") {
            line.cyan()
        } else {
            line.normal()
        };
        println!("{styled}");
    }
}

/// Print a one-line summary of a file report
pub fn print_summary(report: &FileReport, dry_run: bool) {
    let stats = format!(
        "{} edit(s), +{} -{}",
        report.edits, report.changes.inserted, report.changes.deleted
    );

    if !report.changed {
        println!(
            "{} {} ({})",
            "Unchanged".yellow().bold(),
            report.path.display(),
            stats
        );
    } else if dry_run {
        println!(
            "{} {} ({})",
            "Would patch".cyan().bold(),
            report.path.display(),
            stats
        );
    } else {
        println!(
            "{} {} ({})",
            "Patched".green().bold(),
            report.path.display(),
            stats
        );
    }
}
