//! Apply command implementation
//!
//! Runs every file patch in a recipe. All files are patched in memory before
//! any of them is written, so a failing patch leaves the tree untouched.

use std::collections::BTreeSet;
use std::path::Path;

use colored::Colorize;
use serde_json::json;

use buildpatch_content::Recipe;
use buildpatch_fs::{ConfigStore, WriteOptions};

use super::report::{FileReport, PatchedFile, print_diff, print_summary};
use crate::error::{CliError, Result};

/// Run the apply command
pub fn run_apply(
    recipe_path: &Path,
    root: Option<&Path>,
    dry_run: bool,
    backup: bool,
    json: bool,
) -> Result<()> {
    let recipe: Recipe = ConfigStore::new().load(recipe_path)?;
    let root = match root {
        Some(root) => root.to_path_buf(),
        None => recipe_path.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    tracing::debug!(
        recipe = %recipe_path.display(),
        root = %root.display(),
        files = recipe.files.len(),
        "loaded recipe"
    );

    check_unique_paths(&recipe)?;

    let patched = recipe
        .files
        .iter()
        .map(|file| PatchedFile::from_recipe(&root, file))
        .collect::<Result<Vec<_>>>()?;

    let mut reports: Vec<FileReport> = Vec::with_capacity(patched.len());
    for file in &patched {
        let written = if dry_run {
            false
        } else {
            file.commit(WriteOptions::with_backup(backup))?
        };
        reports.push(file.report(written));
    }

    if json {
        let output = json!({
            "dry_run": dry_run,
            "files": reports,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if patched.is_empty() {
        println!("{} Recipe lists no files.", "OK".green().bold());
        return Ok(());
    }

    for (file, report) in patched.iter().zip(&reports) {
        if dry_run {
            print_diff(file);
        }
        print_summary(report, dry_run);
    }

    let changed = reports.iter().filter(|r| r.changed).count();
    println!();
    println!(
        "{} {} of {} file(s) {}",
        "Done".green().bold(),
        changed,
        reports.len(),
        if dry_run { "would change" } else { "changed" }
    );
    Ok(())
}

fn check_unique_paths(recipe: &Recipe) -> Result<()> {
    let mut seen = BTreeSet::new();
    for file in &recipe.files {
        if !seen.insert(file.path.as_path()) {
            return Err(CliError::user(format!(
                "recipe lists {} more than once; merge its patches into one entry",
                file.path.display()
            )));
        }
    }
    Ok(())
}
