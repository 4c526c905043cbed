//! Single-file patch commands
//!
//! Each command builds one [`Patch`] and runs it through the same
//! read, patch, write-or-preview flow that `apply` uses per file.

use std::collections::BTreeMap;
use std::path::Path;

use buildpatch_content::{MatcherSpec, Patch, RuleSpec, StartMarkers, TemplateSource};
use buildpatch_fs::{WriteOptions, io};

use super::report::{PatchedFile, print_diff, print_summary};
use crate::cli::WriteArgs;
use crate::error::Result;
use crate::escape::unescape;

/// Run the set-prop command
pub fn run_set_prop(
    file: &Path,
    key: &str,
    value: &str,
    note: Option<&str>,
    write: &WriteArgs,
) -> Result<()> {
    let patch = Patch::SetProperty {
        key: key.to_string(),
        value: value.to_string(),
        note: note.map(str::to_string),
    };
    run_single(file, &patch, write)
}

/// Run the rewrite command
///
/// An empty `replacement` deletes the matching lines.
pub fn run_rewrite(file: &Path, prefix: &str, replacement: &[String], write: &WriteArgs) -> Result<()> {
    let patch = Patch::RewriteLines {
        rules: vec![RuleSpec {
            matcher: MatcherSpec::Prefix(prefix.to_string()),
            replace: Some(replacement.to_vec()),
        }],
    };
    run_single(file, &patch, write)
}

/// Run the strip command
pub fn run_strip(file: &Path, starts: &[String], end: &str, write: &WriteArgs) -> Result<()> {
    let starts = starts
        .iter()
        .map(|s| unescape(s))
        .collect::<Result<Vec<_>>>()?;
    let patch = Patch::RemoveBlock {
        start: StartMarkers::Many(starts),
        end: unescape(end)?,
    };
    run_single(file, &patch, write)
}

/// Run the render command
///
/// The output file may not exist yet; a dry run then diffs against empty text.
pub fn run_render(
    output: &Path,
    template: Option<&Path>,
    builtin: &str,
    vars: &[(String, String)],
    dry_run: bool,
    backup: bool,
) -> Result<()> {
    let template = match template {
        Some(path) => TemplateSource::Inline(io::read_text(path)?),
        None => TemplateSource::Builtin(builtin.to_string()),
    };
    let patch = Patch::Render {
        template,
        vars: vars.iter().cloned().collect::<BTreeMap<_, _>>(),
    };

    let file = PatchedFile::load_and_patch(output, output, true, |text| patch.apply(text))?;
    finish(&file, dry_run, backup)
}

fn run_single(file: &Path, patch: &Patch, write: &WriteArgs) -> Result<()> {
    let target = write.output.as_deref().unwrap_or(file);
    tracing::debug!(source = %file.display(), target = %target.display(), %patch, "running patch");

    let patched = PatchedFile::load_and_patch(file, target, false, |text| patch.apply(text))?;
    finish(&patched, write.dry_run, write.backup)
}

fn finish(file: &PatchedFile, dry_run: bool, backup: bool) -> Result<()> {
    if dry_run {
        print_diff(file);
        print_summary(&file.report(false), true);
        return Ok(());
    }

    let written = file.commit(WriteOptions::with_backup(backup))?;
    print_summary(&file.report(written), false);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const PROPS: &str = "org.gradle.jvmargs=-Xmx2048m\nandroid.useAndroidX=true\nandroid.enableJetifier=true\n";

    fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn set_prop_rewrites_in_place() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "gradle.properties", PROPS);

        run_set_prop(&path, "android.enableJetifier", "false", None, &WriteArgs::default()).unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "org.gradle.jvmargs=-Xmx2048m\nandroid.useAndroidX=true\nandroid.enableJetifier=false\n"
        );
    }

    #[test]
    fn dry_run_leaves_file_alone() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "gradle.properties", PROPS);
        let write = WriteArgs {
            dry_run: true,
            ..WriteArgs::default()
        };

        run_set_prop(&path, "android.enableJetifier", "false", None, &write).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), PROPS);
    }

    #[test]
    fn output_flag_keeps_input() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "gradle.properties", PROPS);
        let out = temp.path().join("out/gradle.properties");
        let write = WriteArgs {
            output: Some(out.clone()),
            ..WriteArgs::default()
        };

        run_rewrite(&path, "android.useAndroidX=", &[], &write).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), PROPS);
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "org.gradle.jvmargs=-Xmx2048m\nandroid.enableJetifier=true\n"
        );
    }

    #[test]
    fn strip_unescapes_markers() {
        let temp = TempDir::new().unwrap();
        let path = write_file(
            &temp,
            "build.gradle",
            "a\n// mirrors\nrepos {\n}\n\n// plugins\nb\n",
        );

        run_strip(
            &path,
            &["// missing".to_string(), "// mirrors".to_string()],
            r"}\n\n// plugins",
            &WriteArgs::default(),
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "a\n}\n\n// plugins\nb\n");
    }

    #[test]
    fn strip_missing_marker_fails_without_writing() {
        let temp = TempDir::new().unwrap();
        let path = write_file(&temp, "build.gradle", "a\nb\n");

        let err = run_strip(&path, &["// x".to_string()], "}", &WriteArgs::default()).unwrap_err();

        assert!(matches!(err, CliError::Patch { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\n");
    }

    #[test]
    fn render_inline_template_creates_file() {
        let temp = TempDir::new().unwrap();
        let template = write_file(&temp, "root.gradle.tmpl", "    ext {\n        v = \"__V__\"\n    }\n");
        let output = temp.path().join("android/build.gradle");

        run_render(
            &output,
            Some(&template),
            "react-native-root",
            &[("V".to_string(), "1".to_string())],
            false,
            false,
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "ext {\n    v = \"1\"\n}\n");
    }

    #[test]
    fn render_dry_run_does_not_create_file() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("build.gradle");

        run_render(&output, None, "react-native-root", &[], true, false).unwrap();

        assert!(!output.exists());
    }
}
