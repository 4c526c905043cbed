//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Patch Android build configuration files in place
#[derive(Parser, Debug)]
#[command(name = "buildpatch")]
#[command(author, version, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// How a patched file is written back
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteArgs {
    /// Print a diff of the change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Keep a copy of the original as `<file>.bak`
    #[arg(long, env = "BUILDPATCH_BACKUP")]
    pub backup: bool,

    /// Write the result to this path instead of over the input
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Set a `key=value` property line
    ///
    /// Every line whose trimmed text starts with `KEY=` is replaced. Keys that
    /// are not present are left absent.
    ///
    /// Examples:
    ///   buildpatch set-prop gradle.properties --key android.enableJetifier --value false
    ///   buildpatch set-prop gradle.properties --key hermesEnabled --value true --note "needed by RN 0.75"
    SetProp {
        /// Properties file to patch
        file: PathBuf,

        /// Property key, without the `=`
        #[arg(long)]
        key: String,

        /// New value
        #[arg(long)]
        value: String,

        /// Comment line emitted after the property
        #[arg(long)]
        note: Option<String>,

        #[command(flatten)]
        write: WriteArgs,
    },

    /// Replace lines that start with a prefix
    ///
    /// With no --with lines, matching lines are deleted.
    Rewrite {
        /// File to patch
        file: PathBuf,

        /// Literal prefix matched against each trimmed line
        #[arg(long)]
        prefix: String,

        /// Replacement line (repeat for several lines)
        #[arg(long = "with", value_name = "LINE")]
        replacement: Vec<String>,

        #[command(flatten)]
        write: WriteArgs,
    },

    /// Remove a block between a start marker and an end marker
    ///
    /// The end marker itself is kept. Repeat --start to give fallback
    /// markers in priority order. Markers accept \n, \t, \\ and \u{XXXX}
    /// escapes.
    ///
    /// Examples:
    ///   buildpatch strip build.gradle --start '// mirrors' --end '}\n\n// plugins'
    Strip {
        /// File to patch
        file: PathBuf,

        /// Start marker candidate (repeatable, first found wins)
        #[arg(long = "start", value_name = "MARKER", required = true)]
        starts: Vec<String>,

        /// End marker, kept in the output
        #[arg(long, value_name = "MARKER")]
        end: String,

        #[command(flatten)]
        write: WriteArgs,
    },

    /// Generate a build script from a template
    Render {
        /// File to write
        output: PathBuf,

        /// Template file to render instead of a built-in one
        #[arg(long, value_name = "PATH", conflicts_with = "builtin")]
        template: Option<PathBuf>,

        /// Built-in template name
        #[arg(long, default_value = "react-native-root")]
        builtin: String,

        /// Placeholder value as NAME=VALUE (repeatable)
        #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
        vars: Vec<(String, String)>,

        /// Print a diff against the current file without writing
        #[arg(long)]
        dry_run: bool,

        /// Keep a copy of the original as `<file>.bak`
        #[arg(long, env = "BUILDPATCH_BACKUP")]
        backup: bool,
    },

    /// Apply every patch listed in a recipe file
    ///
    /// The recipe may be TOML, JSON or YAML. All files are patched in
    /// memory first; nothing is written if any patch fails.
    Apply {
        /// Recipe file
        recipe: PathBuf,

        /// Directory recipe paths are relative to (defaults to the recipe's directory)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,

        /// Print diffs without writing anything
        #[arg(long)]
        dry_run: bool,

        /// Keep a copy of each original as `<file>.bak`
        #[arg(long, env = "BUILDPATCH_BACKUP")]
        backup: bool,

        /// Output a JSON report for CI
        #[arg(long)]
        json: bool,
    },
}

fn parse_var(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got {raw:?}")),
    }
}
