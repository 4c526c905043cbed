//! buildpatch CLI
//!
//! Patches Android build configuration files: property toggles, line
//! rewrites, marker-delimited block removal and templated build scripts.

mod cli;
mod commands;
mod error;
mod escape;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    // A subscriber may already be installed when embedded in tests
    let _ = tracing::subscriber::set_global_default(subscriber);
    tracing::debug!("Verbose mode enabled");

    execute_command(cli.command)
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::SetProp {
            file,
            key,
            value,
            note,
            write,
        } => commands::run_set_prop(&file, &key, &value, note.as_deref(), &write),
        Commands::Rewrite {
            file,
            prefix,
            replacement,
            write,
        } => commands::run_rewrite(&file, &prefix, &replacement, &write),
        Commands::Strip {
            file,
            starts,
            end,
            write,
        } => commands::run_strip(&file, &starts, &end, &write),
        Commands::Render {
            output,
            template,
            builtin,
            vars,
            dry_run,
            backup,
        } => commands::run_render(&output, template.as_deref(), &builtin, &vars, dry_run, backup),
        Commands::Apply {
            recipe,
            root,
            dry_run,
            backup,
            json,
        } => commands::run_apply(&recipe, root.as_deref(), dry_run, backup, json),
    }
}
