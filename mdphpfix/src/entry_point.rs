//! Shared entry point for the binary and the tests.

use crate::cli::Cli;
use crate::config::Config;
use crate::constants::DEFAULT_DOCS_DIR;
use crate::processor::FixOptions;

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Runs the fixer with the given arguments.
///
/// # Errors
///
/// Returns an error if writing to stdout fails.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Runs the fixer with the given arguments, writing output to the specified
/// writer.
///
/// This is the testable version of `run_with_args` that allows output
/// capture.
///
/// # Errors
///
/// Returns an error if writing to the output writer fails.
pub fn run_with_args_to<W: std::io::Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["mdphpfix".to_owned()];
    program_args.extend(args);
    let cli = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => {
            match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                    // Let clap print help/version as intended, captured by the writer
                    write!(writer, "{e}")?;
                    writer.flush()?;
                    return Ok(0);
                }
                _ => {
                    eprint!("{e}");
                    return Ok(1);
                }
            }
        }
    };

    // Load config from the given root's vicinity, or the current directory
    let config_path = cli.root.as_deref().unwrap_or_else(|| Path::new("."));
    let config = Config::load_from_path(config_path);

    let root = cli
        .root
        .clone()
        .or_else(|| config.mdphpfix.docs_dir.clone().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCS_DIR));

    let mut exclude_folders = config.mdphpfix.exclude_folders.clone().unwrap_or_default();
    exclude_folders.extend(cli.exclude_folders.clone());

    if cli.verbose && !cli.json {
        eprintln!("[VERBOSE] mdphpfix v{}", env!("CARGO_PKG_VERSION"));
        eprintln!("[VERBOSE] Configuration:");
        eprintln!("   Root: {}", root.display());
        eprintln!("   Dry run: {}", cli.dry_run);
        if let Some(ref path) = config.config_file_path {
            eprintln!("   Config file: {}", path.display());
        }
        if !exclude_folders.is_empty() {
            eprintln!("   Exclude folders: {exclude_folders:?}");
        }
        eprintln!();
    }

    if !root.is_dir() {
        eprintln!(
            "Error: The docs directory '{}' does not exist.",
            root.display()
        );
        return Ok(1);
    }

    let options = FixOptions {
        dry_run: cli.dry_run,
        json: cli.json,
        verbose: cli.verbose,
        exclude_folders,
    };

    crate::processor::run_fix(&root, &options, writer)?;
    Ok(0)
}
