//! Command-line interface definition.

use clap::Parser;
use std::path::PathBuf;

/// Help text for configuration file options, shown at the bottom of --help.
const CONFIG_HELP: &str = "\
CONFIGURATION FILE (.mdphpfix.toml):
  Create this file in your project root to set defaults.

  [mdphpfix]
  docs_dir = \"docs\"                  # Documentation tree to scan
  exclude_folders = [\"drafts\"]       # Folders to skip while walking
";

/// Command line interface configuration using `clap`.
/// This struct defines the arguments and flags accepted by the program.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "mdphpfix - Insert missing <?php tags into fenced PHP blocks in Markdown docs",
    long_about = None,
    after_help = CONFIG_HELP
)]
pub struct Cli {
    /// Root of the documentation tree to scan.
    /// Defaults to `docs_dir` from the configuration file, then `./docs`.
    pub root: Option<PathBuf>,

    /// Preview which files would change without writing anything.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Output the run report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output for debugging (shows configuration and per-file detail).
    #[arg(short, long)]
    pub verbose: bool,

    /// Folders to exclude from the scan.
    #[arg(long, alias = "exclude-folder")]
    pub exclude_folders: Vec<String>,
}
