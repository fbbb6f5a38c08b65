//! CLI entry point for the dirlist tool.
//!
//! Recursively lists every file and directory under a root, prints a numbered
//! listing, and saves the paths one per line.
//!
//! # Usage
//!
//! ```bash
//! # Scan the working directory into ./directory_list.txt
//! dirlist
//!
//! # Scan another tree, write into a directory (trailing separator)
//! dirlist --path /srv/data --output reports/
//!
//! # Load settings from a JSON file, skip the console listing
//! dirlist --config dirlist.json --no-print
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use dl_core::Config;
use dl_scanner::Scanner;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Recursively list files and directories and save the list to a text file.
///
/// With no arguments, scans the current working directory and writes
/// `directory_list.txt` there.
#[derive(Parser)]
#[command(name = "dirlist", version, about, long_about = None)]
struct Cli {
    /// Directory to scan (defaults to the working directory).
    #[arg(short, long, env = "DIRLIST_PATH")]
    path: Option<Utf8PathBuf>,

    /// File to save the listing to.
    ///
    /// A path ending in a separator is treated as a directory and
    /// `directory_list_output.txt` is written inside it.
    #[arg(short, long, env = "DIRLIST_OUTPUT")]
    output: Option<Utf8PathBuf>,

    /// JSON configuration file.
    #[arg(short, long, env = "DIRLIST_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Do not print the numbered listing to stdout.
    #[arg(long)]
    no_print: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(level)
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_ansi(use_ansi))
        .with(filter)
        .init();
}

/// Builds a [`Config`] from the config file (if any) and CLI overrides.
///
/// # Errors
///
/// Returns an error if the config file cannot be loaded or the merged
/// configuration is invalid.
fn build_config(cli: &Cli) -> color_eyre::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(path) = &cli.path {
        config.scan.root.clone_from(path);
    }
    if let Some(output) = &cli.output {
        config.output.file.clone_from(output);
    }
    if cli.no_print {
        config.output.print_listing = false;
    }

    config.validate()?;
    Ok(config)
}

/// Resolves the scan root to an absolute path.
///
/// Relative roots are joined onto the working directory. Symbolic links are
/// left unresolved, and a missing root is passed through so the scan itself
/// reports the failure.
fn resolve_root(root: &Utf8Path) -> color_eyre::Result<Utf8PathBuf> {
    let absolute = std::path::absolute(root.as_std_path())?;
    Ok(Utf8PathBuf::try_from(absolute)?)
}

// =============================================================================
// ORCHESTRATION
// =============================================================================

/// Scans, prints, and saves according to `config`.
///
/// Scan and save failures are reported by the scanner's sink and do not stop
/// the run.
async fn run(config: &Config) -> color_eyre::Result<()> {
    let root = resolve_root(&config.scan.root)?;
    info!(root = %root, "Starting scan");

    let mut scanner = Scanner::new();
    let summary = scanner.scan_directory(&root).await.ok();
    info!(
        entries = scanner.len(),
        subtree_errors = summary.map_or(0, |s| s.errors.len()),
        "Scan complete"
    );

    if config.output.print_listing {
        scanner.print_scanned_list();
    }

    let saved = scanner.save_to_file(&config.output.file).await.is_ok();
    info!(saved, "Execution finished successfully");

    Ok(())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Run, logging anything that escapes instead of failing the process
    let outcome = match build_config(&cli) {
        Ok(config) => run(&config).await,
        Err(err) => Err(err),
    };
    if let Err(err) = outcome {
        error!("Fatal Error: {err:#}");
    }

    Ok(())
}
