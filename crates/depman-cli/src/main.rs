//! depman CLI
//!
//! Read-only front end for dependency manifests: validates, lists and
//! re-renders them. It never resolves, fetches or builds anything.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
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
    init_tracing(cli.verbose)?;

    let options = cli.load_options();
    match cli.command {
        Commands::Check { manifest, strict } => {
            commands::run_check(&manifest.path, &options, strict)
        }
        Commands::List { manifest, json } => commands::run_list(&manifest.path, &options, json),
        Commands::Options {
            manifest,
            target,
            json,
        } => commands::run_options(&manifest.path, &options, target.as_deref(), json),
        Commands::Render { manifest, to } => commands::run_render(&manifest.path, &options, to),
        Commands::Checksum { manifest } => {
            commands::run_checksum(&manifest.path, options.max_size)
        }
    }
}

/// `-v` forces DEBUG; otherwise `RUST_LOG` decides, defaulting to errors only.
fn init_tracing(verbose: bool) -> Result<()> {
    let builder = FmtSubscriber::builder()
        .with_writer(std::io::stderr)
        .with_target(true);

    if verbose {
        tracing::subscriber::set_global_default(builder.with_max_level(Level::DEBUG).finish())?;
        tracing::debug!("Verbose mode enabled");
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
        tracing::subscriber::set_global_default(builder.with_env_filter(filter).finish())?;
    }
    Ok(())
}
