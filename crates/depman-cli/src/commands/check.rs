//! Check command: load, validate and optionally lint a manifest

use std::path::Path;

use colored::Colorize;
use depman_manifest::{LoadOptions, lint};

use crate::error::Result;

/// Run the check command.
///
/// Strict findings are printed as warnings and never change the exit status.
pub fn run_check(path: &Path, options: &LoadOptions, strict: bool) -> Result<()> {
    let (file, manifest) = super::load(path, options)?;

    println!(
        "{} {}: {} dependencies ({} overrides), {} options",
        "ok".green().bold(),
        file.display(),
        manifest.dependencies().len(),
        manifest.overrides().count(),
        manifest.build_options().len()
    );

    if strict {
        for finding in lint(&manifest) {
            println!("{} {}", "warning:".yellow().bold(), finding);
        }
    }

    Ok(())
}
