//! List command: dependency declarations in declaration order

use std::path::Path;

use colored::Colorize;
use depman_manifest::LoadOptions;

use crate::error::Result;

pub fn run_list(path: &Path, options: &LoadOptions, json: bool) -> Result<()> {
    let (_, manifest) = super::load(path, options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(manifest.dependencies())?);
        return Ok(());
    }

    if let Some(package) = manifest.package() {
        println!("{} {}", "Package:".bold(), package);
        println!();
    }

    if manifest.dependencies().is_empty() {
        println!("{}", "No dependencies declared.".dimmed());
        return Ok(());
    }

    for dep in manifest.dependencies() {
        let reference = dep.reference().to_string();
        let line = if dep.is_override() {
            format!("    {} {}", reference.yellow(), "(override)".dimmed())
        } else {
            format!("  {}", reference.green())
        };
        match &dep.comment {
            Some(comment) => println!("{}  {}", line, format!("# {}", comment).dimmed()),
            None => println!("{}", line),
        }
    }

    println!();
    println!(
        "{} {} dependencies, {} overrides",
        "Total:".dimmed(),
        manifest.dependencies().len(),
        manifest.overrides().count()
    );

    Ok(())
}
