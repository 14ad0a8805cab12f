//! Options command: build options for one target or all of them

use std::path::Path;

use colored::Colorize;
use depman_manifest::LoadOptions;

use crate::error::Result;

pub fn run_options(
    path: &Path,
    options: &LoadOptions,
    target: Option<&str>,
    json: bool,
) -> Result<()> {
    let (_, manifest) = super::load(path, options)?;

    match target {
        Some(target) => {
            let set = manifest.options_for(target);
            if json {
                println!("{}", serde_json::to_string_pretty(set)?);
            } else if set.is_empty() {
                println!("{}", format!("No options for '{}'.", target).dimmed());
            } else {
                for (key, value) in set.iter() {
                    println!("{}={}", key.cyan(), value);
                }
            }
        }
        None => {
            if json {
                println!("{}", serde_json::to_string_pretty(manifest.option_targets())?);
            } else {
                let all = manifest.build_options();
                if all.is_empty() {
                    println!("{}", "No options declared.".dimmed());
                }
                for option in all {
                    println!("{}", option);
                }
            }
        }
    }

    Ok(())
}
