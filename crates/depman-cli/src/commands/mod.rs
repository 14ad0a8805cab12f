//! Command implementations for depman-cli

pub mod check;
pub mod checksum;
pub mod list;
pub mod options;
pub mod render;

use std::path::{Path, PathBuf};

use depman_manifest::{LoadOptions, Manifest};

use crate::error::Result;

pub use check::run_check;
pub use checksum::run_checksum;
pub use list::run_list;
pub use options::run_options;
pub use render::run_render;

/// Resolve `path` to a manifest file and load it.
fn load(path: &Path, options: &LoadOptions) -> Result<(PathBuf, Manifest)> {
    let file = depman_fs::discover(path)?;
    let manifest = Manifest::from_path_with(&file, options)?;
    Ok((file, manifest))
}
