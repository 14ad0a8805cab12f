//! Render command: print a manifest in another source format

use std::path::Path;

use depman_manifest::{LoadOptions, SourceFormat};

use crate::error::Result;

pub fn run_render(path: &Path, options: &LoadOptions, to: SourceFormat) -> Result<()> {
    let (file, manifest) = super::load(path, options)?;
    tracing::debug!("Rendering {} as {}", file.display(), to);

    print!("{}", manifest.render(to)?);
    Ok(())
}
