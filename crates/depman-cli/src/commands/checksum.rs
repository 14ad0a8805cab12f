//! Checksum command: fingerprint the manifest file

use std::path::Path;

use depman_fs::checksum::source_checksum;

use crate::error::Result;

pub fn run_checksum(path: &Path, max_size: u64) -> Result<()> {
    let file = depman_fs::discover(path)?;
    println!("{}", source_checksum(&file, max_size)?);
    Ok(())
}
