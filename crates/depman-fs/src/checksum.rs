//! Fingerprints of manifest sources
//!
//! Build caches key on the `sha256:<hex>` of the exact bytes a manifest was
//! loaded from. The file form reads through the same size cap as a load.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::Result;
use crate::io::read_bytes;

const PREFIX: &str = "sha256:";

fn fingerprint(bytes: &[u8]) -> String {
    format!("{}{:x}", PREFIX, Sha256::digest(bytes))
}

/// Fingerprint source text held in memory.
pub fn content_checksum(content: &str) -> String {
    fingerprint(content.as_bytes())
}

/// Fingerprint a source file's raw bytes, refusing files above `max_size`.
pub fn source_checksum(path: &Path, max_size: u64) -> Result<String> {
    let bytes = read_bytes(path, max_size)?;
    Ok(fingerprint(&bytes))
}
