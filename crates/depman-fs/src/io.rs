//! Bounded reads of a manifest source

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use crate::{Error, Result};

/// Largest manifest source accepted by default (1 MiB).
pub const DEFAULT_MAX_SIZE: u64 = 1024 * 1024;

/// Read a manifest source's raw bytes, refusing files above `max_size` bytes.
///
/// The size is checked against the file metadata first and then enforced on
/// the read itself, so a file growing between the two calls is still capped.
pub fn read_bytes(path: &Path, max_size: u64) -> Result<Vec<u8>> {
    let metadata = fs::metadata(path).map_err(|e| Error::io(path, e))?;
    if metadata.len() > max_size {
        return Err(Error::SourceTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max: max_size,
        });
    }

    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    let mut bytes = Vec::with_capacity(metadata.len() as usize);
    file.take(max_size.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(path, e))?;

    if bytes.len() as u64 > max_size {
        return Err(Error::SourceTooLarge {
            path: path.to_path_buf(),
            size: bytes.len() as u64,
            max: max_size,
        });
    }

    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// Read a manifest source as UTF-8 text, refusing files above `max_size` bytes.
pub fn read_source(path: &Path, max_size: u64) -> Result<String> {
    String::from_utf8(read_bytes(path, max_size)?).map_err(|_| Error::NotUtf8 {
        path: path.to_path_buf(),
    })
}
