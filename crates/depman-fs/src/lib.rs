//! Source artifact access for depman
//!
//! Locates the one manifest file a build invocation reads, loads it with a
//! size cap, and fingerprints its contents.

pub mod checksum;
pub mod constants;
pub mod error;
pub mod io;

pub use constants::{ManifestFile, discover};
pub use error::{Error, Result};
pub use io::{DEFAULT_MAX_SIZE, read_bytes, read_source};
