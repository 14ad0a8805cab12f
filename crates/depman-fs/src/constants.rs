//! Well-known manifest file names and directory discovery.

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Manifest file names searched for when a directory is given instead of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFile {
    /// `depman.toml`
    DepmanToml,
    /// `dependencies.py` (structured literal)
    DependenciesPy,
    /// `conanfile.py` (structured literal)
    ConanfilePy,
    /// `conanfile.txt` (sections)
    ConanfileTxt,
}

impl ManifestFile {
    /// Discovery order. The first match in a directory wins.
    pub const ALL: [ManifestFile; 4] = [
        Self::DepmanToml,
        Self::DependenciesPy,
        Self::ConanfilePy,
        Self::ConanfileTxt,
    ];

    /// Get the file name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DepmanToml => "depman.toml",
            Self::DependenciesPy => "dependencies.py",
            Self::ConanfilePy => "conanfile.py",
            Self::ConanfileTxt => "conanfile.txt",
        }
    }
}

impl AsRef<Path> for ManifestFile {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl std::fmt::Display for ManifestFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolve `path` to a manifest file.
///
/// A file path is returned unchanged. A directory is searched for the names in
/// [`ManifestFile::ALL`], in order.
pub fn discover(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        return Ok(path.to_path_buf());
    }

    for candidate in ManifestFile::ALL {
        let file = path.join(candidate);
        if file.is_file() {
            tracing::debug!("Discovered manifest {}", file.display());
            return Ok(file);
        }
    }

    Err(Error::ManifestNotFound {
        dir: path.to_path_buf(),
        candidates: ManifestFile::ALL
            .iter()
            .map(ManifestFile::as_str)
            .collect::<Vec<_>>()
            .join(", "),
    })
}
