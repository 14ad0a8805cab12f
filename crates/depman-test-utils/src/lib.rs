//! Shared test utilities for the depman workspace.
//!
//! Dev-dependency only. Gives tests access to the checked-in manifests under
//! `test-fixtures/manifests/` and to throwaway manifest directories.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// The zlib/gtest scenario used across the test suites, in literal form.
pub const ZLIB_GTEST: &str = r#"requires = (
    ("zlib/1.2.11@conan/stable"),
    ("gtest/1.8.0@lasote/stable"),
)

options = '''
  zlib:shared=False
  gtest:shared=False
  gtest:no_gmock=True
'''
"#;

/// Root of the checked-in manifest fixtures.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../test-fixtures/manifests")
}

/// Path of a fixture relative to [`fixtures_dir`], e.g. `"inexor/dependencies.py"`.
pub fn fixture(relative: &str) -> PathBuf {
    let path = fixtures_dir().join(relative);
    assert!(path.exists(), "missing fixture {}", path.display());
    path
}

/// Read a fixture as text.
pub fn read_fixture(relative: &str) -> String {
    fs::read_to_string(fixture(relative)).unwrap()
}

/// A temporary directory holding manifest files written by a test.
pub struct ManifestDir {
    temp_dir: TempDir,
}

impl Default for ManifestDir {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestDir {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write `content` to `name` inside the directory and return its path.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}
