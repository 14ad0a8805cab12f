//! Options controlling how a manifest source is loaded.

use crate::format::SourceFormat;

/// How [`Manifest::from_path_with`](crate::Manifest::from_path_with) reads a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Force a source format instead of detecting it from the file name.
    pub format: Option<SourceFormat>,
    /// Largest source accepted, in bytes.
    pub max_size: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: None,
            max_size: depman_fs::DEFAULT_MAX_SIZE,
        }
    }
}

impl LoadOptions {
    pub fn with_format(mut self, format: SourceFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }
}
