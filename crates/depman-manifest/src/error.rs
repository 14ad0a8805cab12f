//! Error types for depman-manifest

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// Required dependency field that was left blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Version,
    Channel,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Name => "name",
            Field::Version => "version",
            Field::Channel => "channel",
        })
    }
}

/// Errors raised while loading a manifest.
///
/// Loading stops at the first violation in source order.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read manifest: {0}")]
    Fs(#[from] depman_fs::Error),

    #[error("Parse error{}: {message}", at_line(.line))]
    Parse { line: Option<usize>, message: String },

    #[error("Duplicate dependency '{name}' (declarations #{first} and #{second})")]
    DuplicateDependency {
        name: String,
        first: usize,
        second: usize,
    },

    #[error("Option '{key}' targets unknown dependency '{target}'")]
    DanglingOption { target: String, key: String },

    #[error("Dependency #{position} has an empty {field}{}", at_line(.line))]
    EmptyField {
        field: Field,
        position: usize,
        line: Option<usize>,
    },

    #[error("Option '{key}' is set more than once for '{target}'")]
    DuplicateOption { target: String, key: String },

    #[error("Override pin '{name}' is not preceded by a direct dependency")]
    OrphanOverride { name: String },

    #[error("Unsupported manifest format: {name}")]
    UnsupportedFormat { name: String },

    #[error("Failed to render manifest as {format}: {message}")]
    Render { format: String, message: String },
}

impl Error {
    pub(crate) fn parse(line: Option<usize>, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

fn at_line(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" at line {}", line),
        None => String::new(),
    }
}
