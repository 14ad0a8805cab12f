//! Source formats a manifest can be written in.

mod lines;
mod literal;
mod schema;
mod sections;

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::validation::Document;

/// A supported manifest source format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Structured literal with `requires = (...)` and `options = '''...'''`.
    Literal,
    /// INI-like `[requires]` / `[options]` sections.
    Sections,
    Toml,
    Json,
    Yaml,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 5] = [
        Self::Literal,
        Self::Sections,
        Self::Toml,
        Self::Json,
        Self::Yaml,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::Sections => "sections",
            Self::Toml => "toml",
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    /// Format implied by a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "py" => Some(Self::Literal),
            "txt" => Some(Self::Sections),
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Guess the format from the first significant line of a source.
    ///
    /// Falls back to [`SourceFormat::Literal`], the native host syntax.
    pub fn sniff(source: &str) -> Self {
        let Some(first) = source
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty() && !line.starts_with('#'))
        else {
            return Self::Literal;
        };

        if first.starts_with('{') {
            return Self::Json;
        }
        if first.starts_with("[[") || first.starts_with("[options.") {
            return Self::Toml;
        }
        if first.starts_with('[') {
            return Self::Sections;
        }
        if first.starts_with("dependency:") || first.starts_with("package:") {
            return Self::Yaml;
        }
        if let Some((field, _)) = first.split_once('=') {
            if matches!(field.trim(), "package" | "dependency") {
                return Self::Toml;
            }
        }
        Self::Literal
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFormat {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "literal" | "py" | "python" => Ok(Self::Literal),
            "sections" | "txt" | "ini" => Ok(Self::Sections),
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(Error::UnsupportedFormat {
                name: s.to_string(),
            }),
        }
    }
}

pub(crate) fn parse(source: &str, format: SourceFormat) -> Result<Document> {
    match format {
        SourceFormat::Literal => literal::parse(source),
        SourceFormat::Sections => sections::parse(source),
        SourceFormat::Toml => schema::parse_toml(source),
        SourceFormat::Json => schema::parse_json(source),
        SourceFormat::Yaml => schema::parse_yaml(source),
    }
}

pub(crate) fn render(manifest: &Manifest, format: SourceFormat) -> Result<String> {
    match format {
        SourceFormat::Literal => Ok(literal::render(manifest)),
        SourceFormat::Sections => Ok(sections::render(manifest)),
        SourceFormat::Toml => schema::render_toml(manifest),
        SourceFormat::Json => schema::render_json(manifest),
        SourceFormat::Yaml => schema::render_yaml(manifest),
    }
}
