//! Dependency declarations.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reference::Reference;

/// Whether an entry is a direct requirement or pins a transitive one.
///
/// Recorded from the source's grouping for readers of the manifest. It
/// carries no precedence; any override behaviour belongs to the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    #[default]
    Direct,
    /// Forces the version of a package another dependency pulls in.
    Override,
}

impl DependencyKind {
    pub fn is_direct(&self) -> bool {
        matches!(self, DependencyKind::Direct)
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DependencyKind::Direct => "direct",
            DependencyKind::Override => "override",
        })
    }
}

/// One upstream package pinned at a version from a channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependencyDeclaration {
    pub name: String,
    pub version: String,
    pub channel: String,
    /// Free-text rationale for the pin. Never interpreted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "DependencyKind::is_direct")]
    pub kind: DependencyKind,
}

impl DependencyDeclaration {
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            channel: channel.into(),
            comment: None,
            kind: DependencyKind::Direct,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_kind(mut self, kind: DependencyKind) -> Self {
        self.kind = kind;
        self
    }

    /// The `name/version@channel` reference for this declaration.
    pub fn reference(&self) -> Reference {
        Reference {
            name: self.name.clone(),
            version: self.version.clone(),
            channel: self.channel.clone(),
        }
    }

    /// Interpret the version as semver, if it happens to be one.
    ///
    /// Purely informational: versions such as `1.1.0g` are legal pins.
    pub fn semver(&self) -> Option<semver::Version> {
        semver::Version::parse(&self.version).ok()
    }

    pub fn is_override(&self) -> bool {
        self.kind == DependencyKind::Override
    }
}

impl From<Reference> for DependencyDeclaration {
    fn from(reference: Reference) -> Self {
        Self::new(reference.name, reference.version, reference.channel)
    }
}
