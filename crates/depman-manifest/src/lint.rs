//! Advisory checks on a valid manifest.
//!
//! Findings never make a manifest invalid; a consumer may choose to surface
//! them. Versions are free-form and channels are opaque to the loader.

use std::fmt;

use crate::manifest::Manifest;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    /// The version does not parse as semver (e.g. `1.1.0g`).
    NonSemverVersion { name: String, version: String },
    /// The channel is not shaped `user/channel`.
    UnqualifiedChannel { name: String, channel: String },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::NonSemverVersion { name, version } => {
                write!(f, "{}: version '{}' is not semver", name, version)
            }
            Finding::UnqualifiedChannel { name, channel } => {
                write!(f, "{}: channel '{}' is not 'user/channel'", name, channel)
            }
        }
    }
}

fn is_user_channel(channel: &str) -> bool {
    matches!(
        channel.split_once('/'),
        Some((user, name)) if !user.is_empty() && !name.is_empty() && !name.contains('/')
    )
}

/// Collect advisory findings in declaration order.
pub fn lint(manifest: &Manifest) -> Vec<Finding> {
    let mut findings = Vec::new();

    for dep in manifest.dependencies() {
        if dep.semver().is_none() {
            findings.push(Finding::NonSemverVersion {
                name: dep.name.clone(),
                version: dep.version.clone(),
            });
        }
        if !is_user_channel(&dep.channel) {
            findings.push(Finding::UnqualifiedChannel {
                name: dep.name.clone(),
                channel: dep.channel.clone(),
            });
        }
    }

    for finding in &findings {
        tracing::warn!("{}", finding);
    }
    findings
}
