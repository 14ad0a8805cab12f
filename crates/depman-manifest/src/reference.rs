//! Package references of the form `name/version@user/channel`.
//!
//! The part after `@` is kept whole as the channel (`conan/stable`). A
//! reference without `@` has an empty channel, which validation reports as an
//! empty field rather than a syntax error.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A parsed package reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    pub name: String,
    pub version: String,
    pub channel: String,
}

impl Reference {
    /// Split a reference string into its parts without altering any of them.
    pub fn parse(reference: &str) -> Result<Self, Error> {
        let (package, channel) = reference.split_once('@').unwrap_or((reference, ""));
        let Some((name, version)) = package.split_once('/') else {
            return Err(Error::parse(
                None,
                format!(
                    "invalid reference '{}': expected '<name>/<version>@<user>/<channel>'",
                    reference
                ),
            ));
        };

        Ok(Self {
            name: name.to_string(),
            version: version.to_string(),
            channel: channel.to_string(),
        })
    }

    /// The maintainer half of a `user/channel` channel, if it has that shape.
    pub fn user(&self) -> Option<&str> {
        self.channel.split_once('/').map(|(user, _)| user)
    }
}

impl FromStr for Reference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.name, self.version, self.channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_reference() {
        let reference = Reference::parse("OpenSSL/1.1.0g@conan/stable").unwrap();
        assert_eq!(reference.name, "OpenSSL");
        assert_eq!(reference.version, "1.1.0g");
        assert_eq!(reference.channel, "conan/stable");
        assert_eq!(reference.user(), Some("conan"));
    }

    #[test]
    fn keeps_odd_versions_verbatim() {
        let reference = Reference::parse("CEF/3.3239.1709.g093cae4@inexorgame/testing").unwrap();
        assert_eq!(reference.version, "3.3239.1709.g093cae4");
        assert_eq!(
            reference.to_string(),
            "CEF/3.3239.1709.g093cae4@inexorgame/testing"
        );
    }

    #[test]
    fn missing_channel_is_empty_not_error() {
        let reference = Reference::parse("zlib/1.2.11").unwrap();
        assert_eq!(reference.channel, "");
        assert_eq!(reference.user(), None);
    }

    #[test]
    fn missing_version_separator_is_error() {
        let err = Reference::parse("zlib@conan/stable").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn empty_name_is_kept_for_validation() {
        let reference: Reference = "/1.0@conan/stable".parse().unwrap();
        assert_eq!(reference.name, "");
    }
}
