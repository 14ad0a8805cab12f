//! Build options passed to a dependency's (or the package's own) build step.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Serialize, Serializer};

/// Target spelling that always means the package owning the manifest.
pub const PACKAGE_TARGET: &str = "&";

/// Bare tokens that are read as enumerated values rather than free text.
static ENUM_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.+\-]+$").expect("Invalid enum token regex"));

/// What an option applies to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionTarget {
    /// The package that owns the manifest.
    Package,
    /// A declared dependency, by name.
    Dependency(String),
}

impl OptionTarget {
    /// Interpret a written target. `&` names the package itself.
    pub fn from_written(target: &str) -> Self {
        if target == PACKAGE_TARGET {
            Self::Package
        } else {
            Self::Dependency(target.to_string())
        }
    }
}

impl fmt::Display for OptionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionTarget::Package => f.write_str(PACKAGE_TARGET),
            OptionTarget::Dependency(name) => f.write_str(name),
        }
    }
}

impl Serialize for OptionTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// An option value.
///
/// Values are classified by shape: `True`, `False`, `true` and `false` are booleans,
/// bare tokens such as `MD` or `x86_64` are enumerated values, anything else
/// (including the empty string) is free text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Enum(String),
    Text(String),
}

impl OptionValue {
    /// Classify an unquoted string value.
    pub fn classify(value: &str) -> Self {
        match value {
            "True" | "true" => Self::Bool(true),
            "False" | "false" => Self::Bool(false),
            _ if ENUM_TOKEN.is_match(value) => Self::Enum(value.to_string()),
            _ => Self::Text(value.to_string()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Enum(_) => "enum",
            Self::Text(_) => "text",
        }
    }

    /// The string form of an enumerated or free-text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Enum(s) | Self::Text(s) => Some(s),
            Self::Bool(_) => None,
        }
    }
}

impl From<bool> for OptionValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl fmt::Display for OptionValue {
    /// Formats the value the way it is written in line-oriented sources.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Enum(s) => f.write_str(s),
            Self::Text(s) => write!(f, "{}", quote(s)),
        }
    }
}

/// Double-quote a string, escaping backslashes, both quote characters and
/// control whitespace. Escaped `'` keeps a `'''` options block closed.
pub(crate) fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\t' => quoted.push_str("\\t"),
            '\r' => quoted.push_str("\\r"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// A single `target:key=value` assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOption {
    pub target: OptionTarget,
    pub key: String,
    pub value: OptionValue,
}

impl BuildOption {
    /// Build an option for a written target (`&` for the package itself).
    pub fn new(target: &str, key: impl Into<String>, value: OptionValue) -> Self {
        Self {
            target: OptionTarget::from_written(target),
            key: key.into(),
            value,
        }
    }

    pub fn for_package(key: impl Into<String>, value: OptionValue) -> Self {
        Self {
            target: OptionTarget::Package,
            key: key.into(),
            value,
        }
    }
}

impl fmt::Display for BuildOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}={}", self.target, self.key, self.value)
    }
}

/// The `(key, value)` pairs set for one target. Keys are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OptionSet(BTreeMap<String, OptionValue>);

/// Returned for targets without options.
pub(crate) static EMPTY_OPTIONS: OptionSet = OptionSet::new();

impl OptionSet {
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str, value: &OptionValue) -> bool {
        self.0.get(key) == Some(value)
    }

    /// Pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Insert a pair, returning the value previously set for `key`.
    pub(crate) fn insert(&mut self, key: String, value: OptionValue) -> Option<OptionValue> {
        self.0.insert(key, value)
    }
}

impl<K: Into<String>> FromIterator<(K, OptionValue)> for OptionSet {
    fn from_iter<I: IntoIterator<Item = (K, OptionValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
