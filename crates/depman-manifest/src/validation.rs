//! Turning a parsed document into a validated [`Manifest`].
//!
//! Checks run in source order and the first violation aborts the load.

use std::collections::{BTreeMap, HashMap};

use crate::dependency::{DependencyDeclaration, DependencyKind};
use crate::error::{Error, Field, Result};
use crate::manifest::Manifest;
use crate::option::{BuildOption, OptionSet, OptionTarget, OptionValue, PACKAGE_TARGET};

/// Output of a format parser, before any semantic checks.
#[derive(Debug, Default)]
pub(crate) struct Document {
    pub package: Option<String>,
    pub entries: Vec<Located<DependencyDeclaration>>,
    pub options: Vec<Located<BuildOption>>,
}

/// A parsed item and the source line it came from, when the format has lines.
#[derive(Debug)]
pub(crate) struct Located<T> {
    pub item: T,
    pub line: Option<usize>,
}

impl<T> Located<T> {
    pub fn new(item: T, line: Option<usize>) -> Self {
        Self { item, line }
    }
}

const FORBIDDEN_EVERYWHERE: &[char] = &['"', '\'', '#'];

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_chars(field: Field, value: &str, extra: &[char], line: Option<usize>) -> Result<()> {
    if let Some(c) = value
        .chars()
        .find(|c| c.is_whitespace() || FORBIDDEN_EVERYWHERE.contains(c) || extra.contains(c))
    {
        return Err(Error::parse(
            line,
            format!("invalid character {:?} in dependency {} '{}'", c, field, value),
        ));
    }
    Ok(())
}

fn check_declaration(
    dep: &DependencyDeclaration,
    position: usize,
    line: Option<usize>,
) -> Result<()> {
    for (field, value) in [
        (Field::Name, &dep.name),
        (Field::Version, &dep.version),
        (Field::Channel, &dep.channel),
    ] {
        if is_blank(value) {
            return Err(Error::EmptyField {
                field,
                position,
                line,
            });
        }
    }

    if dep.name == PACKAGE_TARGET {
        return Err(Error::parse(
            line,
            format!("dependency name '{}' is reserved for the package itself", PACKAGE_TARGET),
        ));
    }
    check_chars(Field::Name, &dep.name, &['/', '@', ':', '='], line)?;
    check_chars(Field::Version, &dep.version, &['@'], line)?;
    check_chars(Field::Channel, &dep.channel, &[], line)?;

    if let Some(comment) = &dep.comment {
        if comment.contains(['\n', '\r']) {
            return Err(Error::parse(
                line,
                format!("comment on '{}' must be a single line", dep.name),
            ));
        }
    }
    Ok(())
}

fn check_option_key(option: &BuildOption, line: Option<usize>) -> Result<()> {
    let key = &option.key;
    if key.is_empty() {
        return Err(Error::parse(line, format!("empty option key for '{}'", option.target)));
    }
    if key
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, ':' | '=' | '#' | '"' | '\''))
    {
        return Err(Error::parse(line, format!("invalid option key '{}'", key)));
    }
    Ok(())
}

/// Values must keep their kind when written out and read back.
fn check_option_value(option: &BuildOption, line: Option<usize>) -> Result<()> {
    let Some(raw) = option.value.as_str() else {
        return Ok(());
    };
    let reread = OptionValue::classify(raw);
    if reread != option.value {
        return Err(Error::parse(
            line,
            format!(
                "value {} of option '{}:{}' reads back as {}",
                option.value,
                option.target,
                option.key,
                reread.kind_name()
            ),
        ));
    }
    Ok(())
}

pub(crate) fn validate(document: Document) -> Result<Manifest> {
    let Document {
        package,
        entries,
        options,
    } = document;

    if package.as_deref().is_some_and(is_blank) {
        return Err(Error::parse(None, "empty package name"));
    }

    let mut positions: HashMap<String, usize> = HashMap::with_capacity(entries.len());
    let mut seen_direct = false;
    let mut dependencies = Vec::with_capacity(entries.len());

    for (index, Located { item: mut dep, line }) in entries.into_iter().enumerate() {
        let position = index + 1;
        // Line formats can only carry trimmed, non-empty comments.
        dep.comment = dep
            .comment
            .take()
            .map(|comment| comment.trim().to_string())
            .filter(|comment| !comment.is_empty());
        check_declaration(&dep, position, line)?;

        if let Some(&first) = positions.get(&dep.name) {
            return Err(Error::DuplicateDependency {
                name: dep.name,
                first,
                second: position,
            });
        }

        match dep.kind {
            DependencyKind::Direct => seen_direct = true,
            DependencyKind::Override if !seen_direct => {
                return Err(Error::OrphanOverride { name: dep.name });
            }
            DependencyKind::Override => {}
        }

        positions.insert(dep.name.clone(), position);
        dependencies.push(dep);
    }

    let mut sets: BTreeMap<OptionTarget, OptionSet> = BTreeMap::new();
    for Located { item: option, line } in options {
        check_option_key(&option, line)?;
        check_option_value(&option, line)?;

        let target = match option.target {
            OptionTarget::Dependency(name) if positions.contains_key(&name) => {
                OptionTarget::Dependency(name)
            }
            OptionTarget::Dependency(name) if package.as_deref() == Some(name.as_str()) => {
                OptionTarget::Package
            }
            OptionTarget::Dependency(name) => {
                return Err(Error::DanglingOption {
                    target: name,
                    key: option.key,
                });
            }
            OptionTarget::Package => OptionTarget::Package,
        };

        let set = sets.entry(target.clone()).or_default();
        if set.insert(option.key.clone(), option.value).is_some() {
            return Err(Error::DuplicateOption {
                target: target.to_string(),
                key: option.key,
            });
        }
    }

    Ok(Manifest::from_validated(package, dependencies, sets))
}
