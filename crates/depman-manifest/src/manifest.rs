//! The manifest aggregate.

use std::collections::BTreeMap;
use std::path::Path;

use crate::config::LoadOptions;
use crate::dependency::DependencyDeclaration;
use crate::error::Result;
use crate::format::{self, SourceFormat};
use crate::option::{BuildOption, EMPTY_OPTIONS, OptionSet, OptionTarget, PACKAGE_TARGET};
use crate::validation::{self, Document, Located};

/// A validated dependency manifest.
///
/// Built once per load and never mutated afterwards. Dependencies keep their
/// declaration order; that order is for readers only and implies no priority.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    package: Option<String>,
    dependencies: Vec<DependencyDeclaration>,
    options: BTreeMap<OptionTarget, OptionSet>,
}

impl Manifest {
    pub(crate) fn from_validated(
        package: Option<String>,
        dependencies: Vec<DependencyDeclaration>,
        options: BTreeMap<OptionTarget, OptionSet>,
    ) -> Self {
        Self {
            package,
            dependencies,
            options,
        }
    }

    /// Parse a manifest, detecting the source format from its content.
    pub fn parse(source: &str) -> Result<Self> {
        Self::parse_as(source, SourceFormat::sniff(source))
    }

    /// Parse a manifest written in `format`.
    pub fn parse_as(source: &str, format: SourceFormat) -> Result<Self> {
        let document = format::parse(source, format)?;
        let manifest = validation::validate(document)?;
        tracing::debug!(
            "Loaded {} manifest: {} dependencies, {} option targets",
            format,
            manifest.dependencies.len(),
            manifest.options.len()
        );
        Ok(manifest)
    }

    /// Load a manifest file, or the well-known manifest inside a directory.
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_path_with(path, &LoadOptions::default())
    }

    /// Load a manifest file with explicit [`LoadOptions`].
    pub fn from_path_with(path: &Path, options: &LoadOptions) -> Result<Self> {
        let path = depman_fs::discover(path)?;
        let source = depman_fs::read_source(&path, options.max_size)?;
        let format = options
            .format
            .or_else(|| SourceFormat::from_path(&path))
            .unwrap_or_else(|| SourceFormat::sniff(&source));
        tracing::debug!("Loading {} as {}", path.display(), format);
        Self::parse_as(&source, format)
    }

    /// Build a manifest from already-structured data, applying the same
    /// validation as a load.
    pub fn from_parts(
        package: Option<String>,
        dependencies: Vec<DependencyDeclaration>,
        options: Vec<BuildOption>,
    ) -> Result<Self> {
        validation::validate(Document {
            package,
            entries: dependencies
                .into_iter()
                .map(|dep| Located::new(dep, None))
                .collect(),
            options: options
                .into_iter()
                .map(|option| Located::new(option, None))
                .collect(),
        })
    }

    /// Name of the package owning this manifest, if declared.
    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }

    /// All declarations, in declaration order.
    pub fn dependencies(&self) -> &[DependencyDeclaration] {
        &self.dependencies
    }

    pub fn dependency(&self, name: &str) -> Option<&DependencyDeclaration> {
        self.dependencies.iter().find(|dep| dep.name == name)
    }

    pub fn direct_dependencies(&self) -> impl Iterator<Item = &DependencyDeclaration> {
        self.dependencies.iter().filter(|dep| !dep.is_override())
    }

    pub fn overrides(&self) -> impl Iterator<Item = &DependencyDeclaration> {
        self.dependencies.iter().filter(|dep| dep.is_override())
    }

    /// Options set for `target`. Unknown targets have no options.
    ///
    /// `&` and the package's own name both select the package's options.
    pub fn options_for(&self, target: &str) -> &OptionSet {
        self.options
            .get(&self.target_for(target))
            .unwrap_or(&EMPTY_OPTIONS)
    }

    /// Options applying to the package itself.
    pub fn package_options(&self) -> &OptionSet {
        self.options
            .get(&OptionTarget::Package)
            .unwrap_or(&EMPTY_OPTIONS)
    }

    /// Every target that has at least one option, with its options.
    pub fn option_targets(&self) -> &BTreeMap<OptionTarget, OptionSet> {
        &self.options
    }

    /// Every option as a flat list: the package's first, then each
    /// dependency's in declaration order, keys sorted within a target.
    pub fn build_options(&self) -> Vec<BuildOption> {
        std::iter::once(OptionTarget::Package)
            .chain(
                self.dependencies
                    .iter()
                    .map(|dep| OptionTarget::Dependency(dep.name.clone())),
            )
            .flat_map(|target| {
                self.options
                    .get(&target)
                    .into_iter()
                    .flat_map(|set| set.iter())
                    .map(move |(key, value)| BuildOption {
                        target: target.clone(),
                        key: key.to_string(),
                        value: value.clone(),
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Write the manifest in `format`. Loading the result yields an equal manifest.
    pub fn render(&self, format: SourceFormat) -> Result<String> {
        format::render(self, format)
    }

    fn target_for(&self, written: &str) -> OptionTarget {
        let is_dependency = self.dependencies.iter().any(|dep| dep.name == written);
        if written == PACKAGE_TARGET || (!is_dependency && self.package() == Some(written)) {
            OptionTarget::Package
        } else {
            OptionTarget::Dependency(written.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::OptionValue;

    fn scenario() -> Manifest {
        Manifest::from_parts(
            Some("demo".into()),
            vec![
                DependencyDeclaration::new("zlib", "1.2.11", "conan/stable"),
                DependencyDeclaration::new("gtest", "1.8.0", "lasote/stable"),
            ],
            vec![
                BuildOption::new("gtest", "shared", OptionValue::Bool(false)),
                BuildOption::for_package("with_tests", OptionValue::Bool(true)),
                BuildOption::new("zlib", "shared", OptionValue::Bool(false)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn build_options_follow_declaration_order() {
        let targets: Vec<String> = scenario()
            .build_options()
            .iter()
            .map(|option| option.target.to_string())
            .collect();
        assert_eq!(targets, vec!["&", "zlib", "gtest"]);
    }

    #[test]
    fn package_is_reachable_by_name_and_ampersand() {
        let manifest = scenario();
        assert_eq!(manifest.options_for("demo"), manifest.package_options());
        assert_eq!(manifest.options_for("&"), manifest.package_options());
        assert_eq!(manifest.package_options().len(), 1);
    }

    #[test]
    fn dependency_lookup() {
        let manifest = scenario();
        assert_eq!(manifest.dependency("gtest").unwrap().version, "1.8.0");
        assert!(manifest.dependency("boost").is_none());
        assert_eq!(manifest.overrides().count(), 0);
        assert_eq!(manifest.direct_dependencies().count(), 2);
    }
}
