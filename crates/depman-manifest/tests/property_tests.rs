use std::collections::{BTreeMap, HashSet};

use depman_manifest::{
    BuildOption, DependencyDeclaration, DependencyKind, Manifest, OptionValue, SourceFormat,
};
use proptest::prelude::*;

/// Every value whose kind survives being written out and read back.
fn option_value() -> impl Strategy<Value = OptionValue> {
    prop_oneof![
        any::<bool>().prop_map(OptionValue::Bool),
        "[A-Za-z0-9_.+-]{1,8}".prop_map(|s| OptionValue::classify(&s)),
        "[ -~\t\n]{0,12}".prop_map(|s| OptionValue::classify(&s)),
    ]
}

/// Non-whitespace characters that validation allows in a dependency name.
fn name() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_.+&!$%(),;?|~\\[\\]{}-]{1,10}".prop_filter("'&' names the package", |s| s != "&")
}

fn declaration() -> impl Strategy<Value = DependencyDeclaration> {
    (
        name(),
        "[A-Za-z0-9_.+/:=!-]{1,12}",
        "[A-Za-z0-9_.+/:=@!-]{1,12}",
        proptest::option::of("[ -~]{0,20}"),
        any::<bool>(),
    )
        .prop_map(|(name, version, channel, comment, is_override)| {
            let mut dep = DependencyDeclaration::new(name, version, channel);
            // Comments are stored trimmed, and blank ones are dropped.
            dep.comment = comment
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty());
            if is_override {
                dep.kind = DependencyKind::Override;
            }
            dep
        })
}

fn manifest() -> impl Strategy<Value = Manifest> {
    (
        proptest::option::of("[a-z][a-z0-9_ .#'\"-]{0,8}"),
        prop::collection::vec(declaration(), 0..8),
        prop::collection::vec(
            (
                0usize..9,
                prop::collection::btree_map("[A-Za-z0-9_.&!\\[\\]-]{1,8}", option_value(), 0..3),
            ),
            0..5,
        ),
    )
        .prop_map(|(package, declarations, option_groups)| {
            let mut seen = HashSet::new();
            let mut dependencies: Vec<DependencyDeclaration> = declarations
                .into_iter()
                .filter(|dep| seen.insert(dep.name.clone()))
                .collect();
            if let Some(first) = dependencies.first_mut() {
                first.kind = DependencyKind::Direct;
            }

            // Index 0 targets the package, the rest pick a dependency.
            let mut merged: BTreeMap<String, BTreeMap<String, OptionValue>> = BTreeMap::new();
            for (index, values) in option_groups {
                let target = match index {
                    0 => "&".to_string(),
                    n if n <= dependencies.len() => dependencies[n - 1].name.clone(),
                    _ => continue,
                };
                merged.entry(target).or_default().extend(values);
            }
            let options = merged
                .into_iter()
                .flat_map(|(target, values)| {
                    values
                        .into_iter()
                        .map(move |(key, value)| BuildOption::new(&target, key, value))
                })
                .collect();

            Manifest::from_parts(package, dependencies, options).unwrap()
        })
}

proptest! {
    #[test]
    fn render_then_load_is_identity(manifest in manifest()) {
        for format in SourceFormat::ALL {
            let rendered = manifest.render(format).unwrap();
            let loaded = Manifest::parse_as(&rendered, format);
            prop_assert!(loaded.is_ok(), "{} failed: {:?}\n{}", format, loaded, rendered);
            prop_assert_eq!(&loaded.unwrap(), &manifest, "format {}", format);
        }
    }

    #[test]
    fn declaration_order_survives_literal_form(manifest in manifest()) {
        let rendered = manifest.render(SourceFormat::Literal).unwrap();
        let loaded = Manifest::parse(&rendered).unwrap();

        let expected: Vec<&str> = manifest.dependencies().iter().map(|d| d.name.as_str()).collect();
        let actual: Vec<&str> = loaded.dependencies().iter().map(|d| d.name.as_str()).collect();
        prop_assert_eq!(actual, expected);
    }
}
