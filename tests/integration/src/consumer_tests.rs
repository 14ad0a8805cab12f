//! The contract a dependency resolver relies on
//!
//! A consumer only calls `dependencies()` and `options_for(target)`; these
//! tests read the Inexor manifest the way such a consumer would.

use std::collections::HashSet;

use depman_manifest::{Manifest, OptionValue};
use depman_test_utils::fixture;
use pretty_assertions::assert_eq;

fn inexor() -> Manifest {
    Manifest::from_path(&fixture("inexor/dependencies.py")).unwrap()
}

#[test]
fn every_pin_is_exact_and_unique() {
    let manifest = inexor();
    let mut names = HashSet::new();

    for dep in manifest.dependencies() {
        assert!(names.insert(dep.name.as_str()), "{} declared twice", dep.name);
        assert!(!dep.version.trim().is_empty());
        assert!(!dep.channel.trim().is_empty());
    }
    assert_eq!(names.len(), 16);
}

#[test]
fn static_linking_is_requested_for_core_libraries() {
    let manifest = inexor();

    for target in ["zlib", "gtest", "ENet", "Boost", "SDL2", "SDL2_image"] {
        assert_eq!(
            manifest.options_for(target).get("shared"),
            Some(&OptionValue::Bool(false)),
            "{} should be static",
            target
        );
    }
}

#[test]
fn every_option_target_is_declared() {
    let manifest = inexor();

    for option in manifest.build_options() {
        let target = option.target.to_string();
        assert!(
            manifest.dependency(&target).is_some(),
            "option {} targets an undeclared dependency",
            option
        );
    }
}

#[test]
fn targets_without_options_are_empty_not_errors() {
    let manifest = inexor();

    for name in ["InexorGlueGen", "doxygen", "CEF", "OpenSSL", "not-declared"] {
        assert!(manifest.options_for(name).is_empty(), "{}", name);
    }
}

#[test]
fn overrides_are_advisory_data_only() {
    let manifest = inexor();

    let fmt = manifest.dependency("fmt").unwrap();
    assert!(fmt.is_override());
    assert_eq!(fmt.reference().to_string(), "fmt/4.1.0@bincrafters/stable");

    // Overrides stay in declaration position, right after their parent.
    let names: Vec<&str> = manifest
        .dependencies()
        .iter()
        .map(|dep| dep.name.as_str())
        .collect();
    let spdlog = names.iter().position(|n| *n == "spdlog").unwrap();
    assert_eq!(names[spdlog + 1], "fmt");
}
