//! Checked-in manifests under test-fixtures/manifests.

use depman_manifest::{DependencyKind, Error, LoadOptions, Manifest, OptionValue, SourceFormat};
use depman_test_utils::{ManifestDir, fixture, fixtures_dir};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn inexor_dependencies_py_loads() {
    let manifest = Manifest::from_path(&fixture("inexor/dependencies.py")).unwrap();

    assert_eq!(manifest.dependencies().len(), 16);
    assert_eq!(manifest.dependencies()[0].name, "InexorGlueGen");
    assert_eq!(manifest.dependencies()[15].name, "CEF");

    let overrides: Vec<&str> = manifest.overrides().map(|d| d.name.as_str()).collect();
    assert_eq!(overrides, vec!["OpenSSL", "fmt", "libpng", "libjpeg-turbo"]);

    assert_eq!(manifest.build_options().len(), 9);
    assert_eq!(
        manifest.options_for("spdlog").get("fmt_external"),
        Some(&OptionValue::Bool(true))
    );
    assert_eq!(
        manifest.options_for("protobuf").get("with_zlib"),
        Some(&OptionValue::Bool(true))
    );
}

#[test]
fn inexor_comments_survive() {
    let manifest = Manifest::from_path(&fixture("inexor/dependencies.py")).unwrap();

    let openssl = manifest.dependency("OpenSSL").unwrap();
    assert_eq!(openssl.comment.as_deref(), Some("remove at next gRPC update"));
    assert_eq!(openssl.kind, DependencyKind::Override);

    let cef = manifest.dependency("CEF").unwrap();
    assert_eq!(cef.version, "3.3239.1709.g093cae4");
    assert_eq!(cef.comment.as_deref(), Some("not self-contained"));
    assert_eq!(cef.kind, DependencyKind::Direct);
}

#[rstest]
#[case("inexor/conanfile.txt")]
#[case("inexor/depman.toml")]
fn every_inexor_form_is_equivalent(#[case] relative: &str) {
    let reference = Manifest::from_path(&fixture("inexor/dependencies.py")).unwrap();
    let other = Manifest::from_path(&fixture(relative)).unwrap();

    assert_eq!(other, reference);
}

#[test]
fn directory_discovery_prefers_toml() {
    let manifest = Manifest::from_path(&fixtures_dir().join("inexor")).unwrap();

    assert_eq!(manifest.dependencies().len(), 16);
}

#[rstest]
#[case("invalid/duplicate.py")]
#[case("invalid/dangling.py")]
#[case("invalid/empty-channel.py")]
#[case("invalid/syntax.py")]
fn invalid_fixtures_fail(#[case] relative: &str) {
    let err = Manifest::from_path(&fixture(relative)).unwrap_err();

    let matched = match relative {
        "invalid/duplicate.py" => matches!(err, Error::DuplicateDependency { .. }),
        "invalid/dangling.py" => matches!(err, Error::DanglingOption { .. }),
        "invalid/empty-channel.py" => matches!(err, Error::EmptyField { .. }),
        _ => matches!(err, Error::Parse { line: Some(3), .. }),
    };
    assert!(matched, "{}: unexpected {:?}", relative, err);
}

#[test]
fn forced_format_overrides_extension() {
    let dir = ManifestDir::new();
    let path = dir.write("deps.cfg", "[requires]\nzlib/1.2.11@conan/stable\n");

    let options = LoadOptions::default().with_format(SourceFormat::Sections);
    let manifest = Manifest::from_path_with(&path, &options).unwrap();

    assert_eq!(manifest.dependencies()[0].name, "zlib");
}

#[test]
fn unknown_extension_is_sniffed() {
    let dir = ManifestDir::new();
    let path = dir.write("deps.cfg", "[requires]\nzlib/1.2.11@conan/stable\n");

    let manifest = Manifest::from_path(&path).unwrap();

    assert_eq!(manifest.dependencies().len(), 1);
}

#[test]
fn oversized_source_is_refused() {
    let dir = ManifestDir::new();
    let path = dir.write("dependencies.py", depman_test_utils::ZLIB_GTEST);

    let options = LoadOptions::default().with_max_size(16);
    let err = Manifest::from_path_with(&path, &options).unwrap_err();

    assert!(
        matches!(err, Error::Fs(depman_fs::Error::SourceTooLarge { .. })),
        "{:?}",
        err
    );
}

#[test]
fn missing_manifest_in_directory() {
    let dir = ManifestDir::new();

    let err = Manifest::from_path(dir.root()).unwrap_err();

    assert!(matches!(
        err,
        Error::Fs(depman_fs::Error::ManifestNotFound { .. })
    ));
}
