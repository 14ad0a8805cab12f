//! End-to-end flow across the workspace crates
//!
//! discover -> read with size cap -> parse -> validate -> render -> reload.

use depman_fs::DEFAULT_MAX_SIZE;
use depman_fs::checksum::{content_checksum, source_checksum};
use depman_fs::{ManifestFile, discover};
use depman_manifest::{Manifest, SourceFormat};
use depman_test_utils::{ManifestDir, fixture, read_fixture};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn inexor() -> Manifest {
    Manifest::from_path(&fixture("inexor/dependencies.py")).unwrap()
}

#[rstest]
#[case(SourceFormat::Literal, ManifestFile::DependenciesPy)]
#[case(SourceFormat::Sections, ManifestFile::ConanfileTxt)]
#[case(SourceFormat::Toml, ManifestFile::DepmanToml)]
fn rendered_manifest_is_discovered_and_reloads(
    #[case] format: SourceFormat,
    #[case] file: ManifestFile,
) {
    let original = inexor();
    let dir = ManifestDir::new();
    let written = dir.write(file.as_str(), &original.render(format).unwrap());

    assert_eq!(discover(dir.root()).unwrap(), written);
    assert_eq!(Manifest::from_path(dir.root()).unwrap(), original);
}

#[rstest]
#[case(SourceFormat::Json, "deps.json")]
#[case(SourceFormat::Yaml, "deps.yaml")]
fn structured_formats_reload_by_extension(#[case] format: SourceFormat, #[case] name: &str) {
    let original = inexor();
    let dir = ManifestDir::new();
    let path = dir.write(name, &original.render(format).unwrap());

    assert_eq!(Manifest::from_path(&path).unwrap(), original);
}

#[test]
fn discovery_follows_well_known_order() {
    let dir = ManifestDir::new();
    dir.write("conanfile.txt", "[requires]\nzlib/1.2.11@conan/stable\n");
    dir.write(
        "dependencies.py",
        "requires = (\n    (\"gtest/1.8.0@lasote/stable\"),\n)\n",
    );

    let manifest = Manifest::from_path(dir.root()).unwrap();

    assert_eq!(manifest.dependencies()[0].name, "gtest");
}

#[test]
fn checksum_fingerprints_the_source_not_the_model() {
    let literal = fixture("inexor/dependencies.py");
    let sections = fixture("inexor/conanfile.txt");

    assert_eq!(
        source_checksum(&literal, DEFAULT_MAX_SIZE).unwrap(),
        content_checksum(&read_fixture("inexor/dependencies.py"))
    );
    assert_ne!(
        source_checksum(&literal, DEFAULT_MAX_SIZE).unwrap(),
        source_checksum(&sections, DEFAULT_MAX_SIZE).unwrap()
    );
    assert_eq!(
        Manifest::from_path(&literal).unwrap(),
        Manifest::from_path(&sections).unwrap()
    );
}

#[test]
fn rendering_is_stable() {
    let once = inexor().render(SourceFormat::Literal).unwrap();
    let twice = Manifest::parse(&once)
        .unwrap()
        .render(SourceFormat::Literal)
        .unwrap();

    assert_eq!(once, twice);
}
