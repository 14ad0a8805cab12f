//! Rendered output of the zlib/gtest scenario, pinned as inline snapshots.

use depman_manifest::{DependencyDeclaration, DependencyKind, Manifest, SourceFormat};
use depman_test_utils::ZLIB_GTEST;
use insta::assert_snapshot;

fn scenario() -> Manifest {
    Manifest::parse(ZLIB_GTEST).unwrap()
}

#[test]
fn literal_render() {
    assert_snapshot!(scenario().render(SourceFormat::Literal).unwrap(), @r###"
    requires = (
        ("zlib/1.2.11@conan/stable"),
        ("gtest/1.8.0@lasote/stable"),
    )

    options = '''
      zlib:shared=False
      gtest:no_gmock=True
      gtest:shared=False
    '''
    "###);
}

#[test]
fn sections_render() {
    assert_snapshot!(scenario().render(SourceFormat::Sections).unwrap(), @r###"
    [requires]
    zlib/1.2.11@conan/stable
    gtest/1.8.0@lasote/stable

    [options]
    zlib:shared=False
    gtest:no_gmock=True
    gtest:shared=False
    "###);
}

#[test]
fn json_render() {
    assert_snapshot!(scenario().render(SourceFormat::Json).unwrap(), @r###"
    {
      "dependency": [
        {
          "name": "zlib",
          "version": "1.2.11",
          "channel": "conan/stable"
        },
        {
          "name": "gtest",
          "version": "1.8.0",
          "channel": "lasote/stable"
        }
      ],
      "options": {
        "gtest": {
          "no_gmock": true,
          "shared": false
        },
        "zlib": {
          "shared": false
        }
      }
    }
    "###);
}

#[test]
fn overrides_and_comments_render_indented() {
    let manifest = Manifest::from_parts(
        Some("inexor".into()),
        vec![
            DependencyDeclaration::new("spdlog", "0.16.3", "bincrafters/stable"),
            DependencyDeclaration::new("fmt", "4.1.0", "bincrafters/stable")
                .with_comment("remove at next spdlog update")
                .with_kind(DependencyKind::Override),
        ],
        Vec::new(),
    )
    .unwrap();

    assert_snapshot!(manifest.render(SourceFormat::Literal).unwrap(), @r###"
    name = "inexor"

    requires = (
        ("spdlog/0.16.3@bincrafters/stable"),
            ("fmt/4.1.0@bincrafters/stable"),  # remove at next spdlog update
    )
    "###);

    assert_snapshot!(manifest.render(SourceFormat::Sections).unwrap(), @r###"
    [package]
    name = "inexor"

    [requires]
    spdlog/0.16.3@bincrafters/stable
        fmt/4.1.0@bincrafters/stable  # remove at next spdlog update
    "###);
}
