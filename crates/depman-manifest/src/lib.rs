//! Dependency manifest model, loader and validator.
//!
//! A manifest pins the third-party packages a build needs (name, version and
//! channel, with optional rationale comments) and the build options passed
//! to them. This crate loads and validates manifests and exposes them
//! read-only; resolving, fetching and building belong to the consuming
//! package manager.
//!
//! ```
//! use depman_manifest::{Manifest, OptionValue};
//!
//! let manifest = Manifest::parse(r#"
//! requires = (
//!     ("zlib/1.2.11@conan/stable"),
//!     ("gtest/1.8.0@lasote/stable"),
//! )
//!
//! options = '''
//!   zlib:shared=False
//! '''
//! "#).unwrap();
//!
//! assert_eq!(manifest.dependencies()[1].name, "gtest");
//! assert_eq!(
//!     manifest.options_for("zlib").get("shared"),
//!     Some(&OptionValue::Bool(false))
//! );
//! assert!(manifest.options_for("gtest").is_empty());
//! ```

pub mod config;
pub mod dependency;
pub mod error;
pub mod format;
pub mod lint;
pub mod manifest;
pub mod option;
pub mod reference;
mod validation;

pub use config::LoadOptions;
pub use dependency::{DependencyDeclaration, DependencyKind};
pub use error::{Error, Field, Result};
pub use format::SourceFormat;
pub use lint::{Finding, lint};
pub use manifest::Manifest;
pub use option::{BuildOption, OptionSet, OptionTarget, OptionValue, PACKAGE_TARGET};
pub use reference::Reference;
