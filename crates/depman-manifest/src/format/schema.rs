//! Serde-backed formats: TOML, JSON and YAML share one document shape.
//!
//! ```toml
//! package = "inexor"
//!
//! [[dependency]]
//! name = "spdlog"
//! version = "0.16.3"
//! channel = "bincrafters/stable"
//!
//! [[dependency]]
//! name = "fmt"
//! version = "4.1.0"
//! channel = "bincrafters/stable"
//! comment = "remove at next spdlog update"
//! kind = "override"
//!
//! [options.spdlog]
//! fmt_external = true
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::dependency::{DependencyDeclaration, DependencyKind};
use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::option::{BuildOption, OptionValue};
use crate::validation::{Document, Located};

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Schema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    package: Option<String>,

    #[serde(default, rename = "dependency")]
    dependencies: Vec<SchemaDependency>,

    /// Target (`&` for the package) to key to value.
    #[serde(default, skip_serializing_if = "Pairs::is_empty")]
    options: Pairs<Pairs<SchemaValue>>,
}

/// A map read as written: entries keep source order and repeated keys
/// survive, so validation sees every option instead of the last one.
#[derive(Debug)]
struct Pairs<T>(Vec<(String, T)>);

impl<T> Default for Pairs<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> Pairs<T> {
    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> FromIterator<(String, T)> for Pairs<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T: Serialize> Serialize for Pairs<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(key, value)| (key, value)))
    }
}

struct PairsVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for PairsVisitor<T> {
    type Value = Pairs<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a table of options")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<String, T>()? {
            pairs.push(entry);
        }
        Ok(Pairs(pairs))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Pairs<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(PairsVisitor(PhantomData))
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaDependency {
    name: String,
    version: String,
    channel: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(default, skip_serializing_if = "DependencyKind::is_direct")]
    kind: DependencyKind,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum SchemaValue {
    Bool(bool),
    Integer(i64),
    String(String),
}

impl From<SchemaValue> for OptionValue {
    fn from(value: SchemaValue) -> Self {
        match value {
            SchemaValue::Bool(b) => OptionValue::Bool(b),
            SchemaValue::Integer(n) => OptionValue::Enum(n.to_string()),
            SchemaValue::String(s) => OptionValue::classify(&s),
        }
    }
}

impl From<&OptionValue> for SchemaValue {
    fn from(value: &OptionValue) -> Self {
        match value {
            OptionValue::Bool(b) => SchemaValue::Bool(*b),
            OptionValue::Enum(s) | OptionValue::Text(s) => SchemaValue::String(s.clone()),
        }
    }
}

impl Schema {
    fn into_document(self) -> Document {
        let entries = self
            .dependencies
            .into_iter()
            .map(|dep| {
                let declaration = DependencyDeclaration {
                    name: dep.name,
                    version: dep.version,
                    channel: dep.channel,
                    comment: dep.comment,
                    kind: dep.kind,
                };
                Located::new(declaration, None)
            })
            .collect();

        let options = self
            .options
            .0
            .into_iter()
            .flat_map(|(target, values)| {
                values.0.into_iter().map(move |(key, value)| {
                    Located::new(BuildOption::new(&target, key, value.into()), None)
                })
            })
            .collect();

        Document {
            package: self.package,
            entries,
            options,
        }
    }

    fn from_manifest(manifest: &Manifest) -> Self {
        let dependencies = manifest
            .dependencies()
            .iter()
            .map(|dep| SchemaDependency {
                name: dep.name.clone(),
                version: dep.version.clone(),
                channel: dep.channel.clone(),
                comment: dep.comment.clone(),
                kind: dep.kind,
            })
            .collect();

        let options = manifest
            .option_targets()
            .iter()
            .map(|(target, set)| {
                let values: Pairs<SchemaValue> = set
                    .iter()
                    .map(|(key, value)| (key.to_string(), SchemaValue::from(value)))
                    .collect();
                (target.to_string(), values)
            })
            .collect();

        Self {
            package: manifest.package().map(str::to_string),
            dependencies,
            options,
        }
    }
}

fn render_error(format: &str, err: impl std::fmt::Display) -> Error {
    Error::Render {
        format: format.to_string(),
        message: err.to_string(),
    }
}

pub(crate) fn parse_toml(source: &str) -> Result<Document> {
    let schema: Schema = toml::from_str(source).map_err(|e| Error::parse(None, e.to_string()))?;
    Ok(schema.into_document())
}

pub(crate) fn parse_json(source: &str) -> Result<Document> {
    let schema: Schema = serde_json::from_str(source).map_err(|e| Error::Parse {
        line: Some(e.line()),
        message: e.to_string(),
    })?;
    Ok(schema.into_document())
}

pub(crate) fn parse_yaml(source: &str) -> Result<Document> {
    let schema: Schema = serde_yaml::from_str(source).map_err(|e| Error::Parse {
        line: e.location().map(|location| location.line()),
        message: e.to_string(),
    })?;
    Ok(schema.into_document())
}

pub(crate) fn render_toml(manifest: &Manifest) -> Result<String> {
    toml::to_string_pretty(&Schema::from_manifest(manifest)).map_err(|e| render_error("toml", e))
}

pub(crate) fn render_json(manifest: &Manifest) -> Result<String> {
    serde_json::to_string_pretty(&Schema::from_manifest(manifest))
        .map(|mut json| {
            json.push('\n');
            json
        })
        .map_err(|e| render_error("json", e))
}

pub(crate) fn render_yaml(manifest: &Manifest) -> Result<String> {
    serde_yaml::to_string(&Schema::from_manifest(manifest)).map_err(|e| render_error("yaml", e))
}
