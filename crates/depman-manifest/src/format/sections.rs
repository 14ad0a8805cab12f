//! The INI-like sections format.
//!
//! ```text
//! [requires]
//! spdlog/0.16.3@bincrafters/stable
//!     fmt/4.1.0@bincrafters/stable  # remove at next spdlog update
//!
//! [options]
//! spdlog:fmt_external=True
//! ```
//!
//! Sections other than `[package]`, `[requires]` and `[options]` (for example
//! `[generators]`) belong to other tools and are skipped.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use super::lines::{at_line, indent_of, kind_for, parse_option_line, split_comment, unquote};
use crate::dependency::DependencyDeclaration;
use crate::error::{Error, Result};
use crate::manifest::Manifest;
use crate::option::{OptionTarget, quote};
use crate::reference::Reference;
use crate::validation::{Document, Located};

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([A-Za-z_][A-Za-z0-9_-]*)\]$").expect("Invalid section header regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Package,
    Requires,
    Options,
    Other,
}

pub(crate) fn parse(source: &str) -> Result<Document> {
    let mut document = Document::default();
    let mut section = Section::None;
    let mut seen: Vec<&str> = Vec::new();
    let mut base_indent = None;

    for (index, line) in source.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(caps) = HEADER.captures(trimmed) {
            let name = caps.get(1).map_or("", |m| m.as_str());
            section = match name {
                "package" => Section::Package,
                "requires" => Section::Requires,
                "options" => Section::Options,
                other => {
                    tracing::debug!("Skipping section [{}] at line {}", other, line_no);
                    Section::Other
                }
            };
            if section != Section::Other {
                if seen.contains(&name) {
                    return Err(Error::parse(
                        Some(line_no),
                        format!("duplicate [{}] section", name),
                    ));
                }
                seen.push(name);
            }
            continue;
        }

        match section {
            Section::None => {
                return Err(Error::parse(
                    Some(line_no),
                    format!("'{}' appears before any section header", trimmed),
                ));
            }
            Section::Other => {}
            Section::Package => {
                let Some((key, value)) = trimmed.split_once('=') else {
                    return Err(Error::parse(
                        Some(line_no),
                        format!("expected 'name = <package>', found '{}'", trimmed),
                    ));
                };
                if key.trim() != "name" {
                    return Err(Error::parse(
                        Some(line_no),
                        format!("unknown package field '{}'", key.trim()),
                    ));
                }
                let value = value.trim();
                let name = if value.starts_with('"') || value.starts_with('\'') {
                    unquote(value).map_err(|e| at_line(line_no, e))?
                } else {
                    value.to_string()
                };
                document.package = Some(name);
            }
            Section::Requires => {
                let (code, comment) = split_comment(line);
                let code = code.trim();
                if code.contains(char::is_whitespace) {
                    return Err(Error::parse(
                        Some(line_no),
                        format!("expected one reference per line, found '{}'", code),
                    ));
                }
                let reference = Reference::parse(code).map_err(|e| at_line(line_no, e))?;
                let kind = kind_for(indent_of(line), &mut base_indent);
                let mut declaration = DependencyDeclaration::from(reference).with_kind(kind);
                declaration.comment = comment;
                document
                    .entries
                    .push(Located::new(declaration, Some(line_no)));
            }
            Section::Options => {
                if let Some(option) = parse_option_line(line, line_no)? {
                    document.options.push(Located::new(option, Some(line_no)));
                }
            }
        }
    }

    Ok(document)
}

pub(crate) fn render(manifest: &Manifest) -> String {
    let mut out = String::new();

    if let Some(package) = manifest.package() {
        let _ = writeln!(out, "[package]\nname = {}\n", quote(package));
    }

    out.push_str("[requires]\n");
    for dep in manifest.dependencies() {
        if dep.is_override() {
            out.push_str("    ");
        }
        out.push_str(&dep.reference().to_string());
        if let Some(comment) = &dep.comment {
            let _ = write!(out, "  # {}", comment);
        }
        out.push('\n');
    }

    let options = manifest.build_options();
    if !options.is_empty() {
        out.push_str("\n[options]\n");
        for option in options {
            match option.target {
                OptionTarget::Package => {
                    let _ = writeln!(out, "{}={}", option.key, option.value);
                }
                OptionTarget::Dependency(name) => {
                    let _ = writeln!(out, "{}:{}={}", name, option.key, option.value);
                }
            }
        }
    }

    out
}
