//! The structured-literal format.
//!
//! ```text
//! name = "inexor"
//!
//! requires = (
//!     ("spdlog/0.16.3@bincrafters/stable"),
//!         ("fmt/4.1.0@bincrafters/stable"),  # remove at next spdlog update
//!     ("SDL2/2.0.5@lasote/testing"),  # not self-contained
//! )
//!
//! options = '''
//!   spdlog:fmt_external=True
//! '''
//! ```
//!
//! The source is a literal, not a program: only these three assignments are
//! understood and anything else is a parse error.

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

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(.*)$").expect("Invalid assignment regex")
});

/// One reference per line, optionally parenthesised, optionally comma-terminated.
static ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\(?\s*("(?:[^"\\]|\\.)*"|'(?:[^'\\]|\\.)*')\s*\)?\s*,?$"#)
        .expect("Invalid entry regex")
});

#[derive(Debug, Clone, Copy)]
enum State {
    Top,
    Requires {
        close: char,
        opened_at: usize,
        base_indent: Option<usize>,
    },
    Options {
        delimiter: &'static str,
        opened_at: usize,
    },
}

struct Parser {
    document: Document,
    state: State,
    seen: Vec<&'static str>,
}

pub(crate) fn parse(source: &str) -> Result<Document> {
    let mut parser = Parser {
        document: Document::default(),
        state: State::Top,
        seen: Vec::new(),
    };

    for (index, line) in source.lines().enumerate() {
        parser.line(index + 1, line)?;
    }

    match parser.state {
        State::Top => Ok(parser.document),
        State::Requires { opened_at, .. } => {
            Err(Error::parse(Some(opened_at), "unterminated requires block"))
        }
        State::Options { opened_at, .. } => {
            Err(Error::parse(Some(opened_at), "unterminated options string"))
        }
    }
}

impl Parser {
    fn line(&mut self, line_no: usize, line: &str) -> Result<()> {
        match self.state {
            State::Top => self.assignment(line_no, line),
            State::Requires {
                close,
                opened_at,
                base_indent,
            } => self.requires_line(line_no, line, close, opened_at, base_indent),
            State::Options { delimiter, .. } => self.options_line(line_no, line, delimiter),
        }
    }

    fn mark_seen(&mut self, field: &'static str, line_no: usize) -> Result<()> {
        if self.seen.contains(&field) {
            return Err(Error::parse(
                Some(line_no),
                format!("'{}' is assigned more than once", field),
            ));
        }
        self.seen.push(field);
        Ok(())
    }

    fn assignment(&mut self, line_no: usize, line: &str) -> Result<()> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(());
        }
        if line.starts_with(char::is_whitespace) {
            return Err(Error::parse(
                Some(line_no),
                format!("unexpected indented text '{}'", trimmed),
            ));
        }

        let Some(caps) = ASSIGNMENT.captures(trimmed) else {
            return Err(Error::parse(
                Some(line_no),
                format!("expected an assignment, found '{}'", trimmed),
            ));
        };
        let value = caps.get(2).map_or("", |m| m.as_str());

        match &caps[1] {
            "requires" => {
                self.mark_seen("requires", line_no)?;
                self.open_requires(line_no, value)
            }
            "options" => {
                self.mark_seen("options", line_no)?;
                self.open_options(line_no, value)
            }
            "name" => {
                self.mark_seen("name", line_no)?;
                let (code, _) = split_comment(value);
                let name = unquote(code.trim()).map_err(|e| at_line(line_no, e))?;
                self.document.package = Some(name);
                Ok(())
            }
            other => Err(Error::parse(
                Some(line_no),
                format!("unknown field '{}'", other),
            )),
        }
    }

    fn open_requires(&mut self, line_no: usize, value: &str) -> Result<()> {
        let (code, _) = split_comment(value);
        match code.trim() {
            "()" | "[]" => Ok(()),
            "(" => {
                self.state = State::Requires {
                    close: ')',
                    opened_at: line_no,
                    base_indent: None,
                };
                Ok(())
            }
            "[" => {
                self.state = State::Requires {
                    close: ']',
                    opened_at: line_no,
                    base_indent: None,
                };
                Ok(())
            }
            _ => Err(Error::parse(
                Some(line_no),
                "requires must open a '(' or '[' block with one entry per line",
            )),
        }
    }

    fn requires_line(
        &mut self,
        line_no: usize,
        line: &str,
        close: char,
        opened_at: usize,
        mut base_indent: Option<usize>,
    ) -> Result<()> {
        let (code, comment) = split_comment(line);
        let code = code.trim();
        if code.is_empty() {
            return Ok(());
        }
        if code.strip_suffix(',').unwrap_or(code) == close.to_string() {
            self.state = State::Top;
            return Ok(());
        }

        let Some(caps) = ENTRY.captures(code) else {
            return Err(Error::parse(
                Some(line_no),
                format!("expected a quoted reference, found '{}'", code),
            ));
        };
        let raw = unquote(&caps[1]).map_err(|e| at_line(line_no, e))?;
        let reference = Reference::parse(&raw).map_err(|e| at_line(line_no, e))?;

        let kind = kind_for(indent_of(line), &mut base_indent);
        let mut declaration = DependencyDeclaration::from(reference).with_kind(kind);
        declaration.comment = comment;
        tracing::trace!("line {}: {} ({})", line_no, raw, kind);

        self.document
            .entries
            .push(Located::new(declaration, Some(line_no)));
        self.state = State::Requires {
            close,
            opened_at,
            base_indent,
        };
        Ok(())
    }

    fn open_options(&mut self, line_no: usize, value: &str) -> Result<()> {
        let value = value.trim();
        let delimiter = if value.starts_with("'''") {
            "'''"
        } else if value.starts_with("\"\"\"") {
            "\"\"\""
        } else if matches!(split_comment(value).0.trim(), "\"\"" | "''") {
            return Ok(());
        } else {
            return Err(Error::parse(
                Some(line_no),
                "options must be a triple-quoted string",
            ));
        };

        self.state = State::Options {
            delimiter,
            opened_at: line_no,
        };
        self.options_line(line_no, &value[delimiter.len()..], delimiter)
    }

    fn options_line(&mut self, line_no: usize, line: &str, delimiter: &'static str) -> Result<()> {
        let (content, rest) = match line.find(delimiter) {
            Some(end) => (&line[..end], Some(&line[end + delimiter.len()..])),
            None => (line, None),
        };

        if let Some(option) = parse_option_line(content, line_no)? {
            self.document
                .options
                .push(Located::new(option, Some(line_no)));
        }

        if let Some(rest) = rest {
            let rest = rest.trim();
            if !rest.is_empty() && !rest.starts_with('#') {
                return Err(Error::parse(
                    Some(line_no),
                    format!("unexpected text after options string: '{}'", rest),
                ));
            }
            self.state = State::Top;
        }
        Ok(())
    }
}

const DIRECT_INDENT: &str = "    ";
const OVERRIDE_INDENT: &str = "        ";

pub(crate) fn render(manifest: &Manifest) -> String {
    let mut out = String::new();

    if let Some(package) = manifest.package() {
        let _ = writeln!(out, "name = {}\n", quote(package));
    }

    if manifest.dependencies().is_empty() {
        out.push_str("requires = ()\n");
    } else {
        out.push_str("requires = (\n");
        for dep in manifest.dependencies() {
            let indent = if dep.is_override() {
                OVERRIDE_INDENT
            } else {
                DIRECT_INDENT
            };
            let _ = write!(out, "{}({}),", indent, quote(&dep.reference().to_string()));
            if let Some(comment) = &dep.comment {
                let _ = write!(out, "  # {}", comment);
            }
            out.push('\n');
        }
        out.push_str(")\n");
    }

    let options = manifest.build_options();
    if !options.is_empty() {
        out.push_str("\noptions = '''\n");
        for option in options {
            match option.target {
                OptionTarget::Package => {
                    let _ = writeln!(out, "  {}={}", option.key, option.value);
                }
                OptionTarget::Dependency(name) => {
                    let _ = writeln!(out, "  {}:{}={}", name, option.key, option.value);
                }
            }
        }
        out.push_str("'''\n");
    }

    out
}
