//! Grammar pieces shared by the line-oriented formats.

use crate::dependency::DependencyKind;
use crate::error::{Error, Result};
use crate::option::{BuildOption, OptionTarget, OptionValue};

/// Attach a line number to a parse error raised without one.
pub(crate) fn at_line(line: usize, err: Error) -> Error {
    match err {
        Error::Parse { line: None, message } => Error::Parse {
            line: Some(line),
            message,
        },
        other => other,
    }
}

/// Leading whitespace width, counting a tab as four columns.
pub(crate) fn indent_of(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { 4 } else { 1 })
        .sum()
}

/// Entries indented deeper than the first entry of their block are override pins.
pub(crate) fn kind_for(indent: usize, base: &mut Option<usize>) -> DependencyKind {
    match *base {
        None => {
            *base = Some(indent);
            DependencyKind::Direct
        }
        Some(base) if indent > base => DependencyKind::Override,
        Some(_) => DependencyKind::Direct,
    }
}

/// Split a trailing `#` comment off a line, ignoring `#` inside quotes.
///
/// Returns the code part and the trimmed comment text, if any.
pub(crate) fn split_comment(line: &str) -> (&str, Option<String>) {
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (Some(_), '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (None, '"' | '\'') => quote = Some(c),
            (None, '#') => {
                let comment = line[i + 1..].trim();
                let comment = (!comment.is_empty()).then(|| comment.to_string());
                return (&line[..i], comment);
            }
            _ => {}
        }
    }

    (line, None)
}

/// Strip the quotes from a `"..."` or `'...'` string and resolve escapes.
pub(crate) fn unquote(quoted: &str) -> Result<String> {
    let mut chars = quoted.chars();
    let open = match chars.next() {
        Some(c @ ('"' | '\'')) => c,
        _ => return Err(Error::parse(None, format!("expected a quoted string, found {}", quoted))),
    };

    let mut value = String::new();
    let mut escaped = false;
    let mut closed = false;
    for c in chars.by_ref() {
        if escaped {
            value.push(match c {
                'n' => '\n',
                't' => '\t',
                'r' => '\r',
                other => other,
            });
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == open {
            closed = true;
            break;
        } else {
            value.push(c);
        }
    }

    if !closed {
        return Err(Error::parse(None, format!("unterminated string {}", quoted)));
    }
    if chars.next().is_some() {
        return Err(Error::parse(
            None,
            format!("unexpected text after string {}", quoted),
        ));
    }
    Ok(value)
}

/// Parse an option value as written after `=`.
pub(crate) fn parse_value(raw: &str) -> Result<OptionValue> {
    let raw = raw.trim();
    if raw.starts_with('"') || raw.starts_with('\'') {
        return Ok(OptionValue::classify(&unquote(raw)?));
    }
    Ok(OptionValue::classify(raw))
}

/// Parse one `target:key=value` (or `key=value`) line.
///
/// Blank lines and `#` comment lines yield `None`.
pub(crate) fn parse_option_line(line: &str, line_no: usize) -> Result<Option<BuildOption>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let Some((assignee, value)) = trimmed.split_once('=') else {
        return Err(Error::parse(
            Some(line_no),
            format!("expected 'target:key=value', found '{}'", trimmed),
        ));
    };

    let (target, key) = match assignee.split_once(':') {
        Some((target, key)) => {
            let target = target.trim();
            if target.is_empty() {
                return Err(Error::parse(Some(line_no), "empty option target"));
            }
            (OptionTarget::from_written(target), key.trim())
        }
        None => (OptionTarget::Package, assignee.trim()),
    };

    if key.is_empty() {
        return Err(Error::parse(Some(line_no), "empty option key"));
    }
    if value.trim().is_empty() {
        return Err(Error::parse(
            Some(line_no),
            format!("missing value for option '{}'", key),
        ));
    }

    let value = parse_value(value).map_err(|e| at_line(line_no, e))?;
    tracing::trace!("line {}: option {}:{}={}", line_no, target, key, value);

    Ok(Some(BuildOption {
        target,
        key: key.to_string(),
        value,
    }))
}
