//! DialectParser: turns one specification file into a tagged [`Document`].

use std::path::{Path, PathBuf};

use miette::{NamedSource, SourceSpan};
use serde_yaml::{Mapping, Value};

use crate::{Dialect, Error, Result};

/// The raw parsed body of one specification file, tagged with its dialect
/// and source stem so the merger can dispatch without re-inspecting content.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub dialect: Dialect,
    /// File name without extension, e.g. `chat` for `chat.liveflow`.
    pub source_stem: String,
    pub path: PathBuf,
    pub body: Mapping,
}

impl Document {
    /// Look up a top-level section.
    pub fn section(&self, key: &str) -> Option<&Value> {
        self.body.get(key)
    }

    pub fn has_section(&self, key: &str) -> bool {
        self.body.contains_key(key)
    }

    /// Top-level keys in authored order. Non-string keys are skipped.
    pub fn section_keys(&self) -> impl Iterator<Item = &str> {
        self.body.keys().filter_map(Value::as_str)
    }
}

/// Source text with full-line comments removed.
///
/// Keeps the byte offset of every surviving line in the original text so
/// errors reported against the stripped text can be pointed back at the file
/// the user wrote.
#[derive(Debug)]
struct Stripped {
    text: String,
    line_starts: Vec<usize>,
}

impl Stripped {
    /// Map a 1-based line/column in the stripped text to an offset in the
    /// original source. Positions past the last line map to end of input.
    fn original_offset(&self, original: &str, line: usize, column: usize) -> Option<usize> {
        let start = match self.line_starts.get(line.checked_sub(1)?) {
            Some(start) => *start,
            None => return Some(original.len()),
        };
        let line = original[start..].split('\n').next().unwrap_or_default();
        // Columns count characters, not bytes.
        let byte = line
            .char_indices()
            .nth(column.saturating_sub(1))
            .map_or(line.len(), |(index, _)| index);
        Some(start + byte)
    }
}

/// Remove every line whose trimmed content starts with `#`.
///
/// Other lines, including lines with trailing comments, are kept intact.
pub fn strip_comments(src: &str) -> String {
    strip(src).text
}

fn strip(src: &str) -> Stripped {
    let mut text = String::with_capacity(src.len());
    let mut line_starts = Vec::new();
    let mut offset = 0;

    for line in src.split_inclusive('\n') {
        if !line.trim_start().starts_with('#') {
            line_starts.push(offset);
            text.push_str(line);
        }
        offset += line.len();
    }

    Stripped { text, line_starts }
}

/// Parse a specification file from disk.
pub fn parse_document(path: impl AsRef<Path>, dialect: Dialect) -> Result<Document> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| {
        Box::new(Error::Io {
            path: path.to_path_buf(),
            source: e,
        })
    })?;
    parse_str(&content, path, dialect)
}

/// Parse specification source, using `path` for the stem and error reporting.
///
/// An empty (or comment-only) file yields a document with an empty body. A
/// file whose top level is not a mapping is rejected.
pub fn parse_str(content: &str, path: impl AsRef<Path>, dialect: Dialect) -> Result<Document> {
    let path = path.as_ref();
    let stripped = strip(content);
    let named_source = || NamedSource::new(path.display().to_string(), content.to_string());

    let value: Value = serde_yaml::from_str(&stripped.text).map_err(|source| {
        let span = source.location().and_then(|loc| {
            stripped
                .original_offset(content, loc.line(), loc.column())
                .map(|offset| SourceSpan::from((offset, 0)))
        });
        Box::new(Error::StructuredParse {
            file: path.to_path_buf(),
            src: named_source(),
            span,
            source,
        })
    })?;

    let body = match value {
        Value::Mapping(mapping) => mapping,
        Value::Null => Mapping::new(),
        other => {
            let span = stripped
                .line_starts
                .first()
                .map(|start| SourceSpan::from((*start, 0)));
            return Err(Box::new(Error::NotAMapping {
                file: path.to_path_buf(),
                src: named_source(),
                span,
                found: kind_of(&other),
            }));
        }
    };

    let source_stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    tracing::debug!(
        file = %path.display(),
        %dialect,
        sections = body.len(),
        "parsed specification file"
    );

    Ok(Document {
        dialect,
        source_stem,
        path: path.to_path_buf(),
        body,
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "nothing",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
