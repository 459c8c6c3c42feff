use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for dialect and configuration parsing (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Holds the source content and filename so error factories don't need both
/// threaded through every call.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a config parse error from a toml error.
    pub fn config_parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::ConfigParse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error, optionally pointing at a span.
    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{}'", .path.display())]
    #[diagnostic(
        code(flowc::config_io),
        help("run flowc from a project root containing flowc.toml, or pass --project")
    )]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A specification file exists in the flows directory but cannot be
    /// read, e.g. it is not valid UTF-8.
    #[error("failed to read '{}'", .path.display())]
    #[diagnostic(code(flowc::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse '{}'", .file.display())]
    #[diagnostic(code(flowc::parse_error))]
    StructuredParse {
        file: PathBuf,
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("'{}' must contain a mapping of sections, found {found}", .file.display())]
    #[diagnostic(
        code(flowc::not_a_mapping),
        help("start the file with a top-level key such as 'model:' or 'page:'")
    )]
    NotAMapping {
        file: PathBuf,
        #[source_code]
        src: NamedSource<String>,
        #[label("top-level value")]
        span: Option<SourceSpan>,
        found: &'static str,
    },

    #[error("failed to parse flowc.toml")]
    #[diagnostic(code(flowc::config_parse_error))]
    ConfigParse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(flowc::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}

impl Error {
    /// The specification file this error belongs to, if any.
    pub fn file(&self) -> Option<&std::path::Path> {
        match self {
            Error::StructuredParse { file, .. } | Error::NotAMapping { file, .. } => Some(file),
            Error::Io { path, .. } => Some(path),
            Error::ConfigIo { .. } | Error::ConfigParse { .. } | Error::Validation { .. } => None,
        }
    }
}
