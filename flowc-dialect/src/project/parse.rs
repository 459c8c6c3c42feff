//! Configuration parsing from strings, with post-parse validation.

use std::str::FromStr;

use miette::SourceSpan;

use super::{BuildConfig, ProjectConfig};
use crate::{Error, Result, error::SourceContext};

impl FromStr for ProjectConfig {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_config(s, super::CONFIG_FILE)
    }
}

impl ProjectConfig {
    /// Parse flowc.toml content with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_config(content, filename)
    }
}

fn parse_config(content: &str, filename: &str) -> Result<ProjectConfig> {
    let ctx = SourceContext::new(content, filename);
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ctx.config_parse_error(e))?;
    validate_config(&config, &ctx)?;
    Ok(config)
}

fn validate_config(config: &ProjectConfig, ctx: &SourceContext) -> Result<()> {
    let name = &config.project.name;
    if let Some(reason) = invalid_name_reason(name) {
        return Err(ctx.validation_error(
            format!("invalid project name '{}': {}", name, reason),
            find_value_span(ctx.src(), name),
        ));
    }

    if config.build.debounce_ms < BuildConfig::MIN_DEBOUNCE_MS {
        return Err(ctx.validation_error(
            format!(
                "debounce_ms must be at least {}, got {}",
                BuildConfig::MIN_DEBOUNCE_MS,
                config.build.debounce_ms
            ),
            find_key_span(ctx.src(), "debounce_ms"),
        ));
    }

    Ok(())
}

/// Project names start with a letter and contain only letters, digits, `-`
/// and `_`.
fn invalid_name_reason(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Some("name cannot be empty"),
        Some(c) if !c.is_ascii_alphabetic() => return Some("name must start with a letter"),
        _ => {}
    }
    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '-' || c == '_')) {
        return Some("use only letters, digits, '-' and '_'");
    }
    None
}

/// Span of a quoted string value, excluding the quotes.
fn find_value_span(src: &str, value: &str) -> Option<SourceSpan> {
    let pattern = format!("\"{}\"", value);
    src.find(&pattern)
        .map(|pos| SourceSpan::from((pos + 1, value.len())))
}

/// Span of a `key = value` line's key.
fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(rest) = trimmed.strip_prefix(key)
            && rest.trim_start().starts_with('=')
        {
            let start = offset + (line.len() - trimmed.len());
            return Some(SourceSpan::from((start, key.len())));
        }
        offset += line.len();
    }
    None
}
