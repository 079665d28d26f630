//! YAML error diagnostics pointing into the offending catalog document

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// YAML syntax or shape error with source location
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(ebom::yaml::syntax))]
pub struct YamlSyntaxError {
    #[source_code]
    src: NamedSource<String>,

    #[label("here")]
    span: SourceSpan,

    #[help]
    help: Option<String>,

    message: String,
}

impl YamlSyntaxError {
    /// Build a diagnostic from a serde_yml error
    pub fn from_serde_error(err: &serde_yml::Error, source: &str, filename: &str) -> Self {
        let (line, column) = err
            .location()
            .map(|loc| (loc.line(), loc.column()))
            .unwrap_or((1, 1));
        let message = err.to_string();

        Self::at_location(message.clone(), source, filename, line, column, catalog_help(&message))
    }

    /// Build a diagnostic at a 1-based line and column
    pub fn at_location(
        message: impl Into<String>,
        source: &str,
        filename: &str,
        line: usize,
        column: usize,
        help: Option<String>,
    ) -> Self {
        let offset = line_col_to_offset(source, line, column);

        Self {
            src: NamedSource::new(filename, source.to_string()),
            span: SourceSpan::from(offset..offset.saturating_add(1)),
            help,
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Convert a 1-based line/column to a byte offset, clamped to the source
fn line_col_to_offset(source: &str, line: usize, column: usize) -> usize {
    let line_start = if line <= 1 {
        0
    } else {
        match source
            .char_indices()
            .filter(|(_, c)| *c == '\n')
            .nth(line - 2)
        {
            Some((i, _)) => i + 1,
            None => return source.len().saturating_sub(1),
        }
    };

    let line_text = source[line_start..].split('\n').next().unwrap_or("");
    let col_offset = line_text
        .char_indices()
        .nth(column.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or(line_text.len());

    line_start + col_offset
}

/// Suggest a fix for common catalog authoring mistakes
fn catalog_help(message: &str) -> Option<String> {
    let msg = message.to_lowercase();

    if msg.contains("unknown variant") {
        if msg.contains("metal") || msg.contains("wood") {
            return Some("finish must be one of: metal, wood".to_string());
        }
        if msg.contains("panel") || msg.contains("hardware") {
            return Some("category must be one of: panel, edge, connector, hardware".to_string());
        }
    }

    if msg.contains("missing field") {
        return Some(
            "Every catalog item needs partId, description, finish and category".to_string(),
        );
    }

    if msg.contains("did not match any variant of untagged enum") {
        return Some(
            "A dimension is either a number (exact, +/-1 mm) or {min: .., max: ..}".to_string(),
        );
    }

    if msg.contains("invalid type") && msg.contains("expected a sequence") {
        return Some("A catalog file is a list of items; start each item with '- '".to_string());
    }

    if msg.contains("tab") {
        return Some("YAML requires spaces for indentation, not tabs.".to_string());
    }

    if msg.contains("mapping values are not allowed") {
        return Some("You may be missing a space after ':' or have incorrect indentation.".to_string());
    }

    None
}
