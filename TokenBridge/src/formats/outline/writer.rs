//! Outline text writing

use super::{
    DEFAULT_TAG, ERROR_FIELD, FIELD_SEPARATOR, OUTLINE_MARKER, TYPE_FIELD, VALUE_FIELD,
};
use crate::error::Result;
use crate::formats::tokens::{Token, TokenDocument, TokenValue};
use serde_json::Value;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Write a token document to disk as outline text
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_outline<P: AsRef<Path>>(doc: &TokenDocument, path: P) -> Result<()> {
    fs::write(path, serialize_outline(doc))?;
    Ok(())
}

/// Serialize a token document to outline text using the default tag
pub fn serialize_outline(doc: &TokenDocument) -> String {
    serialize_outline_with_tag(doc, DEFAULT_TAG)
}

/// Serialize a token document to outline text, tagging every header with `tag`
pub fn serialize_outline_with_tag(doc: &TokenDocument, tag: &str) -> String {
    let mut output = String::with_capacity(16 + doc.len() * 64);
    output.push_str(OUTLINE_MARKER);
    output.push_str("\n\n");

    for (name, token) in doc.iter() {
        write_block(&mut output, name, token, tag);
    }

    output
}

fn write_block(output: &mut String, name: &str, token: &Token, tag: &str) {
    // Writing into a String cannot fail
    let _ = writeln!(output, "- {name} #[[{tag}]]");
    let _ = writeln!(output, "  - {TYPE_FIELD}{FIELD_SEPARATOR} {}", token.kind);

    match &token.value {
        TokenValue::Invalid { reason } => {
            let _ = writeln!(output, "  - {ERROR_FIELD}{FIELD_SEPARATOR} {reason}");
        }
        value => {
            let text = match token.hex_digits() {
                Some(digits) => digits.to_string(),
                None => value.to_string(),
            };
            let _ = writeln!(output, "  - {VALUE_FIELD}{FIELD_SEPARATOR} {text}");
        }
    }

    for (field, value) in &token.extra {
        let text = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        if !is_writable_field(field, &text) {
            tracing::debug!("Field '{}' of '{}' cannot be written as outline text", field, name);
            continue;
        }
        let _ = writeln!(output, "  - {field}{FIELD_SEPARATOR} {text}");
    }

    output.push('\n');
}

/// Extra fields must survive a re-read as themselves.
fn is_writable_field(field: &str, text: &str) -> bool {
    let reserved = [TYPE_FIELD, VALUE_FIELD, ERROR_FIELD]
        .iter()
        .any(|name| field.eq_ignore_ascii_case(name));

    !reserved
        && !field.is_empty()
        && !field.contains(FIELD_SEPARATOR)
        && !field.contains('\n')
        && !text.contains('\n')
}
