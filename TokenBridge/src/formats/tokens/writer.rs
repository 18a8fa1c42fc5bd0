//! Token JSON writing

use super::document::TokenDocument;
use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::Path;

/// Indentation used by design tools when exporting tokens.
pub const DEFAULT_INDENT: usize = 2;

/// Write a token document to disk
///
/// # Errors
/// Returns an error if serialization or file writing fails.
pub fn write_tokens<P: AsRef<Path>>(doc: &TokenDocument, path: P) -> Result<()> {
    let json = serialize_tokens(doc)?;
    fs::write(path, json)?;
    Ok(())
}

/// Serialize a token document to pretty-printed JSON
///
/// # Errors
/// Returns [`Error::JsonWriteFailed`] if JSON serialization fails.
pub fn serialize_tokens(doc: &TokenDocument) -> Result<String> {
    serialize_tokens_with_indent(doc, DEFAULT_INDENT)
}

/// Serialize a token document to JSON indented by `indent` spaces
///
/// # Errors
/// Returns [`Error::JsonWriteFailed`] if JSON serialization fails.
pub fn serialize_tokens_with_indent(doc: &TokenDocument, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut output = Vec::new();
    let mut serializer =
        Serializer::with_formatter(&mut output, PrettyFormatter::with_indent(indent.as_bytes()));

    doc.serialize(&mut serializer)
        .map_err(|e| Error::JsonWriteFailed {
            message: e.to_string(),
        })?;

    Ok(String::from_utf8(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::tokens::{Token, TokenKind, TokenValue};

    #[test]
    fn test_serialize_tokens() {
        let mut doc = TokenDocument::new();
        doc.insert("Primary", Token::color("#97FFCB"));
        doc.insert(
            "Spacing",
            Token::new(TokenKind::Number, TokenValue::Integer(4)),
        );

        let json = serialize_tokens(&doc).unwrap();
        assert_eq!(
            json,
            "{\n  \"Primary\": {\n    \"$type\": \"color\",\n    \"$value\": \"#97FFCB\"\n  },\n  \"Spacing\": {\n    \"$type\": \"number\",\n    \"$value\": 4\n  }\n}"
        );
    }

    #[test]
    fn test_serialize_tokens_custom_indent() {
        let mut doc = TokenDocument::new();
        doc.insert("Radius", Token::new(TokenKind::Number, TokenValue::Float(1.5)));

        let json = serialize_tokens_with_indent(&doc, 4).unwrap();
        assert!(json.contains("\n    \"Radius\": {\n        \"$type\": \"number\""));
        assert!(json.contains("\"$value\": 1.5"));
    }
}
