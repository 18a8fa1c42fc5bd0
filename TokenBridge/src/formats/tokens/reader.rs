//! Token JSON reading

use super::document::{Token, TokenDocument, json_type_name};
use crate::error::{Error, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read a token JSON file from disk
///
/// # Errors
/// Returns an error if the file cannot be read or is not a token document.
pub fn read_tokens<P: AsRef<Path>>(path: P) -> Result<TokenDocument> {
    let content = fs::read_to_string(path)?;
    parse_tokens(&content)
}

/// Parse a token document from a JSON string
///
/// # Errors
/// Returns [`Error::JsonError`] if the JSON is malformed, [`Error::InvalidTokenRoot`]
/// if the root is not an object, and [`Error::InvalidToken`] for entries that
/// are not token objects.
pub fn parse_tokens(content: &str) -> Result<TokenDocument> {
    let root: Value = serde_json::from_str(content)?;
    let entries = match root {
        Value::Object(entries) => entries,
        other => {
            return Err(Error::InvalidTokenRoot {
                found: json_type_name(&other),
            });
        }
    };

    let mut doc = TokenDocument::new();
    for (name, entry) in entries {
        let token = Token::from_json(&name, entry)?;
        doc.insert(name, token);
    }

    tracing::debug!("Parsed {} tokens from JSON", doc.len());
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::tokens::{TokenKind, TokenValue};

    #[test]
    fn test_parse_tokens_keeps_order() {
        let doc = parse_tokens(
            r##"{
                "Zeta": {"$type": "color", "$value": "#000000"},
                "Alpha": {"$type": "number", "$value": 8},
                "Mid": {"$type": "string", "$value": "Inter"}
            }"##,
        )
        .unwrap();

        let names: Vec<_> = doc.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, ["Zeta", "Alpha", "Mid"]);
        assert_eq!(doc.get("Alpha").unwrap().value, TokenValue::Integer(8));
        assert_eq!(doc.get("Mid").unwrap().kind, TokenKind::String);
    }

    #[test]
    fn test_parse_tokens_malformed() {
        let err = parse_tokens("{ not json").unwrap_err();
        assert!(err.to_string().contains("Error parsing JSON"));

        let err = parse_tokens("[1, 2]").unwrap_err();
        assert!(matches!(err, Error::InvalidTokenRoot { found: "an array" }));
        assert!(err.to_string().contains("Error parsing JSON"));
    }
}
