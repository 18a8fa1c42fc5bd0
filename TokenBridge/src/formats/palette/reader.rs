//! Palette reading

use super::{NULL_OBJECT, OBJECTS_KEY, RGB_KEY};
use crate::error::{Error, Result};
use crate::formats::color::floats_to_hex;
use crate::formats::plist::{PlistValue, parse_plist_bytes};
use crate::formats::tokens::{Token, TokenDocument, TokenKind, TokenValue};
use std::path::Path;

/// Read a `.clr` palette from disk
///
/// # Errors
/// Returns an error if the file cannot be read or is not a palette archive.
pub fn read_palette<P: AsRef<Path>>(path: P) -> Result<TokenDocument> {
    let data = std::fs::read(path)?;
    parse_palette_bytes(&data)
}

/// Parse palette bytes into color tokens
///
/// # Errors
/// Returns an error if the bytes are not a binary plist or the root is not a
/// dictionary.
pub fn parse_palette_bytes(data: &[u8]) -> Result<TokenDocument> {
    let root = parse_plist_bytes(data)?;
    parse_palette(&root)
}

/// Extract color tokens from a decoded palette archive
///
/// Every name that has a matching record yields a token; records whose bytes
/// do not hold a float triple yield an invalid color.
///
/// # Errors
/// Returns [`Error::InvalidPalette`] if the root is not a dictionary.
pub fn parse_palette(root: &PlistValue) -> Result<TokenDocument> {
    let entries = root.as_dictionary().ok_or_else(|| Error::InvalidPalette {
        message: format!("expected a dictionary root, found {}", root.type_name()),
    })?;

    let mut doc = TokenDocument::new();
    let Some(objects) = entries.get(OBJECTS_KEY).and_then(PlistValue::as_array) else {
        tracing::debug!("Palette has no {} table", OBJECTS_KEY);
        return Ok(doc);
    };

    let names: Vec<&str> = objects
        .iter()
        .filter_map(PlistValue::as_str)
        .filter(|name| *name != NULL_OBJECT)
        .collect();
    let records: Vec<&PlistValue> = objects
        .iter()
        .filter_map(|object| object.get(RGB_KEY))
        .collect();

    if names.len() != records.len() {
        tracing::warn!(
            "Palette has {} names but {} color records; ignoring {} unpaired",
            names.len(),
            records.len(),
            names.len().abs_diff(records.len())
        );
    }

    for (name, record) in names.into_iter().zip(records) {
        let value = match decode_record(record) {
            Ok(hex) => TokenValue::Text(format!("#{hex}")),
            Err(reason) => {
                tracing::warn!("Color '{}' is unreadable: {}", name, reason);
                TokenValue::invalid(reason)
            }
        };
        doc.insert(name, Token::new(TokenKind::Color, value));
    }

    Ok(doc)
}

fn decode_record(record: &PlistValue) -> std::result::Result<String, String> {
    let text = match record {
        PlistValue::Data(bytes) => std::str::from_utf8(bytes)
            .map_err(|e| format!("{RGB_KEY} is not UTF-8: {e}"))?,
        PlistValue::String(text) => text.as_str(),
        other => return Err(format!("{RGB_KEY} is {}, expected data", other.type_name())),
    };

    let text = text.trim_matches(|c: char| c.is_whitespace() || c == '\0');
    floats_to_hex(text).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn archive(objects: Vec<PlistValue>) -> PlistValue {
        let mut root = IndexMap::new();
        root.insert(OBJECTS_KEY.to_string(), PlistValue::Array(objects));
        PlistValue::Dictionary(root)
    }

    fn rgb(bytes: &[u8]) -> PlistValue {
        let mut record = IndexMap::new();
        record.insert(RGB_KEY.to_string(), PlistValue::Data(bytes.to_vec()));
        PlistValue::Dictionary(record)
    }

    #[test]
    fn test_parse_single_color() {
        let root = archive(vec![
            PlistValue::from("$null"),
            PlistValue::from("Accent"),
            rgb(b"1 0 0"),
        ]);
        let doc = parse_palette(&root).unwrap();
        assert_eq!(doc.len(), 1);
        let token = doc.get("Accent").unwrap();
        assert!(token.is_color());
        assert_eq!(token.value, TokenValue::Text("#FF0000".to_string()));
    }

    #[test]
    fn test_parse_padded_record() {
        let root = archive(vec![
            PlistValue::from("$null"),
            PlistValue::from("Mint"),
            rgb(b"0.5921568871 1 0.7960785031\0"),
        ]);
        let doc = parse_palette(&root).unwrap();
        assert_eq!(doc.get("Mint").unwrap().hex_digits(), Some("97FFCB"));
    }

    #[test]
    fn test_bad_record_becomes_invalid_token() {
        let root = archive(vec![
            PlistValue::from("Broken"),
            rgb(b"not a color"),
            PlistValue::from("Binary"),
            rgb(&[0xFF, 0xFE]),
        ]);
        let doc = parse_palette(&root).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.invalid_count(), 2);
        assert!(doc.get("Broken").unwrap().is_color());
    }

    #[test]
    fn test_unpaired_entries_are_ignored() {
        let root = archive(vec![
            PlistValue::from("$null"),
            PlistValue::from("One"),
            rgb(b"0 0 0"),
            PlistValue::from("Orphan"),
        ]);
        let doc = parse_palette(&root).unwrap();
        assert_eq!(doc.len(), 1);
        assert!(doc.get("Orphan").is_none());
    }

    #[test]
    fn test_missing_objects_is_empty() {
        let doc = parse_palette(&PlistValue::Dictionary(IndexMap::new())).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_non_dictionary_root() {
        let err = parse_palette(&PlistValue::Array(Vec::new())).unwrap_err();
        assert!(matches!(err, Error::InvalidPalette { .. }));
        assert!(err.to_string().starts_with("Error reading plist"));
    }

    #[test]
    fn test_garbage_bytes() {
        let err = parse_palette_bytes(b"definitely not a plist").unwrap_err();
        assert!(err.to_string().starts_with("Error reading plist"));
    }
}
