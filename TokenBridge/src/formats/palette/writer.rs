//! Palette writing

use super::{
    ARCHIVE_VERSION, ARCHIVER, ARCHIVER_KEY, COLORS_KEY, NULL_OBJECT, OBJECTS_KEY, RGB_KEY,
    TOP_KEY, VERSION_KEY,
};
use crate::error::{Error, Result};
use crate::formats::color::hex_to_float_text;
use crate::formats::plist::{PlistValue, serialize_plist};
use crate::formats::tokens::{TokenDocument, TokenValue};
use indexmap::IndexMap;
use std::path::Path;

/// Write the color tokens of a document as a `.clr` palette
///
/// # Errors
/// Returns an error if a color is unusable or file writing fails.
pub fn write_palette<P: AsRef<Path>>(doc: &TokenDocument, path: P) -> Result<()> {
    let bytes = serialize_palette(doc)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Serialize the color tokens of a document to palette bytes
///
/// # Errors
/// Returns [`Error::InvalidColor`] if any color token lacks a 6-digit hex
/// value; nothing is produced in that case.
pub fn serialize_palette(doc: &TokenDocument) -> Result<Vec<u8>> {
    serialize_plist(&build_palette(doc)?)
}

/// Build the keyed-archive tree for the color tokens of a document
///
/// # Errors
/// Returns [`Error::InvalidColor`] if any color token lacks a 6-digit hex value.
pub fn build_palette(doc: &TokenDocument) -> Result<PlistValue> {
    let mut objects = vec![PlistValue::from(NULL_OBJECT)];

    for (name, token) in doc.iter() {
        if !token.is_color() {
            tracing::debug!("Skipping non-color token '{}' ({})", name, token.kind);
            continue;
        }

        let rgb = token
            .hex_digits()
            .and_then(hex_to_float_text)
            .ok_or_else(|| Error::InvalidColor {
                name: name.clone(),
                value: describe_value(&token.value),
            })?;

        let mut record = IndexMap::new();
        record.insert(RGB_KEY.to_string(), PlistValue::Data(rgb.into_bytes()));
        objects.push(PlistValue::from(name.as_str()));
        objects.push(PlistValue::Dictionary(record));
    }

    let mut top = IndexMap::new();
    top.insert(COLORS_KEY.to_string(), PlistValue::Integer(1));

    let mut root = IndexMap::new();
    root.insert(ARCHIVER_KEY.to_string(), PlistValue::from(ARCHIVER));
    root.insert(VERSION_KEY.to_string(), PlistValue::Integer(ARCHIVE_VERSION));
    root.insert(TOP_KEY.to_string(), PlistValue::Dictionary(top));
    root.insert(OBJECTS_KEY.to_string(), PlistValue::Array(objects));

    Ok(PlistValue::Dictionary(root))
}

fn describe_value(value: &TokenValue) -> String {
    match value {
        TokenValue::Invalid { reason } => format!("invalid ({reason})"),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::palette::parse_palette_bytes;
    use crate::formats::plist::parse_plist_bytes;
    use crate::formats::tokens::{Token, TokenKind};
    use pretty_assertions::assert_eq;

    fn sample() -> TokenDocument {
        let mut doc = TokenDocument::new();
        doc.insert("Primary", Token::color("#97FFCB"));
        doc.insert(
            "Spacing",
            Token::new(TokenKind::Number, TokenValue::Integer(4)),
        );
        doc.insert("Ink", Token::color("#000000"));
        doc
    }

    #[test]
    fn test_build_palette_layout() {
        let root = build_palette(&sample()).unwrap();
        assert_eq!(root.get("$archiver").and_then(PlistValue::as_str), Some("NSKeyedArchiver"));
        assert_eq!(root.get("$version"), Some(&PlistValue::Integer(100_000)));
        assert_eq!(
            root.get("$top").and_then(|top| top.get("NSColors")),
            Some(&PlistValue::Integer(1))
        );

        let objects = root.get("$objects").and_then(PlistValue::as_array).unwrap();
        assert_eq!(objects.len(), 5);
        assert_eq!(objects[0].as_str(), Some("$null"));
        assert_eq!(objects[1].as_str(), Some("Primary"));
        assert_eq!(
            objects[2].get("NSRGB").and_then(PlistValue::as_data),
            Some(&b"0.5921568627 1.0000000000 0.7960784314"[..])
        );
        assert_eq!(objects[3].as_str(), Some("Ink"));
    }

    #[test]
    fn test_palette_round_trip_drops_non_colors() {
        let bytes = serialize_palette(&sample()).unwrap();
        assert_eq!(&bytes[..8], b"bplist00");

        let doc = parse_palette_bytes(&bytes).unwrap();
        let names: Vec<&str> = doc.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["Primary", "Ink"]);
        assert_eq!(doc.get("Primary").unwrap().hex_digits(), Some("97FFCB"));
        assert_eq!(doc.get("Ink").unwrap().hex_digits(), Some("000000"));
    }

    #[test]
    fn test_empty_document() {
        let bytes = serialize_palette(&TokenDocument::new()).unwrap();
        let root = parse_plist_bytes(&bytes).unwrap();
        let objects = root.get("$objects").and_then(PlistValue::as_array).unwrap();
        assert_eq!(objects, &[PlistValue::from("$null")]);
    }

    #[test]
    fn test_bad_color_aborts() {
        let mut doc = sample();
        doc.insert("Oops", Token::color("#12345"));
        let err = serialize_palette(&doc).unwrap_err();
        assert!(matches!(err, Error::InvalidColor { ref name, .. } if *name == "Oops"));

        let mut doc = TokenDocument::new();
        doc.insert(
            "Lost",
            Token::new(TokenKind::Color, TokenValue::invalid("unreadable")),
        );
        assert!(build_palette(&doc).is_err());
    }
}
