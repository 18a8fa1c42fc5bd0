use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::fs;
use tempfile::tempdir;
use tokenbridge::converter::{convert, try_convert};
use tokenbridge::formats::color::{floats_to_hex, hex_to_float_text};
use tokenbridge::formats::outline::{parse_outline, serialize_outline};
use tokenbridge::formats::palette::{parse_palette_bytes, serialize_palette};
use tokenbridge::formats::plist::{PlistValue, serialize_plist};
use tokenbridge::formats::tokens::parse_tokens;
use tokenbridge::prelude::*;

/// Token names with inner spaces and `#`, trimmed at both ends
const TOKEN_NAME: &str = "[A-Za-z]([A-Za-z0-9 _#]{0,14}[A-Za-z0-9])?";

fn color_document(colors: &[(String, String)]) -> TokenDocument {
    let mut doc = TokenDocument::new();
    for (name, hex) in colors {
        doc.insert(name.clone(), Token::color(format!("#{hex}")));
    }
    doc
}

fn palette_archive(objects: Vec<PlistValue>) -> Vec<u8> {
    let mut root = indexmap::IndexMap::new();
    root.insert("$archiver".to_string(), PlistValue::from("NSKeyedArchiver"));
    root.insert("$objects".to_string(), PlistValue::Array(objects));
    serialize_plist(&PlistValue::Dictionary(root)).unwrap()
}

fn nsrgb(bytes: &[u8]) -> PlistValue {
    let mut record = indexmap::IndexMap::new();
    record.insert("NSRGB".to_string(), PlistValue::Data(bytes.to_vec()));
    PlistValue::Dictionary(record)
}

#[test]
fn test_json_to_outline_block() {
    let json = r##"{"Primary":{"$type":"color","$value":"#97FFCB"}}"##;
    let result = convert(Format::TokenJson, Format::OutlineText, json.into());
    let text = result.payload.unwrap();
    let text = text.as_text().unwrap();

    assert!(text.starts_with("%%tana%%\n"));
    assert!(text.contains("- Primary #[[Design Token]]\n  - Type:: color\n  - Value:: 97FFCB\n"));
}

#[test]
fn test_outline_number_to_json() {
    let outline = "%%tana%%\n\n- Spacing #[[Design Token]]\n  - Type:: number\n  - Value:: 4\n";
    let output = try_convert(Format::OutlineText, Format::TokenJson, outline.into()).unwrap();
    let json: serde_json::Value = serde_json::from_str(output.payload.as_text().unwrap()).unwrap();
    assert_eq!(json["Spacing"]["$value"], serde_json::json!(4));
    assert_eq!(json["Spacing"]["$type"], serde_json::json!("number"));
}

#[test]
fn test_palette_accent_to_json() {
    let bytes = palette_archive(vec![
        PlistValue::from("$null"),
        PlistValue::from("Accent"),
        nsrgb(b"1 0 0"),
    ]);
    let output = try_convert(Format::PaletteBinary, Format::TokenJson, Payload::Binary(bytes)).unwrap();
    let doc = parse_tokens(output.payload.as_text().unwrap()).unwrap();
    assert_eq!(doc.len(), 1);
    assert_eq!(
        doc.get("Accent").unwrap().value,
        TokenValue::Text("#FF0000".to_string())
    );
}

#[test]
fn test_malformed_json_message() {
    let result = convert(Format::TokenJson, Format::PaletteBinary, "{\"a\": ".into());
    assert!(result.payload.is_none());
    assert!(result.error.unwrap().contains("Error parsing JSON"));
}

#[test]
fn test_identity_conversions() {
    let cases = [
        (Format::TokenJson, Payload::from("not even json")),
        (Format::OutlineText, Payload::from("%%tana%%\n- x")),
        (Format::PaletteBinary, Payload::Binary(vec![1, 2, 3])),
        (Format::SwatchStub, Payload::Binary(b"ASEF".to_vec())),
    ];
    for (format, payload) in cases {
        let result = convert(format, format, payload.clone());
        assert_eq!(result.payload, Some(payload));
        assert_eq!(result.error, None);
    }
}

#[test]
fn test_palette_drops_non_colors() {
    let json = r##"{
        "Primary": {"$type": "color", "$value": "#97FFCB"},
        "Spacing": {"$type": "number", "$value": 8},
        "Ink": {"$type": "color", "$value": "#101820"}
    }"##;
    let clr = try_convert(Format::TokenJson, Format::PaletteBinary, json.into()).unwrap();
    let back = try_convert(Format::PaletteBinary, Format::TokenJson, clr.payload).unwrap();
    let doc = parse_tokens(back.payload.as_text().unwrap()).unwrap();

    let names: Vec<&str> = doc.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["Primary", "Ink"]);
    assert_eq!(doc.get("Ink").unwrap().hex_digits(), Some("101820"));
}

#[test]
fn test_invalid_palette_entry_survives_to_outline() {
    let bytes = palette_archive(vec![
        PlistValue::from("$null"),
        PlistValue::from("Good"),
        nsrgb(b"0 0 1"),
        PlistValue::from("Broken"),
        nsrgb(b"abc"),
    ]);
    let output = try_convert(Format::PaletteBinary, Format::OutlineText, Payload::Binary(bytes)).unwrap();
    let text = output.payload.as_text().unwrap();
    assert!(text.contains("- Good #[[Design Token]]\n  - Type:: color\n  - Value:: 0000FF\n"));
    assert!(text.contains("- Broken #[[Design Token]]\n  - Type:: color\n  - Error:: "));

    let doc = parse_outline(text);
    assert!(doc.get("Broken").unwrap().value.is_invalid());
}

#[test]
fn test_file_conversion_chain() {
    let dir = tempdir().unwrap();
    let json_path = dir.path().join("brand.json");
    let clr_path = dir.path().join("brand.clr");
    let tana_path = dir.path().join("brand.tana");
    fs::write(
        &json_path,
        r##"{"Mint": {"$type": "color", "$value": "#97ffcb"}}"##,
    )
    .unwrap();

    let converter = Converter::default();
    let output = converter
        .convert_file(&json_path, &clr_path, Format::TokenJson, Format::PaletteBinary)
        .unwrap();
    assert!(output.rendered.unwrap().contains("<key>NSRGB</key>"));

    let source = Format::from_path(&clr_path).unwrap();
    let target = Format::from_path(&tana_path).unwrap();
    converter.convert_file(&clr_path, &tana_path, source, target).unwrap();

    let text = fs::read_to_string(&tana_path).unwrap();
    assert!(text.contains("  - Value:: 97FFCB\n"));
}

#[test]
fn test_configured_converter() {
    let config = ConverterConfig::from_toml("outline_tag = \"Color\"\njson_indent = 4\n").unwrap();
    let converter = Converter::new(config);

    let outline = "- Ink #[[Color]]\n  - Type:: color\n  - Value:: 000000\n";
    let output = converter
        .try_convert(Format::OutlineText, Format::TokenJson, outline.into())
        .unwrap();
    assert!(output.payload.as_text().unwrap().contains("\n    \"Ink\": {\n        \"$type\""));

    let back = converter
        .try_convert(Format::TokenJson, Format::OutlineText, output.payload)
        .unwrap();
    assert!(back.payload.as_text().unwrap().contains("- Ink #[[Color]]"));
}

#[test]
fn test_swatch_is_not_implemented() {
    let result = convert(Format::OutlineText, Format::SwatchStub, "%%tana%%".into());
    let err = result.error.unwrap();
    assert!(err.contains("not implemented"));
    assert!(!result.is_binary);
}

proptest! {
    #[test]
    fn prop_hex_round_trip(hex in "[0-9A-F]{6}") {
        let text = hex_to_float_text(&hex).unwrap();
        prop_assert_eq!(floats_to_hex(&text).unwrap(), hex);
    }

    #[test]
    fn prop_colors_round_trip_through_outline(
        colors in prop::collection::btree_map(TOKEN_NAME, "[0-9A-F]{6}", 0..8)
    ) {
        let colors: Vec<(String, String)> = colors.into_iter().collect();
        let doc = color_document(&colors);
        prop_assert_eq!(parse_outline(&serialize_outline(&doc)), doc);
    }

    #[test]
    fn prop_colors_round_trip_through_palette(
        colors in prop::collection::btree_map(TOKEN_NAME, "[0-9A-F]{6}", 0..8)
    ) {
        let colors: Vec<(String, String)> = colors.into_iter().collect();
        let doc = color_document(&colors);
        let bytes = serialize_palette(&doc).unwrap();
        prop_assert_eq!(parse_palette_bytes(&bytes).unwrap(), doc);
    }
}
