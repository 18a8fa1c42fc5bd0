//! XML property list rendering
//!
//! Used to show the structure of a binary palette next to the bytes. The
//! output follows Apple's `plist` DTD with tab indentation.

use super::PLIST_EPOCH_OFFSET;
use super::document::PlistValue;
use crate::error::{Error, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

const PLIST_DOCTYPE: &str = r#"plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd""#;

/// Render a plist value as an XML property list
///
/// # Errors
/// Returns an error if XML writing fails or a date is out of range.
pub fn render_xml(value: &PlistValue) -> Result<String> {
    let mut output = Vec::new();
    let mut writer = Writer::new_with_indent(&mut output, b'\t', 1);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::DocType(BytesText::from_escaped(PLIST_DOCTYPE)))?;

    let mut root = BytesStart::new("plist");
    root.push_attribute(("version", "1.0"));
    writer.write_event(Event::Start(root))?;
    write_value(&mut writer, value)?;
    writer.write_event(Event::End(BytesEnd::new("plist")))?;

    let mut xml = String::from_utf8(output)?;
    xml.push('\n');
    Ok(xml)
}

fn write_value(writer: &mut Writer<&mut Vec<u8>>, value: &PlistValue) -> Result<()> {
    match value {
        PlistValue::Boolean(b) => {
            let tag = if *b { "true" } else { "false" };
            writer.write_event(Event::Empty(BytesStart::new(tag)))?;
        }
        PlistValue::Integer(i) => write_text_element(writer, "integer", &i.to_string())?,
        PlistValue::Real(r) => write_text_element(writer, "real", &r.to_string())?,
        PlistValue::Date(seconds) => write_text_element(writer, "date", &format_date(*seconds)?)?,
        PlistValue::Data(bytes) => write_text_element(writer, "data", &STANDARD.encode(bytes))?,
        PlistValue::String(s) => write_text_element(writer, "string", s)?,
        PlistValue::Uid(uid) => {
            // Keyed archives render references as a one-entry dict
            writer.write_event(Event::Start(BytesStart::new("dict")))?;
            write_text_element(writer, "key", "CF$UID")?;
            write_text_element(writer, "integer", &uid.to_string())?;
            writer.write_event(Event::End(BytesEnd::new("dict")))?;
        }
        PlistValue::Array(items) => {
            if items.is_empty() {
                writer.write_event(Event::Empty(BytesStart::new("array")))?;
                return Ok(());
            }
            writer.write_event(Event::Start(BytesStart::new("array")))?;
            for item in items {
                write_value(writer, item)?;
            }
            writer.write_event(Event::End(BytesEnd::new("array")))?;
        }
        PlistValue::Dictionary(entries) => {
            if entries.is_empty() {
                writer.write_event(Event::Empty(BytesStart::new("dict")))?;
                return Ok(());
            }
            writer.write_event(Event::Start(BytesStart::new("dict")))?;
            for (key, entry) in entries {
                write_text_element(writer, "key", key)?;
                write_value(writer, entry)?;
            }
            writer.write_event(Event::End(BytesEnd::new("dict")))?;
        }
    }
    Ok(())
}

fn write_text_element(writer: &mut Writer<&mut Vec<u8>>, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn format_date(seconds: f64) -> Result<String> {
    let date: DateTime<Utc> = (seconds.floor() as i64)
        .checked_add(PLIST_EPOCH_OFFSET)
        .and_then(|unix| DateTime::from_timestamp(unix, 0))
        .ok_or_else(|| Error::plist(format!("date out of range: {seconds}")))?;
    Ok(date.format("%Y-%m-%dT%H:%M:%SZ").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn test_render_header() {
        let xml = render_xml(&PlistValue::Integer(7)).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<!DOCTYPE plist PUBLIC"));
        assert!(xml.contains(r#"<plist version="1.0">"#));
        assert!(xml.contains("<integer>7</integer>"));
        assert!(xml.trim_end().ends_with("</plist>"));
    }

    #[test]
    fn test_render_keyed_archive_shapes() {
        let mut top = IndexMap::new();
        top.insert("NSColors".to_string(), PlistValue::Uid(1));
        let mut root = IndexMap::new();
        root.insert("$top".to_string(), PlistValue::Dictionary(top));
        root.insert("NSRGB".to_string(), PlistValue::Data(b"1 0 0".to_vec()));
        root.insert("name".to_string(), PlistValue::from("Fish & Chips"));

        let xml = render_xml(&PlistValue::Dictionary(root)).unwrap();
        assert!(xml.contains("<key>CF$UID</key>"));
        assert!(xml.contains("<integer>1</integer>"));
        // base64 of "1 0 0"
        assert!(xml.contains("<data>MSAwIDA=</data>"));
        assert!(xml.contains("<string>Fish &amp; Chips</string>"));
        assert!(xml.contains("\t<dict>"));
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(0.0).unwrap(), "2001-01-01T00:00:00Z");
        assert_eq!(format_date(86_400.5).unwrap(), "2001-01-02T00:00:00Z");
        assert!(format_date(1e300).is_err());
    }
}
