//! Per-format codecs behind a common trait

use super::format::{Format, Payload};
use crate::error::Result;
use crate::formats::outline::{parse_outline_bytes, serialize_outline_with_tag};
use crate::formats::palette::{parse_palette_bytes, serialize_palette};
use crate::formats::swatch::{parse_swatch_bytes, serialize_swatch};
use crate::formats::tokens::{TokenDocument, parse_tokens, serialize_tokens_with_indent};

/// Converts one format to and from the token model
pub trait TokenCodec {
    /// Format handled by this codec
    fn format(&self) -> Format;

    /// Read a payload into tokens
    ///
    /// # Errors
    /// Returns an error if the payload is malformed for this format.
    fn decode(&self, payload: &Payload) -> Result<TokenDocument>;

    /// Write tokens as a payload of this format
    ///
    /// # Errors
    /// Returns an error if the tokens cannot be represented in this format.
    fn encode(&self, doc: &TokenDocument) -> Result<Payload>;
}

/// Figma-style token JSON
#[derive(Debug, Clone)]
pub struct JsonCodec {
    pub indent: usize,
}

impl TokenCodec for JsonCodec {
    fn format(&self) -> Format {
        Format::TokenJson
    }

    fn decode(&self, payload: &Payload) -> Result<TokenDocument> {
        parse_tokens(&payload.to_text()?)
    }

    fn encode(&self, doc: &TokenDocument) -> Result<Payload> {
        serialize_tokens_with_indent(doc, self.indent).map(Payload::Text)
    }
}

/// Tana Paste outline text
#[derive(Debug, Clone)]
pub struct OutlineCodec {
    pub tag: String,
}

impl TokenCodec for OutlineCodec {
    fn format(&self) -> Format {
        Format::OutlineText
    }

    fn decode(&self, payload: &Payload) -> Result<TokenDocument> {
        parse_outline_bytes(payload.as_bytes())
    }

    fn encode(&self, doc: &TokenDocument) -> Result<Payload> {
        Ok(Payload::Text(serialize_outline_with_tag(doc, &self.tag)))
    }
}

/// Affinity `.clr` palette
#[derive(Debug, Clone, Copy, Default)]
pub struct PaletteCodec;

impl TokenCodec for PaletteCodec {
    fn format(&self) -> Format {
        Format::PaletteBinary
    }

    fn decode(&self, payload: &Payload) -> Result<TokenDocument> {
        parse_palette_bytes(payload.as_bytes())
    }

    fn encode(&self, doc: &TokenDocument) -> Result<Payload> {
        serialize_palette(doc).map(Payload::Binary)
    }
}

/// Adobe `.ase` swatches; both directions report not implemented
#[derive(Debug, Clone, Copy, Default)]
pub struct SwatchCodec;

impl TokenCodec for SwatchCodec {
    fn format(&self) -> Format {
        Format::SwatchStub
    }

    fn decode(&self, payload: &Payload) -> Result<TokenDocument> {
        parse_swatch_bytes(payload.as_bytes())
    }

    fn encode(&self, doc: &TokenDocument) -> Result<Payload> {
        serialize_swatch(doc).map(Payload::Binary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::formats::tokens::Token;

    #[test]
    fn test_json_codec_accepts_utf8_bytes() {
        let payload = Payload::Binary(br##"{"A": {"$type": "color", "$value": "#010203"}}"##.to_vec());
        let doc = JsonCodec { indent: 2 }.decode(&payload).unwrap();
        assert_eq!(doc.get("A").unwrap().hex_digits(), Some("010203"));
    }

    #[test]
    fn test_outline_codec_uses_tag() {
        let mut doc = TokenDocument::new();
        doc.insert("A", Token::color("#010203"));
        let codec = OutlineCodec {
            tag: "Swatch".to_string(),
        };
        let payload = codec.encode(&doc).unwrap();
        assert!(payload.as_text().unwrap().contains("- A #[[Swatch]]"));
        assert_eq!(codec.decode(&payload).unwrap(), doc);
    }

    #[test]
    fn test_codec_formats() {
        assert_eq!(PaletteCodec.format(), Format::PaletteBinary);
        assert_eq!(SwatchCodec.format(), Format::SwatchStub);
        let err = SwatchCodec.encode(&TokenDocument::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedConversion);
    }
}
