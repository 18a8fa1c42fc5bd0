//! Conversion between any two formats through the token model

use super::codec::{JsonCodec, OutlineCodec, PaletteCodec, SwatchCodec, TokenCodec};
use super::format::{Format, Payload};
use super::types::{ConvertPhase, ConvertProgress, ConvertProgressCallback};
use crate::config::ConverterConfig;
use crate::error::{Error, Result};
use crate::formats::plist::{parse_plist_bytes, render_xml};
use crate::formats::swatch::SWATCH_FORMAT_NAME;
use crate::formats::tokens::TokenDocument;
use std::fs;
use std::path::Path;

/// Successful conversion output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutput {
    pub payload: Payload,
    /// XML view of palette output, or the message explaining why it is missing
    pub rendered: Option<String>,
}

/// Outcome of [`Converter::convert`]; never fails, errors are carried as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub payload: Option<Payload>,
    pub is_binary: bool,
    pub error: Option<String>,
    pub rendered: Option<String>,
}

impl ConversionResult {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Dispatches conversions between formats
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConverterConfig,
}

impl Converter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Codec for a format, configured from this converter's settings
    pub fn codec(&self, format: Format) -> Box<dyn TokenCodec> {
        match format {
            Format::TokenJson => Box::new(JsonCodec {
                indent: self.config.json_indent,
            }),
            Format::OutlineText => Box::new(OutlineCodec {
                tag: self.config.outline_tag.clone(),
            }),
            Format::PaletteBinary => Box::new(PaletteCodec),
            Format::SwatchStub => Box::new(SwatchCodec),
        }
    }

    /// Decode a payload into tokens
    ///
    /// # Errors
    /// Returns an error if the payload is malformed or the format has no codec.
    pub fn decode(&self, format: Format, payload: &Payload) -> Result<TokenDocument> {
        self.codec(format).decode(payload)
    }

    /// Convert a payload from one format to another
    ///
    /// Identical formats return the payload untouched. Any other pair that
    /// involves an unimplemented format fails without decoding.
    ///
    /// # Errors
    /// Returns an error if decoding or encoding fails.
    pub fn try_convert(&self, source: Format, target: Format, payload: Payload) -> Result<ConversionOutput> {
        if source == target {
            tracing::debug!("Identity conversion for {}", source);
            return Ok(ConversionOutput {
                payload,
                rendered: None,
            });
        }

        if !source.is_implemented() || !target.is_implemented() {
            return Err(Error::NotImplemented {
                format: SWATCH_FORMAT_NAME,
            });
        }

        let doc = self.decode(source, &payload)?;
        tracing::info!(
            "Converting {}→{}: {} tokens",
            source.short_name(),
            target.short_name(),
            doc.len()
        );
        if doc.invalid_count() > 0 {
            tracing::warn!("{} tokens carry invalid values", doc.invalid_count());
        }

        let payload = self.codec(target).encode(&doc)?;
        let rendered = match &payload {
            Payload::Binary(bytes) if target == Format::PaletteBinary && self.config.render_xml => {
                Some(render_palette_xml(bytes))
            }
            _ => None,
        };

        Ok(ConversionOutput { payload, rendered })
    }

    /// Convert a payload, reporting failure as a message instead of an error
    pub fn convert(&self, source: Format, target: Format, payload: Payload) -> ConversionResult {
        match self.try_convert(source, target, payload) {
            Ok(output) => ConversionResult {
                is_binary: output.payload.is_binary(),
                payload: Some(output.payload),
                error: None,
                rendered: output.rendered,
            },
            Err(e) => {
                tracing::debug!("Conversion failed: {}", e);
                ConversionResult {
                    payload: None,
                    is_binary: false,
                    error: Some(e.to_string()),
                    rendered: None,
                }
            }
        }
    }

    /// Convert a file, writing the result to `dest`
    ///
    /// # Errors
    /// Returns an error if reading, conversion, or writing fails.
    pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        source_path: P,
        dest_path: Q,
        source: Format,
        target: Format,
    ) -> Result<ConversionOutput> {
        self.convert_file_with_progress(source_path, dest_path, source, target, &|_| {})
    }

    /// Convert a file with progress callback
    ///
    /// # Errors
    /// Returns an error if reading, conversion, or writing fails.
    pub fn convert_file_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        source_path: P,
        dest_path: Q,
        source: Format,
        target: Format,
        progress: ConvertProgressCallback,
    ) -> Result<ConversionOutput> {
        tracing::info!(
            "Converting {}→{}: {:?} → {:?}",
            source.short_name(),
            target.short_name(),
            source_path.as_ref(),
            dest_path.as_ref()
        );

        progress(&ConvertProgress::with_file(
            ConvertPhase::ReadingSource,
            1,
            3,
            source_path.as_ref().display().to_string(),
        ));
        let payload = Payload::for_format(source, fs::read(&source_path)?)?;

        progress(&ConvertProgress::with_file(
            ConvertPhase::Converting,
            2,
            3,
            format!("{} → {}", source.display_name(), target.display_name()),
        ));
        let output = self.try_convert(source, target, payload)?;

        progress(&ConvertProgress::with_file(
            ConvertPhase::WritingOutput,
            3,
            3,
            dest_path.as_ref().display().to_string(),
        ));
        fs::write(&dest_path, output.payload.as_bytes())?;

        progress(&ConvertProgress::new(ConvertPhase::Complete, 3, 3));
        tracing::info!("Conversion complete");
        Ok(output)
    }
}

/// Re-read produced palette bytes and render them as XML.
fn render_palette_xml(bytes: &[u8]) -> String {
    match parse_plist_bytes(bytes).and_then(|root| render_xml(&root)) {
        Ok(xml) => xml,
        Err(e @ Error::XmlError(_)) => e.to_string(),
        Err(e) => format!("Error converting to XML: {e}"),
    }
}

/// Convert with the default configuration
pub fn convert(source: Format, target: Format, payload: Payload) -> ConversionResult {
    Converter::default().convert(source, target, payload)
}

/// Convert with the default configuration, returning a [`Result`]
///
/// # Errors
/// Returns an error if decoding or encoding fails.
pub fn try_convert(source: Format, target: Format, payload: Payload) -> Result<ConversionOutput> {
    Converter::default().try_convert(source, target, payload)
}
