//! Format identifiers and conversion payloads

use crate::error::{Error, Result};
use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// A design token format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Affinity `.clr` binary palette
    PaletteBinary,
    /// Figma-style token JSON
    TokenJson,
    /// Tana Paste outline text
    OutlineText,
    /// Adobe `.ase` swatches (recognized, not implemented)
    SwatchStub,
}

impl Format {
    /// Every format, in menu order
    pub const ALL: [Format; 4] = [
        Format::PaletteBinary,
        Format::TokenJson,
        Format::OutlineText,
        Format::SwatchStub,
    ];

    /// Name shown to users
    pub fn display_name(self) -> &'static str {
        match self {
            Format::PaletteBinary => "Affinity (.clr)",
            Format::TokenJson => "Figma JSON",
            Format::OutlineText => "Tana Paste",
            Format::SwatchStub => "Adobe ASE",
        }
    }

    /// Short name used in log lines
    pub fn short_name(self) -> &'static str {
        match self {
            Format::PaletteBinary => "CLR",
            Format::TokenJson => "JSON",
            Format::OutlineText => "Tana",
            Format::SwatchStub => "ASE",
        }
    }

    /// Preferred file extension
    pub fn extension(self) -> &'static str {
        match self {
            Format::PaletteBinary => "clr",
            Format::TokenJson => "json",
            Format::OutlineText => "tana",
            Format::SwatchStub => "ase",
        }
    }

    /// Whether payloads of this format are raw bytes rather than text
    pub fn is_binary(self) -> bool {
        matches!(self, Format::PaletteBinary | Format::SwatchStub)
    }

    /// Whether a codec exists for this format
    pub fn is_implemented(self) -> bool {
        self != Format::SwatchStub
    }

    /// Detect a format from a file extension (without the dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "clr" => Some(Format::PaletteBinary),
            "json" => Some(Format::TokenJson),
            "tana" | "txt" => Some(Format::OutlineText),
            "ase" => Some(Format::SwatchStub),
            _ => None,
        }
    }

    /// Detect a format from a path's extension
    ///
    /// # Errors
    /// Returns [`Error::UnknownFormat`] if the extension is missing or unknown.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| Error::UnknownFormat(path.display().to_string()))
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        if let Some(format) = Format::ALL
            .into_iter()
            .find(|f| f.display_name().eq_ignore_ascii_case(name))
        {
            return Ok(format);
        }

        match name.to_ascii_lowercase().as_str() {
            "clr" | "affinity" | "palette" => Ok(Format::PaletteBinary),
            "json" | "figma" | "tokens" => Ok(Format::TokenJson),
            "tana" | "outline" | "txt" => Ok(Format::OutlineText),
            "ase" | "adobe" => Ok(Format::SwatchStub),
            _ => Err(Error::UnknownFormat(name.to_string())),
        }
    }
}

/// Input or output of a conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Binary(Vec<u8>),
}

impl Payload {
    pub fn is_binary(&self) -> bool {
        matches!(self, Payload::Binary(_))
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Text(text) => text.as_bytes(),
            Payload::Binary(bytes) => bytes,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Payload::Text(text) => Some(text),
            Payload::Binary(_) => None,
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Payload::Text(text) => text.into_bytes(),
            Payload::Binary(bytes) => bytes,
        }
    }

    /// Text view of the payload; binary content must be UTF-8.
    ///
    /// # Errors
    /// Returns [`Error::Utf8Error`] if binary content is not UTF-8.
    pub fn to_text(&self) -> Result<Cow<'_, str>> {
        match self {
            Payload::Text(text) => Ok(Cow::Borrowed(text)),
            Payload::Binary(bytes) => Ok(Cow::Owned(String::from_utf8(bytes.clone())?)),
        }
    }

    /// Wrap raw bytes the way a format expects them.
    ///
    /// # Errors
    /// Returns [`Error::Utf8Error`] if a text format receives non-UTF-8 bytes.
    pub fn for_format(format: Format, bytes: Vec<u8>) -> Result<Self> {
        if format.is_binary() {
            Ok(Payload::Binary(bytes))
        } else {
            Ok(Payload::Text(String::from_utf8(bytes)?))
        }
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Payload {
    fn from(bytes: Vec<u8>) -> Self {
        Payload::Binary(bytes)
    }
}
