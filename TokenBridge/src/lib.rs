//! # `TokenBridge`
//!
//! Design token conversion between Figma-style JSON, Tana Paste outline text
//! and Affinity `.clr` color palettes.
//!
//! ## Supported Formats
//!
//! - **Figma JSON** - `{ name: { "$type", "$value" } }` token files, the hub format
//! - **Tana Paste** - `%%tana%%` outline text with `Field:: value` lines
//! - **Affinity (.clr)** - `NSKeyedArchiver` binary plist palettes
//! - **Adobe ASE** - recognized, conversion not implemented yet
//!
//! ## Quick Start
//!
//! ### Converting a Payload
//!
//! ```
//! use tokenbridge::converter::{Format, convert};
//!
//! let json = r##"{"Primary": {"$type": "color", "$value": "#97FFCB"}}"##;
//! let result = convert(Format::TokenJson, Format::OutlineText, json.into());
//! let outline = result.payload.unwrap();
//! assert!(outline.as_text().unwrap().contains("- Value:: 97FFCB"));
//! ```
//!
//! ### Converting Files
//!
//! ```no_run
//! use tokenbridge::prelude::*;
//!
//! let converter = Converter::new(ConverterConfig::load());
//! converter.convert_file("tokens.json", "tokens.clr", Format::TokenJson, Format::PaletteBinary)?;
//! # Ok::<(), tokenbridge::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `tokenbridge` command-line binary

pub mod config;
pub mod converter;
pub mod error;
pub mod formats;

// Re-exports for convenience
pub use error::{Error, ErrorKind, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::config::ConverterConfig;
    pub use crate::converter::{
        ConversionOutput, ConversionResult, Converter, Format, Payload, TokenCodec,
    };
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::formats::plist::PlistValue;
    pub use crate::formats::tokens::{Token, TokenDocument, TokenKind, TokenValue};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
