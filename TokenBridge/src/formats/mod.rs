//! File format handlers for design token formats
//!
//! Every format converts to and from the [`TokenDocument`] in `tokens`.
//! `plist` is the binary container the palette format is stored in.

pub mod color;
pub mod outline;
pub mod palette;
pub mod plist;
pub mod swatch;
pub mod tokens;

// Re-export main document types
pub use plist::PlistValue;
pub use tokens::{Token, TokenDocument, TokenKind, TokenValue};
