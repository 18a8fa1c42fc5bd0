//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT
//!
//! Format conversion utilities
//!
//! Every conversion decodes the source into a [`TokenDocument`] and encodes
//! it into the target:
//! - Figma JSON ↔ Tana Paste ↔ Affinity `.clr`
//! - Adobe ASE is recognized but reports "not implemented"
//!
//! [`TokenDocument`]: crate::formats::tokens::TokenDocument

mod codec;
mod dispatch;
mod format;
mod types;

pub use codec::{JsonCodec, OutlineCodec, PaletteCodec, SwatchCodec, TokenCodec};
pub use dispatch::{ConversionOutput, ConversionResult, Converter, convert, try_convert};
pub use format::{Format, Payload};
pub use types::{ConvertPhase, ConvertProgress, ConvertProgressCallback};
