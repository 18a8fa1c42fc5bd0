//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT
//!
//! Conversion between normalized RGB float triples and hex color strings
//!
//! Palettes store colors as text like `"0.5921568871 1 0.7960785031"`, token
//! files as `#97FFCB`.

use crate::error::{Error, Result};

/// Added before truncating `value * 255` so that 10-digit float text maps back
/// to the byte it was printed from.
const QUANTIZE_EPSILON: f64 = 1e-6;

/// Convert a whitespace-separated float triple (e.g. `"0.5921568871 1 0.7960785031"`)
/// into an uppercase hex color without a leading `#` (e.g. `"97FFCB"`).
///
/// Embedded NUL padding is ignored. Every token must be numeric and at least
/// three must be present; extra channels (alpha) are ignored.
///
/// # Errors
/// Returns [`Error::InvalidRgbTriple`] if the text is not a numeric triple.
pub fn floats_to_hex(rgb: &str) -> Result<String> {
    let cleaned = rgb.replace('\0', " ");
    let channels = cleaned
        .split_whitespace()
        .map(str::parse::<f64>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| Error::InvalidRgbTriple {
            input: rgb.to_string(),
        })?;

    if channels.len() < 3 {
        return Err(Error::InvalidRgbTriple {
            input: rgb.to_string(),
        });
    }

    Ok(format!(
        "{:02X}{:02X}{:02X}",
        quantize(channels[0]),
        quantize(channels[1]),
        quantize(channels[2])
    ))
}

fn quantize(channel: f64) -> u8 {
    (channel * 255.0 + QUANTIZE_EPSILON).trunc().clamp(0.0, 255.0) as u8
}

/// Convert a hex color (`"#97FFCB"` or `"97FFCB"`) into normalized channels.
///
/// Returns `None` unless exactly six hex digits remain after the `#` prefix.
pub fn hex_to_floats(hex: &str) -> Option<[f64; 3]> {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some([
        f64::from(channel(0)?) / 255.0,
        f64::from(channel(2)?) / 255.0,
        f64::from(channel(4)?) / 255.0,
    ])
}

/// Format channels the way palettes store them: 10 decimal places, space-separated.
pub fn format_floats(channels: [f64; 3]) -> String {
    format!(
        "{:.10} {:.10} {:.10}",
        channels[0], channels[1], channels[2]
    )
}

/// Hex color to palette float text, e.g. `"#FF0000"` → `"1.0000000000 0.0000000000 0.0000000000"`.
pub fn hex_to_float_text(hex: &str) -> Option<String> {
    hex_to_floats(hex).map(format_floats)
}

/// Uppercase a 6-digit hex color and give it a leading `#`.
pub fn normalize_hex(hex: &str) -> Option<String> {
    let digits = hex.trim_start_matches('#');
    hex_to_floats(digits)?;
    Some(format!("#{}", digits.to_ascii_uppercase()))
}
