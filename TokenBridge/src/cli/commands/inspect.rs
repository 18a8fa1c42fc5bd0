//! CLI command for listing the tokens in a file

use crate::converter::{Converter, Format, Payload};
use crate::formats::color::normalize_hex;
use crate::formats::tokens::{Token, TokenValue};
use std::path::Path;

fn value_column(token: &Token) -> String {
    match &token.value {
        TokenValue::Invalid { reason } => format!("<invalid: {reason}>"),
        value => token
            .hex_digits()
            .and_then(normalize_hex)
            .unwrap_or_else(|| value.to_string()),
    }
}

/// Print the tokens of a file as a table.
///
/// # Errors
/// Returns an error if the file cannot be read or decoded.
pub fn execute(converter: &Converter, source: &Path, input_format: Option<&str>) -> anyhow::Result<()> {
    let format = match input_format {
        Some(fmt) => fmt.parse::<Format>()?,
        None => Format::from_path(source)?,
    };

    let payload = Payload::for_format(format, std::fs::read(source)?)?;
    let doc = converter.decode(format, &payload)?;

    let rows: Vec<(&str, &str, String)> = doc
        .iter()
        .map(|(name, token)| (name.as_str(), token.kind.as_str(), value_column(token)))
        .collect();

    let name_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(0).max(4);
    let type_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(0).max(4);

    println!("{:<name_width$}  {:<type_width$}  Value", "Name", "Type");
    for (name, kind, value) in &rows {
        println!("{name:<name_width$}  {kind:<type_width$}  {value}");
    }

    println!(
        "\n{} tokens ({} colors, {} invalid) in {}",
        doc.len(),
        doc.colors().count(),
        doc.invalid_count(),
        format.display_name()
    );

    Ok(())
}
