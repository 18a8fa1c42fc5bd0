//! Outline text reading
//!
//! Decoding is best-effort: malformed lines are skipped and a bad value only
//! affects its own token.

use super::{BLOCK_MARKER, ERROR_FIELD, FIELD_SEPARATOR, OUTLINE_MARKER, TYPE_FIELD, VALUE_FIELD};
use crate::error::Result;
use crate::formats::tokens::{Token, TokenDocument, TokenKind, TokenValue};
use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

static TAG_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Matches `#[[...]]` tag annotations on header lines.
fn tag_pattern() -> &'static Regex {
    TAG_PATTERN.get_or_init(|| Regex::new(r"#\[\[.*?\]\]").expect("tag pattern is a valid regex"))
}

/// Read an outline file from disk
///
/// # Errors
/// Returns an error if the file cannot be read or is not UTF-8.
pub fn read_outline<P: AsRef<Path>>(path: P) -> Result<TokenDocument> {
    let content = fs::read_to_string(path)?;
    Ok(parse_outline(&content))
}

/// Parse outline text from raw bytes
///
/// # Errors
/// Returns [`Error::Utf8Error`](crate::Error::Utf8Error) if the bytes are not UTF-8.
pub fn parse_outline_bytes(data: &[u8]) -> Result<TokenDocument> {
    let content = String::from_utf8(data.to_vec())?;
    Ok(parse_outline(&content))
}

/// Parse outline text into a token document
///
/// Never fails: garbage input yields an empty or partial document.
pub fn parse_outline(content: &str) -> TokenDocument {
    let lines: Vec<&str> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();

    let body = match lines.split_first() {
        Some((first, rest)) if first.trim() == OUTLINE_MARKER => rest,
        _ => &lines[..],
    };

    let mut doc = TokenDocument::new();
    for block in split_blocks(body) {
        let (name, token) = parse_block(&block);
        doc.insert(name, token);
    }

    tracing::debug!("Parsed {} tokens from outline text", doc.len());
    doc
}

/// Split lines into blocks, starting a new block at every line that begins
/// with the block marker in column 0. Lines before the first header form a
/// block of their own.
fn split_blocks<'a>(lines: &[&'a str]) -> Vec<Vec<&'a str>> {
    let mut blocks: Vec<Vec<&'a str>> = Vec::new();
    for &line in lines {
        if line.starts_with(BLOCK_MARKER) || blocks.is_empty() {
            blocks.push(vec![line]);
        } else if let Some(block) = blocks.last_mut() {
            block.push(line);
        }
    }
    blocks
}

fn parse_block(lines: &[&str]) -> (String, Token) {
    let header = lines
        .first()
        .map_or("", |line| line.trim().trim_start_matches('-').trim());
    let name = tag_pattern().replace_all(header, "").trim().to_string();

    let mut kind = TokenKind::Other(String::new());
    let mut raw_value = None;
    let mut error = None;
    let mut extra = IndexMap::new();

    for line in lines.iter().skip(1) {
        let Some((field, value)) = parse_field(line) else {
            tracing::debug!("Skipping unrecognized line in '{}': {:?}", name, line);
            continue;
        };

        if field.eq_ignore_ascii_case(TYPE_FIELD) {
            kind = TokenKind::from_name(value);
        } else if field.eq_ignore_ascii_case(VALUE_FIELD) {
            raw_value = Some(value.to_string());
        } else if field.eq_ignore_ascii_case(ERROR_FIELD) {
            error = Some(value.to_string());
        } else {
            extra.insert(field.to_string(), Value::String(value.to_string()));
        }
    }

    let value = resolve_value(&name, &kind, raw_value, error);
    (name, Token { kind, value, extra })
}

/// Split `- Field:: value` into trimmed `(field, value)`.
fn parse_field(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if !line.starts_with('-') {
        return None;
    }
    let (field, value) = line
        .trim_start_matches('-')
        .trim()
        .split_once(FIELD_SEPARATOR)?;
    Some((field.trim(), value.trim()))
}

fn resolve_value(
    name: &str,
    kind: &TokenKind,
    raw_value: Option<String>,
    error: Option<String>,
) -> TokenValue {
    if let Some(reason) = error.filter(|_| raw_value.is_none()) {
        return TokenValue::invalid(reason);
    }

    if kind.is_color() {
        return match raw_value {
            Some(raw) if !raw.is_empty() => {
                if raw.starts_with('#') {
                    TokenValue::Text(raw)
                } else {
                    TokenValue::Text(format!("#{raw}"))
                }
            }
            _ => {
                tracing::warn!("Color token '{}' has no value", name);
                TokenValue::invalid("color token has no value")
            }
        };
    }

    let raw_value = raw_value.unwrap_or_default();
    if kind.is_string() {
        TokenValue::Text(raw_value)
    } else {
        TokenValue::infer(&raw_value)
    }
}
