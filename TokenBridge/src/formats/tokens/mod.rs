//! Token JSON format module
//!
//! The Figma-style `{ name: { "$type", "$value" } }` document that serves as
//! the hub every other format converts through.

mod document;
mod reader;
mod writer;

pub use document::{ERROR_KEY, TYPE_KEY, Token, TokenDocument, TokenKind, TokenValue, VALUE_KEY};
pub use reader::{parse_tokens, read_tokens};
pub use writer::{
    DEFAULT_INDENT, serialize_tokens, serialize_tokens_with_indent, write_tokens,
};
