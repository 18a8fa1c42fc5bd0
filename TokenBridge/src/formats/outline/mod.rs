//! Outline text (Tana Paste) format module
//!
//! A `%%tana%%` header followed by one block per token:
//!
//! ```text
//! %%tana%%
//!
//! - Primary #[[Design Token]]
//!   - Type:: color
//!   - Value:: 97FFCB
//! ```

mod reader;
mod writer;

pub use reader::{parse_outline, parse_outline_bytes, read_outline};
pub use writer::{serialize_outline, serialize_outline_with_tag, write_outline};

/// First line of every outline document.
pub const OUTLINE_MARKER: &str = "%%tana%%";

/// Prefix of a block header line.
pub const BLOCK_MARKER: &str = "- ";

/// Separator between a field name and its value.
pub const FIELD_SEPARATOR: &str = "::";

/// Tag attached to every token header by default.
pub const DEFAULT_TAG: &str = "Design Token";

/// Field names with a meaning of their own (compared case-insensitively).
pub(crate) const TYPE_FIELD: &str = "Type";
pub(crate) const VALUE_FIELD: &str = "Value";
pub(crate) const ERROR_FIELD: &str = "Error";
