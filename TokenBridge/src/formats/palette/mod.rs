//! Affinity color palette (`.clr`) format module
//!
//! A palette is an `NSKeyedArchiver` binary plist whose `$objects` table holds
//! a `$null` placeholder followed by alternating color names and
//! `{"NSRGB": <float triple bytes>}` records. Names and records are paired by
//! position; archive UID references are not resolved.

mod reader;
mod writer;

pub use reader::{parse_palette, parse_palette_bytes, read_palette};
pub use writer::{build_palette, serialize_palette, write_palette};

/// Value of the `$archiver` key
pub const ARCHIVER: &str = "NSKeyedArchiver";

/// Value of the `$version` key
pub const ARCHIVE_VERSION: i64 = 100_000;

/// Placeholder string at the head of the object table
pub const NULL_OBJECT: &str = "$null";

pub(crate) const ARCHIVER_KEY: &str = "$archiver";
pub(crate) const VERSION_KEY: &str = "$version";
pub(crate) const TOP_KEY: &str = "$top";
pub(crate) const OBJECTS_KEY: &str = "$objects";
pub(crate) const COLORS_KEY: &str = "NSColors";
pub(crate) const RGB_KEY: &str = "NSRGB";
