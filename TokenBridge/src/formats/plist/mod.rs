//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT
//!
//! Binary property list (`bplist00`) format module
//!
//! Generic reader and writer for Apple's binary plist container, plus an XML
//! rendering used for display. The palette format is built on top of this.
//!
//! Layout of a binary plist:
//! - 8-byte header `bplist00`
//! - object data, each object starting with a marker byte
//! - offset table (one big-endian offset per object)
//! - 32-byte trailer describing the table

mod document;
mod reader;
mod writer;
mod xml;

pub use document::PlistValue;
pub use reader::{parse_plist_bytes, read_plist};
pub use writer::{serialize_plist, write_plist};
pub use xml::render_xml;

/// Header of every binary plist
pub const BPLIST_MAGIC: &[u8; 8] = b"bplist00";

/// Size of the trailer at the end of a binary plist
pub const TRAILER_SIZE: usize = 32;

/// Seconds between the Unix epoch and the plist epoch (2001-01-01)
pub const PLIST_EPOCH_OFFSET: i64 = 978_307_200;

// Marker high nibbles
pub(crate) const MARKER_SINGLETON: u8 = 0x0;
pub(crate) const MARKER_INT: u8 = 0x1;
pub(crate) const MARKER_REAL: u8 = 0x2;
pub(crate) const MARKER_DATE: u8 = 0x3;
pub(crate) const MARKER_DATA: u8 = 0x4;
pub(crate) const MARKER_ASCII_STRING: u8 = 0x5;
pub(crate) const MARKER_UTF16_STRING: u8 = 0x6;
pub(crate) const MARKER_UID: u8 = 0x8;
pub(crate) const MARKER_ARRAY: u8 = 0xA;
pub(crate) const MARKER_DICT: u8 = 0xD;

/// Low nibble meaning "length follows as an integer object"
pub(crate) const EXTENDED_LENGTH: u8 = 0xF;

pub(crate) const SINGLETON_FALSE: u8 = 0x08;
pub(crate) const SINGLETON_TRUE: u8 = 0x09;
