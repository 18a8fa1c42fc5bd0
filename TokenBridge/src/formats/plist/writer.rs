//! Binary plist writing and serialization

use super::document::PlistValue;
use super::{
    BPLIST_MAGIC, EXTENDED_LENGTH, MARKER_ARRAY, MARKER_ASCII_STRING, MARKER_DATA, MARKER_DATE,
    MARKER_DICT, MARKER_INT, MARKER_REAL, MARKER_UID, MARKER_UTF16_STRING, SINGLETON_FALSE,
    SINGLETON_TRUE,
};
use crate::error::{Error, Result};
use byteorder::{BigEndian, WriteBytesExt};
use std::collections::HashMap;
use std::io;
use std::path::Path;

/// Write a plist to disk in binary form
///
/// # Errors
/// Returns an error if serialization or file writing fails.
pub fn write_plist<P: AsRef<Path>>(value: &PlistValue, path: P) -> Result<()> {
    let bytes = serialize_plist(value)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Serialize a plist to `bplist00` bytes
///
/// # Errors
/// Returns [`Error::PlistWriteFailed`] if the object table cannot be written.
pub fn serialize_plist(value: &PlistValue) -> Result<Vec<u8>> {
    let mut table = ObjectTable::default();
    let top = table.flatten(value);
    write_table(&table, top).map_err(|e| Error::PlistWriteFailed {
        message: e.to_string(),
    })
}

/// An object flattened into the table; containers refer to other entries by index.
enum FlatObject<'a> {
    Scalar(&'a PlistValue),
    Str(&'a str),
    Array(Vec<usize>),
    Dict(Vec<usize>, Vec<usize>),
}

#[derive(Default)]
struct ObjectTable<'a> {
    objects: Vec<FlatObject<'a>>,
    /// Equal strings (keys included) share one object
    strings: HashMap<&'a str, usize>,
}

impl<'a> ObjectTable<'a> {
    fn flatten(&mut self, value: &'a PlistValue) -> usize {
        match value {
            PlistValue::String(s) => self.add_str(s),
            PlistValue::Array(items) => {
                let index = self.reserve();
                let refs = items.iter().map(|item| self.flatten(item)).collect();
                self.objects[index] = FlatObject::Array(refs);
                index
            }
            PlistValue::Dictionary(entries) => {
                let index = self.reserve();
                let keys = entries.keys().map(|key| self.add_str(key)).collect();
                let values = entries.values().map(|v| self.flatten(v)).collect();
                self.objects[index] = FlatObject::Dict(keys, values);
                index
            }
            scalar => {
                self.objects.push(FlatObject::Scalar(scalar));
                self.objects.len() - 1
            }
        }
    }

    fn add_str(&mut self, s: &'a str) -> usize {
        if let Some(&index) = self.strings.get(s) {
            return index;
        }
        self.objects.push(FlatObject::Str(s));
        let index = self.objects.len() - 1;
        self.strings.insert(s, index);
        index
    }

    fn reserve(&mut self) -> usize {
        self.objects.push(FlatObject::Array(Vec::new()));
        self.objects.len() - 1
    }
}

fn write_table(table: &ObjectTable<'_>, top: usize) -> io::Result<Vec<u8>> {
    let ref_size = min_bytes(table.objects.len() as u64);

    let mut output = Vec::new();
    output.extend_from_slice(BPLIST_MAGIC);

    let mut offsets = Vec::with_capacity(table.objects.len());
    for object in &table.objects {
        offsets.push(output.len() as u64);
        write_object(&mut output, object, ref_size)?;
    }

    let offset_table_offset = output.len() as u64;
    let offset_int_size = min_bytes(offset_table_offset);
    for offset in offsets {
        output.write_uint::<BigEndian>(offset, offset_int_size)?;
    }

    // Trailer: 5 unused bytes, sort version, then sizes and counts
    output.extend_from_slice(&[0u8; 6]);
    output.write_u8(offset_int_size as u8)?;
    output.write_u8(ref_size as u8)?;
    output.write_u64::<BigEndian>(table.objects.len() as u64)?;
    output.write_u64::<BigEndian>(top as u64)?;
    output.write_u64::<BigEndian>(offset_table_offset)?;

    Ok(output)
}

fn write_object(output: &mut Vec<u8>, object: &FlatObject<'_>, ref_size: usize) -> io::Result<()> {
    match object {
        FlatObject::Str(s) => write_string(output, s),
        FlatObject::Array(refs) => {
            write_marker(output, MARKER_ARRAY, refs.len())?;
            write_refs(output, refs, ref_size)
        }
        FlatObject::Dict(keys, values) => {
            write_marker(output, MARKER_DICT, keys.len())?;
            write_refs(output, keys, ref_size)?;
            write_refs(output, values, ref_size)
        }
        FlatObject::Scalar(value) => match value {
            PlistValue::Boolean(b) => {
                output.write_u8(if *b { SINGLETON_TRUE } else { SINGLETON_FALSE })
            }
            PlistValue::Integer(i) => write_int(output, *i),
            PlistValue::Real(r) => {
                output.write_u8(marker(MARKER_REAL, 3))?;
                output.write_f64::<BigEndian>(*r)
            }
            PlistValue::Date(d) => {
                output.write_u8(marker(MARKER_DATE, 3))?;
                output.write_f64::<BigEndian>(*d)
            }
            PlistValue::Data(bytes) => {
                write_marker(output, MARKER_DATA, bytes.len())?;
                output.extend_from_slice(bytes);
                Ok(())
            }
            PlistValue::Uid(uid) => {
                let size = min_bytes(uid.saturating_add(1));
                output.write_u8(marker(MARKER_UID, size as u8 - 1))?;
                output.write_uint::<BigEndian>(*uid, size)
            }
            // Strings and containers are flattened into their own variants
            PlistValue::String(s) => write_string(output, s),
            PlistValue::Array(_) | PlistValue::Dictionary(_) => Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "container left in scalar slot",
            )),
        },
    }
}

fn write_string(output: &mut Vec<u8>, s: &str) -> io::Result<()> {
    if s.is_ascii() {
        write_marker(output, MARKER_ASCII_STRING, s.len())?;
        output.extend_from_slice(s.as_bytes());
    } else {
        let units: Vec<u16> = s.encode_utf16().collect();
        write_marker(output, MARKER_UTF16_STRING, units.len())?;
        for unit in units {
            output.write_u16::<BigEndian>(unit)?;
        }
    }
    Ok(())
}

/// Negative values take 8 signed bytes; others the smallest unsigned width.
fn write_int(output: &mut Vec<u8>, value: i64) -> io::Result<()> {
    match u64::try_from(value) {
        Ok(v) if v <= 0xFF => {
            output.write_u8(marker(MARKER_INT, 0))?;
            output.write_u8(v as u8)
        }
        Ok(v) if v <= 0xFFFF => {
            output.write_u8(marker(MARKER_INT, 1))?;
            output.write_u16::<BigEndian>(v as u16)
        }
        Ok(v) if v <= 0xFFFF_FFFF => {
            output.write_u8(marker(MARKER_INT, 2))?;
            output.write_u32::<BigEndian>(v as u32)
        }
        _ => {
            output.write_u8(marker(MARKER_INT, 3))?;
            output.write_i64::<BigEndian>(value)
        }
    }
}

fn write_marker(output: &mut Vec<u8>, kind: u8, len: usize) -> io::Result<()> {
    if len < EXTENDED_LENGTH as usize {
        output.write_u8(marker(kind, len as u8))
    } else {
        output.write_u8(marker(kind, EXTENDED_LENGTH))?;
        write_int(output, len as i64)
    }
}

fn marker(kind: u8, info: u8) -> u8 {
    (kind << 4) | info
}

fn write_refs(output: &mut Vec<u8>, refs: &[usize], ref_size: usize) -> io::Result<()> {
    for &r in refs {
        output.write_uint::<BigEndian>(r as u64, ref_size)?;
    }
    Ok(())
}

/// Smallest of 1, 2, 4 or 8 bytes that can hold values below `limit`.
fn min_bytes(limit: u64) -> usize {
    if limit <= 1 << 8 {
        1
    } else if limit <= 1 << 16 {
        2
    } else if limit <= 1 << 32 {
        4
    } else {
        8
    }
}
