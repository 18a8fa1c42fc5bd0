//! Binary plist reading and parsing
//!
//! Every offset, length and object reference is bounds-checked against the
//! input, so damaged files produce errors rather than panics.

use super::document::PlistValue;
use super::{
    BPLIST_MAGIC, EXTENDED_LENGTH, MARKER_ARRAY, MARKER_ASCII_STRING, MARKER_DATA, MARKER_DATE,
    MARKER_DICT, MARKER_INT, MARKER_REAL, MARKER_SINGLETON, MARKER_UID, MARKER_UTF16_STRING,
    SINGLETON_FALSE, SINGLETON_TRUE, TRAILER_SIZE,
};
use crate::error::{Error, Result};
use byteorder::{BigEndian, ByteOrder};
use indexmap::IndexMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Upper bound on values in a parsed tree. Shared references are expanded
/// into copies, so a small file can describe a very large tree.
const MAX_VALUE_NODES: usize = 1 << 18;

/// Read a binary plist file from disk
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid binary plist.
pub fn read_plist<P: AsRef<Path>>(path: P) -> Result<PlistValue> {
    let mut file = File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    parse_plist_bytes(&buffer)
}

/// Parse binary plist data from bytes
///
/// # Errors
/// Returns [`Error::InvalidPlistMagic`] if the header is wrong and
/// [`Error::PlistFormat`] if the structure is damaged.
pub fn parse_plist_bytes(data: &[u8]) -> Result<PlistValue> {
    let Some(header) = data.get(..BPLIST_MAGIC.len()) else {
        return Err(Error::plist(format!("file too short ({} bytes)", data.len())));
    };
    if header != BPLIST_MAGIC {
        let mut magic = [0u8; 8];
        magic.copy_from_slice(header);
        return Err(Error::InvalidPlistMagic(magic));
    }

    if data.len() < BPLIST_MAGIC.len() + TRAILER_SIZE {
        return Err(Error::plist("missing trailer"));
    }

    let trailer = Trailer::parse(&data[data.len() - TRAILER_SIZE..])?;
    tracing::debug!(
        "bplist trailer: {} objects, top {}, refs {} bytes, offsets {} bytes",
        trailer.num_objects,
        trailer.top_object,
        trailer.object_ref_size,
        trailer.offset_int_size
    );

    let offsets = read_offset_table(data, &trailer)?;
    let mut parser = Parser {
        data,
        cache: vec![None; offsets.len()],
        offsets,
        ref_size: trailer.object_ref_size,
        visiting: Vec::new(),
    };
    parser.parse_object(trailer.top_object)?;
    parser.object(trailer.top_object)
}

struct Trailer {
    offset_int_size: usize,
    object_ref_size: usize,
    num_objects: usize,
    top_object: usize,
    offset_table_offset: usize,
}

impl Trailer {
    fn parse(bytes: &[u8]) -> Result<Self> {
        // 5 unused bytes and the sort version precede the sizes
        let offset_int_size = bytes[6] as usize;
        let object_ref_size = bytes[7] as usize;
        let num_objects = to_usize(BigEndian::read_u64(&bytes[8..16]))?;
        let top_object = to_usize(BigEndian::read_u64(&bytes[16..24]))?;
        let offset_table_offset = to_usize(BigEndian::read_u64(&bytes[24..32]))?;

        if !(1..=8).contains(&offset_int_size) || !(1..=8).contains(&object_ref_size) {
            return Err(Error::plist(format!(
                "invalid trailer sizes (offsets {offset_int_size}, refs {object_ref_size})"
            )));
        }
        if num_objects == 0 {
            return Err(Error::plist("no objects"));
        }
        if top_object >= num_objects {
            return Err(Error::plist(format!(
                "top object {top_object} out of range ({num_objects} objects)"
            )));
        }

        Ok(Trailer {
            offset_int_size,
            object_ref_size,
            num_objects,
            top_object,
            offset_table_offset,
        })
    }
}

fn read_offset_table(data: &[u8], trailer: &Trailer) -> Result<Vec<usize>> {
    let table_len = trailer
        .num_objects
        .checked_mul(trailer.offset_int_size)
        .ok_or_else(|| Error::plist("offset table size overflows"))?;
    let objects_end = data.len() - TRAILER_SIZE;
    let table_end = trailer
        .offset_table_offset
        .checked_add(table_len)
        .filter(|&end| end <= objects_end && trailer.offset_table_offset >= BPLIST_MAGIC.len())
        .ok_or_else(|| Error::plist("offset table out of bounds"))?;

    data[trailer.offset_table_offset..table_end]
        .chunks_exact(trailer.offset_int_size)
        .map(|chunk| {
            let offset = to_usize(BigEndian::read_uint(chunk, trailer.offset_int_size))?;
            if offset < BPLIST_MAGIC.len() || offset >= trailer.offset_table_offset {
                return Err(Error::plist(format!("object offset {offset} out of bounds")));
            }
            Ok(offset)
        })
        .collect()
}

struct Parser<'a> {
    data: &'a [u8],
    offsets: Vec<usize>,
    ref_size: usize,
    /// Parsed objects with the number of values in their subtree
    cache: Vec<Option<(PlistValue, usize)>>,
    /// Objects currently being parsed, to reject reference cycles
    visiting: Vec<usize>,
}

impl Parser<'_> {
    /// Parse an object once and return the size of its subtree.
    fn parse_object(&mut self, index: usize) -> Result<usize> {
        let offset = *self
            .offsets
            .get(index)
            .ok_or_else(|| Error::plist(format!("object reference {index} out of range")))?;
        if let Some((_, size)) = &self.cache[index] {
            return Ok(*size);
        }

        if self.visiting.contains(&index) {
            return Err(Error::plist(format!("reference cycle through object {index}")));
        }
        self.visiting.push(index);
        let parsed = self.parse_at(offset);
        self.visiting.pop();

        let (value, size) = parsed?;
        self.cache[index] = Some((value, size));
        Ok(size)
    }

    /// Copy of an object already parsed by [`Parser::parse_object`].
    fn object(&self, index: usize) -> Result<PlistValue> {
        self.cache
            .get(index)
            .and_then(Option::as_ref)
            .map(|(value, _)| value.clone())
            .ok_or_else(|| Error::plist(format!("object {index} was not parsed")))
    }

    /// Parse every referenced object, failing once the combined subtrees
    /// grow past [`MAX_VALUE_NODES`].
    fn parse_refs(&mut self, refs: &[usize]) -> Result<usize> {
        let mut total = 0usize;
        for &index in refs {
            total = total.saturating_add(self.parse_object(index)?);
            if total > MAX_VALUE_NODES {
                return Err(Error::plist(format!(
                    "object graph expands past {MAX_VALUE_NODES} values"
                )));
            }
        }
        Ok(total)
    }

    fn parse_at(&mut self, offset: usize) -> Result<(PlistValue, usize)> {
        let marker = self.bytes(offset, 1)?[0];
        let (kind, info) = (marker >> 4, marker & 0x0F);
        let pos = offset + 1;

        let value = match kind {
            MARKER_SINGLETON => match marker {
                SINGLETON_FALSE => PlistValue::Boolean(false),
                SINGLETON_TRUE => PlistValue::Boolean(true),
                _ => {
                    return Err(Error::plist(format!(
                        "unsupported singleton 0x{marker:02X} at offset {offset}"
                    )));
                }
            },
            MARKER_INT => PlistValue::Integer(self.read_int(pos, info)?),
            MARKER_REAL => match info {
                2 => PlistValue::Real(f64::from(BigEndian::read_f32(self.bytes(pos, 4)?))),
                3 => PlistValue::Real(BigEndian::read_f64(self.bytes(pos, 8)?)),
                _ => return Err(Error::plist(format!("invalid real size at offset {offset}"))),
            },
            MARKER_DATE if info == 3 => PlistValue::Date(BigEndian::read_f64(self.bytes(pos, 8)?)),
            MARKER_DATA => {
                let (len, pos) = self.read_length(pos, info)?;
                PlistValue::Data(self.bytes(pos, len)?.to_vec())
            }
            MARKER_ASCII_STRING => {
                let (len, pos) = self.read_length(pos, info)?;
                let bytes = self.bytes(pos, len)?;
                // Non-ASCII bytes are read as Latin-1, as Apple's parser does
                PlistValue::String(bytes.iter().map(|&b| b as char).collect())
            }
            MARKER_UTF16_STRING => {
                let (len, pos) = self.read_length(pos, info)?;
                let byte_len = len
                    .checked_mul(2)
                    .ok_or_else(|| Error::plist("string length overflows"))?;
                let units: Vec<u16> = self
                    .bytes(pos, byte_len)?
                    .chunks_exact(2)
                    .map(BigEndian::read_u16)
                    .collect();
                String::from_utf16(&units)
                    .map(PlistValue::String)
                    .map_err(|_| Error::plist(format!("invalid UTF-16 string at offset {offset}")))?
            }
            MARKER_UID => {
                let size = info as usize + 1;
                if size > 8 {
                    return Err(Error::plist(format!("UID too large at offset {offset}")));
                }
                PlistValue::Uid(BigEndian::read_uint(self.bytes(pos, size)?, size))
            }
            MARKER_ARRAY => {
                let (len, pos) = self.read_length(pos, info)?;
                let refs = self.read_refs(pos, len)?;
                let size = self.parse_refs(&refs)?;
                let items = refs
                    .into_iter()
                    .map(|r| self.object(r))
                    .collect::<Result<Vec<_>>>()?;
                return Ok((PlistValue::Array(items), size + 1));
            }
            MARKER_DICT => {
                let (len, pos) = self.read_length(pos, info)?;
                let key_refs = self.read_refs(pos, len)?;
                let value_refs = self.read_refs(pos + len * self.ref_size, len)?;
                let all_refs: Vec<usize> = key_refs.iter().chain(&value_refs).copied().collect();
                let size = self.parse_refs(&all_refs)?;

                let mut entries = IndexMap::with_capacity(len);
                for (key_ref, value_ref) in key_refs.into_iter().zip(value_refs) {
                    let key = match self.object(key_ref)? {
                        PlistValue::String(key) => key,
                        other => {
                            return Err(Error::plist(format!(
                                "dictionary key is a {} at offset {offset}",
                                other.type_name()
                            )));
                        }
                    };
                    entries.insert(key, self.object(value_ref)?);
                }
                return Ok((PlistValue::Dictionary(entries), size + 1));
            }
            _ => {
                return Err(Error::plist(format!(
                    "unsupported object marker 0x{marker:02X} at offset {offset}"
                )));
            }
        };

        Ok((value, 1))
    }

    fn bytes(&self, pos: usize, len: usize) -> Result<&[u8]> {
        pos.checked_add(len)
            .and_then(|end| self.data.get(pos..end))
            .ok_or_else(|| Error::plist(format!("unexpected end of data at offset {pos}")))
    }

    /// Integers of 1, 2 and 4 bytes are unsigned; 8 and 16 bytes are signed.
    fn read_int(&self, pos: usize, info: u8) -> Result<i64> {
        match info {
            0 => Ok(i64::from(self.bytes(pos, 1)?[0])),
            1 => Ok(i64::from(BigEndian::read_u16(self.bytes(pos, 2)?))),
            2 => Ok(i64::from(BigEndian::read_u32(self.bytes(pos, 4)?))),
            3 => Ok(BigEndian::read_i64(self.bytes(pos, 8)?)),
            4 => {
                let value = BigEndian::read_i128(self.bytes(pos, 16)?);
                i64::try_from(value)
                    .map_err(|_| Error::plist(format!("integer out of range at offset {pos}")))
            }
            _ => Err(Error::plist(format!("invalid integer size at offset {pos}"))),
        }
    }

    /// Object length from the marker's low nibble, or from the integer object
    /// that follows when the nibble is 0xF. Returns the length and the
    /// position of the payload.
    fn read_length(&self, pos: usize, info: u8) -> Result<(usize, usize)> {
        if info != EXTENDED_LENGTH {
            return Ok((info as usize, pos));
        }

        let marker = self.bytes(pos, 1)?[0];
        if marker >> 4 != MARKER_INT {
            return Err(Error::plist(format!("invalid length marker at offset {pos}")));
        }
        let size_exp = marker & 0x0F;
        let len = self.read_int(pos + 1, size_exp)?;
        let len = usize::try_from(len)
            .map_err(|_| Error::plist(format!("negative length at offset {pos}")))?;
        Ok((len, pos + 1 + (1usize << size_exp)))
    }

    fn read_refs(&self, pos: usize, count: usize) -> Result<Vec<usize>> {
        let len = count
            .checked_mul(self.ref_size)
            .ok_or_else(|| Error::plist("reference list overflows"))?;
        self.bytes(pos, len)?
            .chunks_exact(self.ref_size)
            .map(|chunk| to_usize(BigEndian::read_uint(chunk, self.ref_size)))
            .collect()
    }
}

fn to_usize(value: u64) -> Result<usize> {
    usize::try_from(value).map_err(|_| Error::plist(format!("value {value} does not fit in memory")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::plist::serialize_plist;

    /// `plistlib.dumps({"a": 1}, fmt=FMT_BINARY)`
    const SMALL_DICT: &[u8] = &[
        0x62, 0x70, 0x6C, 0x69, 0x73, 0x74, 0x30, 0x30, // bplist00
        0xD1, 0x01, 0x02, // dict, 1 entry, key ref 1, value ref 2
        0x51, 0x61, // "a"
        0x10, 0x01, // 1
        0x08, 0x0B, 0x0D, // offset table
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x01, //
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03, // 3 objects
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // top object 0
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0F, // offset table at 15
    ];

    #[test]
    fn test_parse_known_bytes() {
        let value = parse_plist_bytes(SMALL_DICT).unwrap();
        assert_eq!(value.get("a"), Some(&PlistValue::Integer(1)));
    }

    #[test]
    fn test_rejects_bad_magic() {
        let mut data = SMALL_DICT.to_vec();
        data[7] = b'1';
        assert!(matches!(
            parse_plist_bytes(&data),
            Err(Error::InvalidPlistMagic(_))
        ));
        assert!(parse_plist_bytes(b"bpl").is_err());
        assert!(parse_plist_bytes(b"<?xml version=\"1.0\"?>").is_err());
    }

    #[test]
    fn test_rejects_truncated_data() {
        for len in [8, 20, SMALL_DICT.len() - 1] {
            assert!(parse_plist_bytes(&SMALL_DICT[..len]).is_err(), "len {len}");
        }
    }

    #[test]
    fn test_rejects_out_of_range_reference() {
        let mut data = SMALL_DICT.to_vec();
        data[10] = 0x07; // value ref points past the object table
        assert!(parse_plist_bytes(&data).is_err());
    }

    #[test]
    fn test_rejects_reference_cycle() {
        let mut data = SMALL_DICT.to_vec();
        data[10] = 0x00; // value ref points back at the dictionary itself
        let err = parse_plist_bytes(&data).unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }

    /// Arrays `[i + 1, i + 1]` for `i < depth`, ending in the integer 0.
    /// Each level references the next one twice.
    fn shared_chain(depth: usize) -> Vec<u8> {
        let mut data = b"bplist00".to_vec();
        let mut offsets = Vec::new();
        for i in 0..depth {
            offsets.push(data.len() as u8);
            data.extend_from_slice(&[0xA2, (i + 1) as u8, (i + 1) as u8]);
        }
        offsets.push(data.len() as u8);
        data.extend_from_slice(&[0x10, 0x00]);

        let table_offset = data.len() as u64;
        data.extend_from_slice(&offsets);
        data.extend_from_slice(&[0, 0, 0, 0, 0, 0, 1, 1]);
        data.extend_from_slice(&(depth as u64 + 1).to_be_bytes());
        data.extend_from_slice(&0u64.to_be_bytes());
        data.extend_from_slice(&table_offset.to_be_bytes());
        data
    }

    #[test]
    fn test_shared_references_are_expanded() {
        let leaf = PlistValue::Integer(0);
        let inner = PlistValue::Array(vec![leaf.clone(), leaf]);
        let expected = PlistValue::Array(vec![inner.clone(), inner]);
        assert_eq!(parse_plist_bytes(&shared_chain(2)).unwrap(), expected);
    }

    #[test]
    fn test_rejects_exponential_expansion() {
        let err = parse_plist_bytes(&shared_chain(24)).unwrap_err();
        assert!(err.to_string().contains("expands past"), "{err}");
    }

    #[test]
    fn test_rejects_extended_length_past_end() {
        let mut data = b"bplist00".to_vec();
        data.extend_from_slice(&[0xAF, 0x10, 0xFF, 0x01]); // array claiming 255 refs
        data.extend_from_slice(&[0x10, 0x00]);
        data.extend_from_slice(&[0x08, 0x0C]);
        data.extend_from_slice(&[0, 0, 0, 0, 0, 0, 1, 1]);
        data.extend_from_slice(&2u64.to_be_bytes());
        data.extend_from_slice(&0u64.to_be_bytes());
        data.extend_from_slice(&14u64.to_be_bytes());

        let err = parse_plist_bytes(&data).unwrap_err();
        assert!(err.to_string().contains("unexpected end of data"), "{err}");
    }

    #[test]
    fn test_extended_lengths_and_utf16() {
        let mut entries = IndexMap::new();
        entries.insert("long".to_string(), PlistValue::String("x".repeat(40)));
        entries.insert("unicode".to_string(), PlistValue::String("Grün ✓".to_string()));
        entries.insert("blob".to_string(), PlistValue::Data(vec![0xAB; 300]));
        entries.insert("negative".to_string(), PlistValue::Integer(-7));
        entries.insert("big".to_string(), PlistValue::Integer(1 << 40));
        entries.insert("uid".to_string(), PlistValue::Uid(513));
        entries.insert("flag".to_string(), PlistValue::Boolean(true));
        entries.insert("ratio".to_string(), PlistValue::Real(0.25));
        entries.insert("when".to_string(), PlistValue::Date(86_400.0));
        let value = PlistValue::Dictionary(entries);

        let bytes = serialize_plist(&value).unwrap();
        assert_eq!(parse_plist_bytes(&bytes).unwrap(), value);
    }
}
