//! Plist value tree

use indexmap::IndexMap;

/// A node of a property list.
#[derive(Debug, Clone, PartialEq)]
pub enum PlistValue {
    Boolean(bool),
    Integer(i64),
    Real(f64),
    /// Seconds since 2001-01-01 00:00:00 UTC.
    Date(f64),
    Data(Vec<u8>),
    String(String),
    /// Keyed-archive object reference.
    Uid(u64),
    Array(Vec<PlistValue>),
    Dictionary(IndexMap<String, PlistValue>),
}

impl PlistValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PlistValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&[u8]> {
        match self {
            PlistValue::Data(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[PlistValue]> {
        match self {
            PlistValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&IndexMap<String, PlistValue>> {
        match self {
            PlistValue::Dictionary(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a key if this is a dictionary.
    pub fn get(&self, key: &str) -> Option<&PlistValue> {
        self.as_dictionary()?.get(key)
    }

    /// Name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            PlistValue::Boolean(_) => "boolean",
            PlistValue::Integer(_) => "integer",
            PlistValue::Real(_) => "real",
            PlistValue::Date(_) => "date",
            PlistValue::Data(_) => "data",
            PlistValue::String(_) => "string",
            PlistValue::Uid(_) => "uid",
            PlistValue::Array(_) => "array",
            PlistValue::Dictionary(_) => "dictionary",
        }
    }
}

impl From<&str> for PlistValue {
    fn from(value: &str) -> Self {
        PlistValue::String(value.to_string())
    }
}

impl From<String> for PlistValue {
    fn from(value: String) -> Self {
        PlistValue::String(value)
    }
}

impl From<i64> for PlistValue {
    fn from(value: i64) -> Self {
        PlistValue::Integer(value)
    }
}

impl From<Vec<u8>> for PlistValue {
    fn from(value: Vec<u8>) -> Self {
        PlistValue::Data(value)
    }
}
