//! Token document structures
//!
//! The intermediate model every codec converts through: an ordered map of
//! token name to a typed value.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};
use std::fmt;

/// JSON member holding the token type.
pub const TYPE_KEY: &str = "$type";
/// JSON member holding the token value.
pub const VALUE_KEY: &str = "$value";
/// JSON member holding the reason a value is invalid.
pub const ERROR_KEY: &str = "$error";

/// Type tag of a token.
///
/// Known tags in lowercase map to their variant. Any other spelling is kept
/// verbatim in `Other`, and the `is_*` checks still recognize it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Color,
    Number,
    String,
    Other(String),
}

impl TokenKind {
    /// Parse a type tag.
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "color" => TokenKind::Color,
            "number" => TokenKind::Number,
            "string" => TokenKind::String,
            other => TokenKind::Other(other.to_string()),
        }
    }

    pub fn is_color(&self) -> bool {
        self.is("color")
    }

    pub fn is_number(&self) -> bool {
        self.is("number")
    }

    pub fn is_string(&self) -> bool {
        self.is("string")
    }

    fn is(&self, tag: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(tag)
    }

    pub fn as_str(&self) -> &str {
        match self {
            TokenKind::Color => "color",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Other(name) => name,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value of a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Integer(i64),
    Float(f64),
    /// Raw text. Color values are stored with their leading `#`.
    Text(String),
    /// A value that could not be read or converted. The token is kept so a
    /// single bad entry does not drop out of the document.
    Invalid {
        /// Why the value is unusable.
        reason: String,
    },
}

impl TokenValue {
    /// Infer a value from untyped text: whole numbers become integers, other
    /// finite numbers floats, everything else stays text.
    pub fn infer(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => {
                if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
                    TokenValue::Integer(number as i64)
                } else {
                    TokenValue::Float(number)
                }
            }
            _ => TokenValue::Text(raw.to_string()),
        }
    }

    pub fn invalid(reason: impl Into<String>) -> Self {
        TokenValue::Invalid {
            reason: reason.into(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, TokenValue::Invalid { .. })
    }

    fn to_json(&self) -> Value {
        match self {
            TokenValue::Integer(i) => Value::Number((*i).into()),
            TokenValue::Float(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
            TokenValue::Text(text) => Value::String(text.clone()),
            TokenValue::Invalid { .. } => Value::Null,
        }
    }

    fn from_json(value: Value) -> Option<Self> {
        Some(match value {
            Value::Null => return None,
            Value::Number(n) => match n.as_i64() {
                Some(i) => TokenValue::Integer(i),
                None => TokenValue::Float(n.as_f64()?),
            },
            Value::String(text) => TokenValue::Text(text),
            other => TokenValue::Text(other.to_string()),
        })
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Integer(i) => write!(f, "{i}"),
            TokenValue::Float(v) => write!(f, "{v}"),
            TokenValue::Text(text) => f.write_str(text),
            TokenValue::Invalid { .. } => Ok(()),
        }
    }
}

/// A single design token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    /// Fields outside `$type`/`$value`, kept verbatim.
    pub extra: IndexMap<String, Value>,
}

impl Token {
    pub fn new(kind: TokenKind, value: TokenValue) -> Self {
        Token {
            kind,
            value,
            extra: IndexMap::new(),
        }
    }

    /// A color token; `hex` should carry its leading `#`.
    pub fn color(hex: impl Into<String>) -> Self {
        Token::new(TokenKind::Color, TokenValue::Text(hex.into()))
    }

    pub fn is_color(&self) -> bool {
        self.kind.is_color()
    }

    /// Hex digits of a color token, without the leading `#`.
    pub fn hex_digits(&self) -> Option<&str> {
        if !self.is_color() {
            return None;
        }
        self.value.as_text().map(|v| v.strip_prefix('#').unwrap_or(v))
    }

    /// Build a token from one entry of a token JSON object.
    ///
    /// # Errors
    /// Returns [`Error::InvalidToken`] if the entry is not an object or its
    /// `$type` is not a string.
    pub fn from_json(name: &str, entry: Value) -> Result<Self> {
        let members = match entry {
            Value::Object(members) => members,
            other => {
                return Err(Error::InvalidToken {
                    name: name.to_string(),
                    reason: format!("expected an object, found {}", json_type_name(&other)),
                });
            }
        };

        let mut kind = TokenKind::Other(String::new());
        let mut value = None;
        let mut error = None;
        let mut extra = IndexMap::new();

        for (key, member) in members {
            match key.as_str() {
                TYPE_KEY => match member {
                    Value::String(tag) => kind = TokenKind::from_name(&tag),
                    other => {
                        return Err(Error::InvalidToken {
                            name: name.to_string(),
                            reason: format!(
                                "{TYPE_KEY} must be a string, found {}",
                                json_type_name(&other)
                            ),
                        });
                    }
                },
                VALUE_KEY => value = TokenValue::from_json(member),
                ERROR_KEY => error = member.as_str().map(str::to_string),
                _ => {
                    extra.insert(key, member);
                }
            }
        }

        let value = value.unwrap_or_else(|| {
            TokenValue::invalid(error.unwrap_or_else(|| format!("missing {VALUE_KEY}")))
        });

        Ok(Token { kind, value, extra })
    }
}

impl Serialize for Token {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let error_entry = usize::from(self.value.is_invalid());
        let mut map = serializer.serialize_map(Some(2 + error_entry + self.extra.len()))?;

        map.serialize_entry(TYPE_KEY, self.kind.as_str())?;
        map.serialize_entry(VALUE_KEY, &self.value.to_json())?;
        if let TokenValue::Invalid { reason } = &self.value {
            map.serialize_entry(ERROR_KEY, reason)?;
        }

        for (key, value) in &self.extra {
            map.serialize_entry(key, value)?;
        }

        map.end()
    }
}

/// An ordered set of named tokens.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TokenDocument {
    pub tokens: IndexMap<String, Token>,
}

impl TokenDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a token. A later token with the same name replaces the earlier one.
    pub fn insert(&mut self, name: impl Into<String>, token: Token) {
        let name = name.into();
        if self.tokens.insert(name.clone(), token).is_some() {
            tracing::debug!("Duplicate token '{}' replaced", name);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Token> {
        self.tokens.get(name)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Token)> {
        self.tokens.iter()
    }

    /// Color tokens in document order.
    pub fn colors(&self) -> impl Iterator<Item = (&String, &Token)> {
        self.tokens.iter().filter(|(_, token)| token.is_color())
    }

    /// Number of tokens whose value is invalid.
    pub fn invalid_count(&self) -> usize {
        self.tokens.values().filter(|t| t.value.is_invalid()).count()
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
