//! Error types for `TokenBridge`

use thiserror::Error;

/// Broad category of an [`Error`], used by callers that only need to know
/// which stage of a conversion failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed source payload (JSON, outline text or binary plist).
    Parse,
    /// Structurally valid input that is missing data a conversion needs.
    Conversion,
    /// A format with no implemented codec.
    UnsupportedConversion,
    /// A valid token set that cannot be serialized to the target format.
    Encode,
    /// File system access outside the in-memory codecs.
    Io,
}

/// The error type for `TokenBridge` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== JSON Token Errors ====================
    /// The token JSON could not be parsed.
    #[error("Error parsing JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The token set could not be written as JSON.
    #[error("Error generating JSON: {message}")]
    JsonWriteFailed {
        /// The serializer error message.
        message: String,
    },

    /// The JSON document root is not an object of tokens.
    #[error("Error parsing JSON: expected an object of tokens, found {found}")]
    InvalidTokenRoot {
        /// The JSON type that was found instead.
        found: &'static str,
    },

    /// A token entry is not shaped like a token.
    #[error("invalid token '{name}': {reason}")]
    InvalidToken {
        /// The token name.
        name: String,
        /// What is wrong with the entry.
        reason: String,
    },

    // ==================== Color Errors ====================
    /// A float triple could not be turned into a hex color.
    #[error("invalid RGB triple: {input:?}")]
    InvalidRgbTriple {
        /// The text that failed to convert.
        input: String,
    },

    /// A color token carries no usable hex value.
    #[error("color token '{name}' has no usable hex value: {value:?}")]
    InvalidColor {
        /// The token name.
        name: String,
        /// The offending value as text.
        value: String,
    },

    // ==================== Text Errors ====================
    /// A text payload is not valid UTF-8.
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    // ==================== Binary Plist Errors ====================
    /// The payload does not start with the `bplist00` header.
    #[error("Error reading plist: invalid magic {0:?}")]
    InvalidPlistMagic([u8; 8]),

    /// The binary plist structure is damaged or truncated.
    #[error("Error reading plist: {message}")]
    PlistFormat {
        /// Description of what is invalid.
        message: String,
    },

    /// The plist parsed but is not a palette archive.
    #[error("Error reading plist: {message}")]
    InvalidPalette {
        /// Description of what is missing.
        message: String,
    },

    /// The palette object table could not be serialized.
    #[error("Error generating plist: {message}")]
    PlistWriteFailed {
        /// The error message.
        message: String,
    },

    /// XML rendering of a plist failed.
    #[error("Error converting to XML: {0}")]
    XmlError(#[from] quick_xml::Error),

    // ==================== Dispatch Errors ====================
    /// The format has no codec yet.
    #[error("{format} conversion not implemented yet.")]
    NotImplemented {
        /// Display name of the format.
        format: &'static str,
    },

    /// A format name or file extension was not recognized.
    #[error("unknown format: {0}")]
    UnknownFormat(String),

    // ==================== Configuration Errors ====================
    /// The configuration file could not be parsed.
    #[error("invalid configuration: {0}")]
    ConfigError(#[from] toml::de::Error),
}

impl Error {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::JsonError(_)
            | Error::InvalidTokenRoot { .. }
            | Error::Utf8Error(_)
            | Error::InvalidPlistMagic(_)
            | Error::PlistFormat { .. }
            | Error::InvalidPalette { .. }
            | Error::UnknownFormat(_)
            | Error::ConfigError(_) => ErrorKind::Parse,
            Error::InvalidToken { .. } | Error::InvalidRgbTriple { .. } | Error::InvalidColor { .. } => {
                ErrorKind::Conversion
            }
            Error::NotImplemented { .. } => ErrorKind::UnsupportedConversion,
            Error::JsonWriteFailed { .. } | Error::PlistWriteFailed { .. } | Error::XmlError(_) => {
                ErrorKind::Encode
            }
        }
    }

    pub(crate) fn plist(message: impl Into<String>) -> Self {
        Error::PlistFormat {
            message: message.into(),
        }
    }
}

/// A specialized Result type for `TokenBridge` operations.
pub type Result<T> = std::result::Result<T, Error>;
