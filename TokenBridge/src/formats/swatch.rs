//! Adobe swatch exchange (`.ase`) format
//!
//! Recognized as a format so it can be selected and detected, but neither
//! direction is implemented: both calls report [`Error::NotImplemented`].

use crate::error::{Error, Result};
use crate::formats::tokens::TokenDocument;

/// Display name of the swatch format
pub const SWATCH_FORMAT_NAME: &str = "Adobe ASE";

/// Decode swatch bytes into tokens
///
/// # Errors
/// Always returns [`Error::NotImplemented`].
pub fn parse_swatch_bytes(_data: &[u8]) -> Result<TokenDocument> {
    Err(Error::NotImplemented {
        format: SWATCH_FORMAT_NAME,
    })
}

/// Encode tokens as swatch bytes
///
/// # Errors
/// Always returns [`Error::NotImplemented`].
pub fn serialize_swatch(_doc: &TokenDocument) -> Result<Vec<u8>> {
    Err(Error::NotImplemented {
        format: SWATCH_FORMAT_NAME,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_swatch_is_not_implemented() {
        let err = parse_swatch_bytes(b"ASEF").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedConversion);
        assert_eq!(err.to_string(), "Adobe ASE conversion not implemented yet.");
        assert!(serialize_swatch(&TokenDocument::new()).is_err());
    }
}
