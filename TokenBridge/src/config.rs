//! Converter configuration
//!
//! Read from `<config dir>/TokenBridge/config.toml`; every field is optional.
//!
//! ```toml
//! outline_tag = "Design Token"
//! json_indent = 2
//! render_xml = true
//! ```

use crate::error::Result;
use crate::formats::outline::DEFAULT_TAG;
use crate::formats::tokens::DEFAULT_INDENT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// Default value functions for serde
fn default_outline_tag() -> String {
    DEFAULT_TAG.to_string()
}
fn default_json_indent() -> usize {
    DEFAULT_INDENT
}
fn default_true() -> bool {
    true
}

/// Settings that shape converter output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Tag attached to every outline block header
    #[serde(default = "default_outline_tag")]
    pub outline_tag: String,
    /// Spaces per indentation level in token JSON
    #[serde(default = "default_json_indent")]
    pub json_indent: usize,
    /// Attach an XML rendering to palette output
    #[serde(default = "default_true")]
    pub render_xml: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            outline_tag: default_outline_tag(),
            json_indent: default_json_indent(),
            render_xml: true,
        }
    }
}

impl ConverterConfig {
    /// Location of the user config file, if the platform has a config directory
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("TokenBridge").join("config.toml"))
    }

    /// Load the user config, or return defaults if there is none
    pub fn load() -> Self {
        let Some(path) = Self::config_path().filter(|p| p.is_file()) else {
            return Self::default();
        };
        Self::load_from(&path).unwrap_or_else(|e| {
            tracing::warn!("Ignoring config at {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Load config from a specific file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml(&content)?;
        tracing::debug!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parse config from TOML text
    ///
    /// # Errors
    /// Returns [`crate::Error::ConfigError`] if the text is not valid TOML.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}
