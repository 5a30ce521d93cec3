//! TOML configuration file support.
//!
//! Reader and writer settings can be kept in a config file instead of being
//! passed as flags on every invocation:
//!
//! ```toml
//! # calphad-xml.toml
//! [read]
//! validate_schema = true
//!
//! [write]
//! require_valid = false
//! indent = 4
//! write_metadata = true
//! ```
//!
//! Command-line flags take precedence over the file.

use anyhow::{Context, Result};
use calphad_xml::codec::{ReaderConfig, WriterConfig};
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "calphad-xml.toml";

/// Root configuration structure for calphad-xml.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Document reading settings.
    #[serde(default)]
    pub read: ReaderConfig,

    /// Document writing settings.
    #[serde(default)]
    pub write: WriterConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load `explicit`, or the default file if it exists, or the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            debug!("Using config file {}", fallback.display());
            return Self::from_file(fallback);
        }
        Ok(Self::default())
    }
}
