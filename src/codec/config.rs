use serde::{Deserialize, Serialize};

/// Configuration for reading documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Run the schema validator before decoding; failures are only logged
    pub validate_schema: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            validate_schema: true,
        }
    }
}

/// Configuration for writing documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterConfig {
    /// Fail with a schema error when the constructed document is invalid,
    /// instead of logging a warning and writing it anyway
    pub require_valid: bool,

    /// Spaces per indentation level, 0 writes a single line
    pub indent: usize,

    /// Emit the `<metadata>` block naming the writer
    pub write_metadata: bool,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            require_valid: true,
            indent: 2,
            write_metadata: true,
        }
    }
}

impl WriterConfig {
    /// Default configuration that only warns on schema failures
    pub fn lenient() -> Self {
        Self {
            require_valid: false,
            ..Self::default()
        }
    }

    /// Single-line output without metadata
    pub fn compact() -> Self {
        Self {
            indent: 0,
            write_metadata: false,
            ..Self::default()
        }
    }
}
