/// Errors that can occur while reading or writing the XML tree
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// Error parsing XML
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// I/O error on the underlying stream
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 encoding error in names or text content
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Unbalanced or missing elements
    #[error("Invalid XML structure: {0}")]
    InvalidStructure(String),

    /// Required XML attribute is missing
    #[error("Missing required attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        /// Element name
        element: String,
        /// Attribute name
        attribute: String,
    },

    /// Attribute or text value that does not parse as the expected type
    #[error("Invalid value '{value}' for {target} on <{element}>")]
    InvalidValue {
        /// Element name
        element: String,
        /// Attribute name or "text"
        target: String,
        /// Offending value
        value: String,
    },
}
