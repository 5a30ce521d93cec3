//! # XML Tree
//!
//! A minimal mixed-content element tree. The database format interleaves text
//! with child elements (a `<Parameter>` holds both `<Interval>` children and a
//! bare value expression), so text nodes are kept in document order next to
//! elements.
//!
//! - [`read_tree`] builds the tree from a quick-xml pull parser
//! - [`write_tree`] serializes it through the quick-xml writer
//!
//! Whitespace-only text is dropped on read and surrounding whitespace is
//! trimmed; the format never relies on significant whitespace.

pub use error::XmlError;
pub use reader::read_tree;
pub use writer::write_tree;

mod error;
mod reader;
mod writer;


/// Child of an element
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// Nested element
    Element(XmlElement),
    /// Text content
    Text(String),
}

/// Element with attributes in document order and mixed content
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    /// Tag name
    pub name: String,
    /// Attributes as (name, value) pairs
    pub attributes: Vec<(String, String)>,
    /// Child elements and text
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Create an element without attributes or children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Set an attribute, replacing an existing value
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Builder-style child setter
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.push(child);
        self
    }

    /// Builder-style text setter
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    /// Append a child element
    pub fn push(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    /// Append text content; adjacent text nodes are merged
    pub fn push_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.is_empty() {
            return;
        }
        match self.children.last_mut() {
            Some(XmlNode::Text(existing)) => existing.push_str(&text),
            _ => self.children.push(XmlNode::Text(text)),
        }
    }

    /// Attribute value
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Attribute value that must be present
    pub fn required_attribute(&self, key: &str) -> Result<&str, XmlError> {
        self.attribute(key).ok_or_else(|| XmlError::MissingAttribute {
            element: self.name.clone(),
            attribute: key.to_string(),
        })
    }

    /// Optional attribute parsed as a float
    pub fn f64_attribute(&self, key: &str) -> Result<Option<f64>, XmlError> {
        self.attribute(key)
            .map(|value| self.parse_f64(key, value))
            .transpose()
    }

    /// Required attribute parsed as a float
    pub fn required_f64_attribute(&self, key: &str) -> Result<f64, XmlError> {
        let value = self.required_attribute(key)?;
        self.parse_f64(key, value)
    }

    /// Required attribute parsed as an integer
    pub fn required_i64_attribute(&self, key: &str) -> Result<i64, XmlError> {
        let value = self.required_attribute(key)?;
        value.trim().parse().map_err(|_| self.invalid(key, value))
    }

    /// Direct text content parsed as a float
    pub fn f64_text(&self) -> Result<f64, XmlError> {
        let text = self.text();
        self.parse_f64("text", &text)
    }

    /// Direct text content parsed as an integer
    pub fn i64_text(&self) -> Result<i64, XmlError> {
        let text = self.text();
        text.trim().parse().map_err(|_| self.invalid("text", &text))
    }

    /// Direct text content parsed as a whitespace-separated list of floats
    pub fn f64_list_text(&self) -> Result<Vec<f64>, XmlError> {
        self.text()
            .split_whitespace()
            .map(|item| self.parse_f64("text", item))
            .collect()
    }

    /// Child elements
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(e) => Some(e),
            XmlNode::Text(_) => None,
        })
    }

    /// Child elements with the given tag name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.elements().filter(move |e| e.name == name)
    }

    /// Concatenated direct text content
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                XmlNode::Text(t) => Some(t.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    fn parse_f64(&self, target: &str, value: &str) -> Result<f64, XmlError> {
        value.trim().parse().map_err(|_| self.invalid(target, value))
    }

    fn invalid(&self, target: &str, value: &str) -> XmlError {
        XmlError::InvalidValue {
            element: self.name.clone(),
            target: target.to_string(),
            value: value.to_string(),
        }
    }
}
