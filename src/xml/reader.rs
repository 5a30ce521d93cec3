//! Tree building on top of the quick-xml pull parser

use std::io::BufRead;

use quick_xml::encoding::Decoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{XmlElement, XmlError};

/// Read a whole document and return its root element
///
/// Declarations, processing instructions, comments and doctype are skipped.
/// Attribute values are decoded with the encoding the declaration names.
/// CDATA sections are kept as text.
pub fn read_tree<R: BufRead>(source: R) -> Result<XmlElement, XmlError> {
    let mut reader = Reader::from_reader(source);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                stack.push(start_element(e, reader.decoder())?);
            }
            Ok(Event::Empty(ref e)) => {
                let element = start_element(e, reader.decoder())?;
                close_element(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| XmlError::InvalidStructure("Unbalanced end tag".to_string()))?;
                close_element(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(ref t)) => {
                if let Some(parent) = stack.last_mut() {
                    parent.push_text(t.unescape()?.into_owned());
                }
            }
            Ok(Event::CData(ref c)) => {
                if let Some(parent) = stack.last_mut() {
                    parent.push_text(std::str::from_utf8(c)?.trim());
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(XmlError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::InvalidStructure(format!(
            "Unexpected EOF inside <{}>",
            open.name
        )));
    }
    root.ok_or_else(|| XmlError::InvalidStructure("Document has no root element".to_string()))
}

fn start_element(e: &BytesStart, decoder: Decoder) -> Result<XmlElement, XmlError> {
    let name = std::str::from_utf8(e.name().as_ref())?.to_string();
    let mut element = XmlElement::new(name);
    for attr in e.attributes() {
        let attr = attr.map_err(|e| XmlError::Xml(quick_xml::Error::from(e)))?;
        let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
        let value = attr.decode_and_unescape_value(decoder)?.into_owned();
        element.attributes.push((key, value));
    }
    Ok(element)
}

fn close_element(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => parent.push(element),
        None if root.is_some() => {
            return Err(XmlError::InvalidStructure(format!(
                "Second root element <{}>",
                element.name
            )));
        }
        None => *root = Some(element),
    }
    Ok(())
}
