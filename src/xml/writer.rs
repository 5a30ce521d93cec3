//! Tree serialization through the quick-xml writer

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{XmlElement, XmlError, XmlNode};

/// Write `root` as a complete document
///
/// The XML declaration comes first, followed by one processing instruction
/// per entry of `instructions` (content without the `<?`/`?>` delimiters).
/// An `indent` of zero writes everything on one line.
pub fn write_tree<W: Write>(
    root: &XmlElement,
    instructions: &[&str],
    sink: W,
    indent: usize,
) -> Result<(), XmlError> {
    let mut writer = if indent > 0 {
        Writer::new_with_indent(sink, b' ', indent)
    } else {
        Writer::new(sink)
    };

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    for instruction in instructions {
        writer.write_event(Event::PI(BytesPI::new(*instruction)))?;
    }
    write_element(&mut writer, root)?;
    writer.get_mut().write_all(b"\n")?;
    Ok(())
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &XmlElement) -> Result<(), XmlError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in &element.children {
        match child {
            XmlNode::Element(e) => write_element(writer, e)?,
            XmlNode::Text(t) => writer.write_event(Event::Text(BytesText::new(t)))?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}
