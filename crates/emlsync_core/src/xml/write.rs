//! Element tree -> XML text, with schema name normalization.

use super::names::to_schema_name;
use super::{Element, XmlError, XmlNode};
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

const INDENT_WIDTH: usize = 2;

pub(super) fn write_document(root: &Element, indent: bool) -> Result<String, XmlError> {
    let mut writer = if indent {
        Writer::new_with_indent(Vec::new(), b' ', INDENT_WIDTH)
    } else {
        Writer::new(Vec::new())
    };
    write_element(&mut writer, root)?;
    String::from_utf8(writer.into_inner()).map_err(|err| XmlError::Write(err.to_string()))
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<(), XmlError> {
    let name = to_schema_name(element.name());
    let mut start = BytesStart::new(name);
    for (key, value) in element.attributes() {
        start.push_attribute((key, value));
    }

    if element.nodes().is_empty() {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    for node in element.nodes() {
        match node {
            XmlNode::Element(child) => write_element(writer, child)?,
            XmlNode::Text(text) => emit(writer, Event::Text(BytesText::new(text)))?,
            XmlNode::CData(text) => emit(writer, Event::CData(BytesCData::new(text.as_str())))?,
            XmlNode::Comment(text) => {
                emit(writer, Event::Comment(BytesText::from_escaped(text.as_str())))?
            }
        }
    }
    emit(writer, Event::End(BytesEnd::new(name)))
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), XmlError> {
    writer
        .write_event(event)
        .map_err(|err| XmlError::Write(err.to_string()))
}

#[cfg(test)]
mod tests {
    use crate::xml::names::{BOUNDING_COORDINATES, GEOGRAPHIC_COVERAGE, NORTH_BOUNDING_COORDINATE};
    use crate::xml::Element;

    #[test]
    fn writes_schema_names_and_escapes_text() {
        let mut bounds = Element::new(BOUNDING_COORDINATES);
        bounds.append_child(Element::with_text(NORTH_BOUNDING_COORDINATE, "10.0"));
        let mut root = Element::new(GEOGRAPHIC_COVERAGE);
        root.set_attribute("scope", "document");
        root.append_child(Element::with_text("geographicdescription", "A & B"));
        root.append_child(bounds);

        let xml = root.to_xml_string().expect("tree should serialize");
        assert_eq!(
            xml,
            "<geographicCoverage scope=\"document\">\
             <geographicDescription>A &amp; B</geographicDescription>\
             <boundingCoordinates><northBoundingCoordinate>10.0</northBoundingCoordinate>\
             </boundingCoordinates></geographicCoverage>"
        );
    }

    #[test]
    fn keeps_unknown_names_verbatim() {
        let root = Element::parse_str("<attributeName>depth</attributeName>").expect("parse");
        assert_eq!(
            root.to_xml_string().expect("write"),
            "<attributeName>depth</attributeName>"
        );
    }

    #[test]
    fn pretty_output_reparses_to_same_tree() {
        let source = Element::parse_str(
            "<nominal><nonNumericDomain><textDomain><definition>x</definition>\
             </textDomain></nonNumericDomain></nominal>",
        )
        .expect("parse");
        let pretty = source.to_pretty_xml_string().expect("write");

        assert!(pretty.contains('\n'));
        assert_eq!(Element::parse_str(&pretty).expect("reparse"), source);
    }
}
