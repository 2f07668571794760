//! XML text -> element tree, built on `quick-xml` pull events.

use super::{Element, XmlNode};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Text-level failures of the element tree adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlError {
    /// Tokenizer or escaping failure reported by the XML reader.
    Malformed(String),
    /// End tag that does not close the innermost open element.
    MismatchedEnd { expected: String, found: String },
    /// End tag with no open element.
    UnexpectedEnd(String),
    /// Input ended while an element was still open.
    UnclosedElement(String),
    /// Input holds no element at all.
    NoRootElement,
    /// Element or text found after the root element was closed.
    TrailingContent,
    /// Writer failure while producing XML text.
    Write(String),
}

impl Display for XmlError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(details) => write!(f, "malformed xml: {details}"),
            Self::MismatchedEnd { expected, found } => {
                write!(f, "end tag `{found}` does not close `{expected}`")
            }
            Self::UnexpectedEnd(name) => write!(f, "end tag `{name}` has no open element"),
            Self::UnclosedElement(name) => write!(f, "element `{name}` is never closed"),
            Self::NoRootElement => write!(f, "xml input has no root element"),
            Self::TrailingContent => write!(f, "xml input has content after the root element"),
            Self::Write(details) => write!(f, "failed to write xml: {details}"),
        }
    }
}

impl Error for XmlError {}

pub(super) fn parse_document(input: &str) -> Result<Element, XmlError> {
    let mut reader = Reader::from_str(input);
    // End tags are matched against the open stack below.
    reader.config_mut().check_end_names = false;
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|err| XmlError::Malformed(err.to_string()))?;
        match event {
            Event::Start(start) => {
                if root.is_some() && open.is_empty() {
                    return Err(XmlError::TrailingContent);
                }
                open.push(start_element(&start)?);
            }
            Event::Empty(start) => {
                let element = start_element(&start)?;
                attach(&mut open, &mut root, element)?;
            }
            Event::End(end) => {
                let found = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                let element = open
                    .pop()
                    .ok_or_else(|| XmlError::UnexpectedEnd(found.clone()))?;
                if element.name() != found {
                    return Err(XmlError::MismatchedEnd {
                        expected: element.name().to_string(),
                        found,
                    });
                }
                attach(&mut open, &mut root, element)?;
            }
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map_err(|err| XmlError::Malformed(err.to_string()))?;
                match open.last_mut() {
                    Some(parent) => parent.push_node(XmlNode::Text(value.into_owned())),
                    None if value.trim().is_empty() => {}
                    None => return Err(XmlError::TrailingContent),
                }
            }
            Event::CData(data) => {
                if let Some(parent) = open.last_mut() {
                    let value = String::from_utf8_lossy(&data.into_inner()).into_owned();
                    parent.push_node(XmlNode::CData(value));
                }
            }
            Event::Comment(comment) => {
                // Comments outside the root element are not part of a fragment.
                if let Some(parent) = open.last_mut() {
                    let value = String::from_utf8_lossy(&comment).into_owned();
                    parent.push_node(XmlNode::Comment(value));
                }
            }
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if let Some(unclosed) = open.pop() {
        return Err(XmlError::UnclosedElement(unclosed.name().to_string()));
    }
    let mut root = root.ok_or(XmlError::NoRootElement)?;
    root.drop_formatting_whitespace();
    Ok(root)
}

fn start_element(start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()).into_owned());
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| XmlError::Malformed(err.to_string()))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|err| XmlError::Malformed(err.to_string()))?;
        element.set_attribute(&key, value.into_owned());
    }
    Ok(element)
}

fn attach(
    open: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    match open.last_mut() {
        Some(parent) => {
            parent.append_child(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(XmlError::TrailingContent),
    }
}

#[cfg(test)]
mod tests {
    use super::XmlError;
    use crate::xml::{Element, XmlNode};

    #[test]
    fn parses_attributes_text_and_comments() {
        let root = Element::parse_str(
            r#"<?xml version="1.0"?>
            <textDomain id="td.1">
                <!-- note -->
                <definition>Plot &amp; site name</definition>
                <pattern><![CDATA[[A-Z]+]]></pattern>
            </textDomain>"#,
        )
        .expect("fragment should parse");

        assert_eq!(root.name(), "textDomain");
        assert_eq!(root.attribute("id"), Some("td.1"));
        assert_eq!(root.child_text("definition").as_deref(), Some("Plot & site name"));
        assert_eq!(root.child_text("pattern").as_deref(), Some("[A-Z]+"));
        assert!(matches!(root.nodes()[0], XmlNode::Comment(_)));
        assert_eq!(root.nodes().len(), 3);
    }

    #[test]
    fn keeps_significant_whitespace_in_text_only_elements() {
        let root = Element::parse_str("<a><b>  padded </b></a>").expect("should parse");
        assert_eq!(root.child_text("b").as_deref(), Some("  padded "));
    }

    #[test]
    fn rejects_empty_input_and_second_root() {
        assert_eq!(Element::parse_str("   "), Err(XmlError::NoRootElement));
        assert_eq!(
            Element::parse_str("<a/><b/>"),
            Err(XmlError::TrailingContent)
        );
    }

    #[test]
    fn rejects_unclosed_or_mismatched_elements() {
        assert!(Element::parse_str("<a><b></a>").is_err());
        assert!(Element::parse_str("<a><b>").is_err());
    }
}
