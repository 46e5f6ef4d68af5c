//! Minimal XML element tree.
//!
//! Streaming events are folded into a tree which is then searched at any
//! depth (`<coverage>` inside `<coverage>`, `<line>` under both `<methods>`
//! and `<lines>`).

use std::str;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{CovdiagError, Result};

/// An element with its attributes (in document order) and child elements.
/// Text content is not kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Element {
    /// Look up an attribute by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// All elements called `name` in this subtree, including `self`, in
    /// document order (pre-order depth-first).
    #[must_use]
    pub fn descendants<'a>(&'a self, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        let mut stack = vec![self];
        while let Some(element) = stack.pop() {
            if element.name == name {
                found.push(element);
            }
            // Reverse so the first child is visited next.
            stack.extend(element.children.iter().rev());
        }
        found
    }
}

/// Parse a complete XML document into its root element.
///
/// Fails on anything that is not well-formed: mismatched or unclosed tags,
/// broken attributes, no root element or more than one.
pub fn parse_document(input: &[u8]) -> Result<Element> {
    let mut reader = Reader::from_reader(input);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let position = reader.buffer_position();
        match reader.read_event_into(&mut buf) {
            Err(e) => return Err(CovdiagError::Xml { source: e, position }),
            Ok(Event::Eof) => break,
            Ok(Event::Start(ref e)) => {
                let element = element_from(e, position)?;
                if open.is_empty() && root.is_some() {
                    return Err(multiple_roots(&element));
                }
                open.push(element);
            }
            Ok(Event::Empty(ref e)) => {
                let element = element_from(e, position)?;
                close(element, &mut open, &mut root)?;
            }
            Ok(Event::End(_)) => {
                // quick-xml has already checked the end name against the
                // matching start tag.
                let element = open.pop().ok_or_else(|| {
                    CovdiagError::Parse(format!("Unexpected closing tag at position {}", position))
                })?;
                close(element, &mut open, &mut root)?;
            }
            _ => {}
        }
        buf.clear();
    }

    if let Some(unclosed) = open.last() {
        return Err(CovdiagError::Parse(format!(
            "Unexpected end of document: <{}> is not closed",
            unclosed.name
        )));
    }

    root.ok_or_else(|| CovdiagError::Parse("Document has no root element".to_string()))
}

/// Attach a finished element to its parent, or make it the root.
fn close(element: Element, open: &mut [Element], root: &mut Option<Element>) -> Result<()> {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => return Err(multiple_roots(&element)),
        None => *root = Some(element),
    }
    Ok(())
}

fn multiple_roots(element: &Element) -> CovdiagError {
    CovdiagError::Parse(format!(
        "Unexpected second root element <{}>",
        element.name
    ))
}

fn element_from(e: &BytesStart, position: usize) -> Result<Element> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();

    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| CovdiagError::Xml {
            source: quick_xml::Error::InvalidAttr(err),
            position,
        })?;
        let key = str::from_utf8(attr.key.as_ref())
            .map_err(|_| CovdiagError::Parse(format!("Non UTF-8 attribute name in <{}>", name)))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|source| CovdiagError::Xml { source, position })?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}
