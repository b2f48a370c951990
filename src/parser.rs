//! XML access layer for MusicXML documents
//!
//! This module wraps roxmltree behind a small [`Element`] accessor so the
//! converter depends on lookup-by-tag, attribute reads, and text content
//! only, never on the underlying parse-tree library.

use std::borrow::Cow;

use roxmltree::{Document, Node};

// ============================================================================
// ELEMENT ACCESSOR
// ============================================================================

/// A named, attributed element in the parsed document tree.
#[derive(Clone, Copy)]
pub struct Element<'a> {
    node: Node<'a, 'a>,
}

impl<'a> Element<'a> {
    fn new(node: Node<'a, 'a>) -> Self {
        Self { node }
    }

    /// Tag name, without namespace prefix.
    pub fn tag(&self) -> &'a str {
        self.node.tag_name().name()
    }

    /// Attribute value by name.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.node.attribute(name)
    }

    /// Immediate text content.
    pub fn text(&self) -> Option<&'a str> {
        self.node.text()
    }

    /// First child element with the given tag name.
    pub fn child(&self, tag: &str) -> Option<Element<'a>> {
        self.node
            .children()
            .find(|n| n.is_element() && n.tag_name().name() == tag)
            .map(Element::new)
    }

    /// All child elements with the given tag name, in document order.
    pub fn children(&self, tag: &str) -> Vec<Element<'a>> {
        self.node
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == tag)
            .map(Element::new)
            .collect()
    }

    /// All child elements, in document order.
    pub fn child_elements(&self) -> Vec<Element<'a>> {
        self.node
            .children()
            .filter(|n| n.is_element())
            .map(Element::new)
            .collect()
    }

    /// First element with the given tag name anywhere beneath this one,
    /// in document order.
    pub fn descendant(&self, tag: &str) -> Option<Element<'a>> {
        self.node
            .descendants()
            .skip(1)
            .find(|n| n.is_element() && n.tag_name().name() == tag)
            .map(Element::new)
    }

    /// All elements with the given tag name anywhere beneath this one,
    /// in document order.
    pub fn descendants(&self, tag: &str) -> Vec<Element<'a>> {
        self.node
            .descendants()
            .skip(1)
            .filter(|n| n.is_element() && n.tag_name().name() == tag)
            .map(Element::new)
            .collect()
    }

    /// Text content of the first child element with the given tag name.
    pub fn child_text(&self, tag: &str) -> Option<&'a str> {
        self.child(tag).and_then(|e| e.text())
    }
}

/// Root element of a parsed document.
pub fn root_element<'a>(doc: &'a Document<'a>) -> Element<'a> {
    Element::new(doc.root_element())
}

// ============================================================================
// DOCTYPE HANDLING
// ============================================================================

/// Strip a DOCTYPE declaration from the document text.
///
/// Standard MusicXML exports carry a DTD reference, which roxmltree rejects
/// by default. The declaration has no bearing on the element content, so it
/// is removed before parsing. An unterminated declaration is left in place
/// for the XML parser to report.
pub(crate) fn strip_doctype(xml: &str) -> Cow<'_, str> {
    let Some(start) = xml.find("<!DOCTYPE") else {
        return Cow::Borrowed(xml);
    };

    let rest = &xml[start..];
    let mut bracket_depth = 0usize;
    for (offset, byte) in rest.bytes().enumerate() {
        match byte {
            b'[' => bracket_depth += 1,
            b']' => bracket_depth = bracket_depth.saturating_sub(1),
            b'>' if bracket_depth == 0 => {
                let mut cleaned = String::with_capacity(xml.len());
                cleaned.push_str(&xml[..start]);
                cleaned.push_str(&rest[offset + 1..]);
                return Cow::Owned(cleaned);
            }
            _ => {}
        }
    }

    Cow::Borrowed(xml)
}
