//! Namespace-aware XML element tree.
//!
//! The whole document is read with `quick-xml`'s [`NsReader`] into a small
//! owned tree. Every element keeps its resolved namespace URI next to its
//! local name, so matching never depends on the prefix used in the source.

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

use super::ModsError;

/// An XML element with its resolved namespace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Namespace URI, `None` when the element is not in any namespace
    pub namespace: Option<String>,

    /// Local name (without prefix)
    pub local_name: String,

    /// Attributes as (qualified name, unescaped value) pairs
    pub attributes: Vec<(String, String)>,

    /// Text preceding the first child element
    pub text: String,

    /// Child elements in document order
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Does this element have the given namespace and local name?
    ///
    /// An empty `namespace` matches elements outside any namespace.
    pub fn is(&self, namespace: &str, local_name: &str) -> bool {
        self.local_name == local_name
            && match &self.namespace {
                Some(ns) => ns == namespace,
                None => namespace.is_empty(),
            }
    }

    /// Value of an attribute by qualified name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct children with the given name
    pub fn children_named<'a>(
        &'a self,
        namespace: &'a str,
        local_name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children
            .iter()
            .filter(move |child| child.is(namespace, local_name))
    }

    /// First direct child with the given name
    pub fn find(&self, namespace: &str, local_name: &str) -> Option<&XmlElement> {
        self.children
            .iter()
            .find(|child| child.is(namespace, local_name))
    }

    /// Text of the first direct child with the given name.
    ///
    /// Returns `Some("")` when the child exists but has no text, and `None`
    /// when there is no such child.
    pub fn find_text(&self, namespace: &str, local_name: &str) -> Option<&str> {
        self.find(namespace, local_name).map(|e| e.text.as_str())
    }

    /// This element and all its descendants, in document order
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Pre-order iterator over an element subtree
#[derive(Debug)]
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

/// Parse a complete document and return its root element
pub fn parse_document(content: &str) -> Result<XmlElement, ModsError> {
    let mut reader = NsReader::from_str(content);
    reader.config_mut().trim_text_start = false;
    reader.config_mut().trim_text_end = false;

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let (resolved, event) = reader.read_resolved_event()?;
        match event {
            Event::Start(e) => {
                let namespace = namespace_uri(resolved, &e)?;
                stack.push(new_element(namespace, &e)?);
            }
            Event::Empty(e) => {
                let namespace = namespace_uri(resolved, &e)?;
                let element = new_element(namespace, &e)?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                // quick-xml already verified that the end tag matches
                let element = stack
                    .pop()
                    .ok_or_else(|| ModsError::Malformed("unexpected closing tag".to_string()))?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::Text(e) => {
                if let Some(node) = stack.last_mut() {
                    if node.children.is_empty() {
                        node.text.push_str(&e.unescape()?);
                    }
                }
            }
            Event::CData(e) => {
                if let Some(node) = stack.last_mut() {
                    if node.children.is_empty() {
                        node.text.push_str(&String::from_utf8_lossy(e.as_ref()));
                    }
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctypes
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ModsError::Malformed(format!(
            "unclosed element <{}> at end of document",
            open.local_name
        )));
    }

    root.ok_or_else(|| ModsError::Malformed("document has no root element".to_string()))
}

/// Put a finished element under its parent, or make it the root
fn attach(
    element: XmlElement,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
) -> Result<(), ModsError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_some() => {
            return Err(ModsError::Malformed(format!(
                "extra root element <{}>",
                element.local_name
            )));
        }
        None => *root = Some(element),
    }
    Ok(())
}

fn namespace_uri(
    resolved: ResolveResult<'_>,
    e: &BytesStart<'_>,
) -> Result<Option<String>, ModsError> {
    match resolved {
        ResolveResult::Bound(Namespace(uri)) => {
            Ok(Some(String::from_utf8_lossy(uri).into_owned()))
        }
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(ModsError::Malformed(format!(
            "undeclared namespace prefix '{}' on <{}>",
            String::from_utf8_lossy(&prefix),
            String::from_utf8_lossy(e.name().as_ref())
        ))),
    }
}

fn new_element(namespace: Option<String>, e: &BytesStart<'_>) -> Result<XmlElement, ModsError> {
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        if key == "xmlns" || key.starts_with("xmlns:") {
            continue;
        }
        let value = attr.unescape_value()?.into_owned();
        attributes.push((key, value));
    }

    Ok(XmlElement {
        namespace,
        local_name: String::from_utf8_lossy(e.local_name().as_ref()).into_owned(),
        attributes,
        text: String::new(),
        children: Vec::new(),
    })
}
