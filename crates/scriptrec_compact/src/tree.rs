//! Minimal XML tree for the coalescing pass.
//!
//! The documents this tool rewrites are produced by scriptrec_xml, so
//! the tree only needs elements, attributes and text. The serializer
//! reproduces that producer's byte format: childless elements close
//! themselves as `<name />` and character data is re-escaped, which
//! makes parse-then-write the identity on untouched documents.

use std::io::{self, Read, Write};

use thiserror::Error;
use xml::reader::{EventReader, XmlEvent};

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("XML parse error: {0}")]
    Parse(#[from] xml::reader::Error),

    #[error("document has no root element")]
    NoRoot,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// The `delay` attribute parsed as seconds, if present and numeric.
    pub fn delay(&self) -> Option<f64> {
        self.attributes
            .iter()
            .find(|(name, _)| name == "delay")
            .and_then(|(_, value)| value.parse().ok())
    }

    pub fn set_delay(&mut self, delay: f64) {
        if let Some(attribute) = self.attributes.iter_mut().find(|(name, _)| name == "delay") {
            attribute.1 = format!("{delay:.3}");
        }
    }
}

/// Read a whole document into a tree and return its root element.
pub fn parse_tree<R: Read>(input: R) -> Result<Element, TreeError> {
    let mut reader = EventReader::new(input);
    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    loop {
        match reader.next()? {
            XmlEvent::StartElement { name, attributes, .. } => {
                stack.push(Element {
                    name: name.local_name,
                    attributes: attributes.into_iter().map(|attribute| (attribute.name.local_name, attribute.value)).collect(),
                    children: Vec::new(),
                });
            }
            XmlEvent::EndElement { .. } => {
                // The reader guarantees balanced elements.
                if let Some(element) = stack.pop() {
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(Node::Element(element)),
                        None => root = Some(element),
                    }
                }
            }
            XmlEvent::Characters(text) | XmlEvent::Whitespace(text) | XmlEvent::CData(text) => {
                if let Some(parent) = stack.last_mut() {
                    // Merge adjacent character data into one node.
                    match parent.children.last_mut() {
                        Some(Node::Text(existing)) => existing.push_str(&text),
                        _ => parent.children.push(Node::Text(text)),
                    }
                }
            }
            XmlEvent::EndDocument => break,
            _ => {}
        }
    }

    root.ok_or(TreeError::NoRoot)
}

fn write_text<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    for ch in text.chars() {
        match ch {
            '<' => out.write_all(b"&lt;")?,
            '>' => out.write_all(b"&gt;")?,
            '&' => out.write_all(b"&amp;")?,
            _ => write!(out, "{ch}")?,
        }
    }
    Ok(())
}

fn write_attribute_value<W: Write>(out: &mut W, value: &str) -> io::Result<()> {
    for ch in value.chars() {
        match ch {
            '<' => out.write_all(b"&lt;")?,
            '&' => out.write_all(b"&amp;")?,
            '"' => out.write_all(b"&quot;")?,
            _ => write!(out, "{ch}")?,
        }
    }
    Ok(())
}

fn write_element<W: Write>(out: &mut W, element: &Element) -> io::Result<()> {
    write!(out, "<{}", element.name)?;
    for (name, value) in &element.attributes {
        write!(out, " {name}=\"")?;
        write_attribute_value(out, value)?;
        write!(out, "\"")?;
    }

    if element.children.is_empty() {
        write!(out, " />")?;
        return Ok(());
    }

    write!(out, ">")?;
    for child in &element.children {
        match child {
            Node::Element(child) => write_element(out, child)?,
            Node::Text(text) => write_text(out, text)?,
        }
    }
    write!(out, "</{}>", element.name)
}

/// Write the document back out, declaration included.
pub fn write_document<W: Write>(out: &mut W, root: &Element) -> io::Result<()> {
    writeln!(out, "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>")?;
    write_element(out, root)?;
    writeln!(out)
}
