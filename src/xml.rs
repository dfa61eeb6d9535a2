//! A small XML-to-tree decoder.
//!
//! SOAP responses are turned into a nested [`Node`] tree keyed by element
//! local name. Repeated sibling elements collapse into [`Node::List`], which
//! means a collection with a single entry is indistinguishable from a plain
//! element. Use [`as_sequence`] wherever a collection is read.
//!
//! Uses quick-xml which doesn't expand external entities.

use quick_xml::{events::Event, Reader};
use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// A decoded XML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element without text or children, e.g. `<Roles/>`.
    Empty,
    /// A text-only element.
    Text(String),
    /// An element with child elements, keyed by local name.
    Element(BTreeMap<String, Node>),
    /// Sibling elements sharing the same name, in document order.
    List(Vec<Node>),
}

impl Node {
    /// Get a child element by local name.
    pub fn get(&self, name: &str) -> Option<&Node> {
        match self {
            Node::Element(children) => children.get(name),
            _ => None,
        }
    }

    /// Get the text of a text-only element.
    pub fn text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Get the text of a child element. Missing and empty children both
    /// yield `None`.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Node::text)
    }

    fn insert_child(children: &mut BTreeMap<String, Node>, name: String, node: Node) {
        match children.remove(&name) {
            None => {
                children.insert(name, node);
            }
            Some(Node::List(mut nodes)) => {
                nodes.push(node);
                children.insert(name, Node::List(nodes));
            }
            Some(existing) => {
                children.insert(name, Node::List(vec![existing, node]));
            }
        }
    }
}

/// Normalize a possibly repeated element into a sequence.
///
/// An absent element yields no entries, a [`Node::List`] yields its entries
/// and anything else, including an empty element, is a sequence of one.
pub fn as_sequence(node: Option<&Node>) -> Vec<&Node> {
    match node {
        None => Vec::new(),
        Some(Node::List(nodes)) => nodes.iter().collect(),
        Some(node) => vec![node],
    }
}

struct Frame {
    name: String,
    children: BTreeMap<String, Node>,
    text: String,
}

impl Frame {
    fn new(name: String) -> Self {
        Self {
            name,
            children: BTreeMap::new(),
            text: String::new(),
        }
    }

    fn into_node(self) -> (String, Node) {
        let text = self.text.trim();
        let node = if !self.children.is_empty() {
            Node::Element(self.children)
        } else if !text.is_empty() {
            Node::Text(text.to_string())
        } else {
            Node::Empty
        };
        (self.name, node)
    }
}

fn local_name(name: &[u8]) -> String {
    String::from_utf8_lossy(name).into_owned()
}

/// Parse an XML document into a tree. The returned node is an
/// [`Node::Element`] holding the document's root element.
pub fn parse(xml: &str) -> Result<Node> {
    // Text is trimmed per element once it is complete, so content split by
    // comments keeps its inner whitespace.
    let mut reader = Reader::from_str(xml);

    let mut stack: Vec<Frame> = Vec::new();
    let mut root: BTreeMap<String, Node> = BTreeMap::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(Frame::new(local_name(e.local_name().as_ref()))),
            Event::Empty(e) => {
                let name = local_name(e.local_name().as_ref());
                match stack.last_mut() {
                    Some(parent) => Node::insert_child(&mut parent.children, name, Node::Empty),
                    None => Node::insert_child(&mut root, name, Node::Empty),
                }
            }
            Event::Text(t) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&t.unescape()?);
                }
            }
            Event::CData(c) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::End(_) => {
                let frame = stack
                    .pop()
                    .ok_or_else(|| Error::Parse("unexpected closing tag".to_string()))?;
                let (name, node) = frame.into_node();
                match stack.last_mut() {
                    Some(parent) => Node::insert_child(&mut parent.children, name, node),
                    None => Node::insert_child(&mut root, name, node),
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            // carry no data we care about.
            _ => {}
        }
    }

    if let Some(frame) = stack.last() {
        return Err(Error::Parse(format!("unclosed element {}", frame.name)));
    }
    if root.is_empty() {
        return Err(Error::Parse("empty document".to_string()));
    }

    Ok(Node::Element(root))
}
