//! A small mutable element tree over quick-xml events.
//!
//! Enough structure to find tables, rows, cells, and paragraphs in
//! `word/document.xml`, edit them, and write the part back. Anything the tree
//! does not model (declarations, comments, processing instructions) is kept
//! as the original event and written out unchanged.

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesStart, BytesText, Event};

use crate::error::DocxError;

/// A node in the element tree.
#[derive(Debug, Clone)]
pub(crate) enum Node {
    Element(Element),
    /// Unescaped character data.
    Text(String),
    /// Any other event, written back verbatim.
    Other(Event<'static>),
}

/// An element with its start tag (name and raw attributes) and children.
#[derive(Debug, Clone)]
pub(crate) struct Element {
    start: BytesStart<'static>,
    pub(crate) children: Vec<Node>,
}

impl Element {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            start: BytesStart::new(name.to_string()),
            children: Vec::new(),
        }
    }

    pub(crate) fn is(&self, name: &str) -> bool {
        self.start.name().as_ref() == name.as_bytes()
    }

    fn name_string(&self) -> String {
        String::from_utf8_lossy(self.start.name().as_ref()).into_owned()
    }

    /// Unescaped value of attribute `key`.
    pub(crate) fn attr(&self, key: &str) -> Option<String> {
        let attr = self.start.try_get_attribute(key).ok().flatten()?;
        attr.unescape_value().ok().map(|v| v.into_owned())
    }

    /// Set attribute `key`, replacing an existing value and keeping the
    /// order of the other attributes.
    pub(crate) fn set_attr(&mut self, key: &str, value: &str) {
        let mut start = BytesStart::new(self.name_string());
        for attr in self.start.attributes().flatten() {
            if attr.key.as_ref() != key.as_bytes() {
                start.push_attribute(attr);
            }
        }
        start.push_attribute((key, value));
        self.start = start;
    }

    pub(crate) fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.set_attr(key, value);
        self
    }

    pub(crate) fn push(&mut self, element: Element) {
        self.children.push(Node::Element(element));
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.children.push(Node::Text(text.to_string()));
    }

    pub(crate) fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    pub(crate) fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            _ => None,
        })
    }

    /// Direct children named `name`.
    pub(crate) fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |e| e.is(name))
    }

    pub(crate) fn children_named_mut<'a>(
        &'a mut self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a mut Element> {
        self.elements_mut().filter(move |e| e.is(name))
    }

    pub(crate) fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.is(name))
    }

    pub(crate) fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.elements_mut().find(|e| e.is(name))
    }

    /// Remove every direct child named `name`.
    pub(crate) fn remove_children(&mut self, name: &str) {
        self.children
            .retain(|n| !matches!(n, Node::Element(e) if e.is(name)));
    }

    /// The first child named `name`, inserting an empty one if missing.
    ///
    /// A new child goes before the first existing child whose name is in
    /// `successors`, or at the end when there is none, so schema order holds.
    pub(crate) fn get_or_insert_child(&mut self, name: &str, successors: &[&str]) -> &mut Element {
        let existing = self
            .children
            .iter()
            .position(|n| matches!(n, Node::Element(e) if e.is(name)));
        let index = match existing {
            Some(i) => i,
            None => {
                let at = self
                    .children
                    .iter()
                    .position(|n| {
                        matches!(n, Node::Element(e) if successors.iter().any(|s| e.is(s)))
                    })
                    .unwrap_or(self.children.len());
                self.children.insert(at, Node::Element(Element::new(name)));
                at
            }
        };
        match &mut self.children[index] {
            Node::Element(e) => e,
            _ => unreachable!("index points at an element"),
        }
    }

    /// Concatenated text of all descendant text nodes.
    pub(crate) fn inner_text(&self) -> String {
        let mut out = String::new();
        for node in &self.children {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) => out.push_str(&e.inner_text()),
                Node::Other(_) => {}
            }
        }
        out
    }

    fn write_to(&self, writer: &mut Writer<Vec<u8>>) -> Result<(), DocxError> {
        if self.children.is_empty() {
            writer.write_event(Event::Empty(self.start.borrow()))?;
            return Ok(());
        }
        writer.write_event(Event::Start(self.start.borrow()))?;
        for child in &self.children {
            write_node(child, writer)?;
        }
        writer.write_event(Event::End(self.start.to_end()))?;
        Ok(())
    }
}

fn write_node(node: &Node, writer: &mut Writer<Vec<u8>>) -> Result<(), DocxError> {
    match node {
        Node::Element(e) => e.write_to(writer),
        Node::Text(t) => {
            writer.write_event(Event::Text(BytesText::new(t)))?;
            Ok(())
        }
        Node::Other(event) => {
            writer.write_event(event)?;
            Ok(())
        }
    }
}

/// A parsed XML part: one root element between prolog and epilog nodes.
#[derive(Debug, Clone)]
pub(crate) struct XmlTree {
    prolog: Vec<Node>,
    root: Element,
    epilog: Vec<Node>,
}

impl XmlTree {
    pub(crate) fn parse(xml: &[u8]) -> Result<Self, DocxError> {
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut nodes: Vec<Node> = Vec::new();

        fn attach(stack: &mut [Element], nodes: &mut Vec<Node>, node: Node) {
            match stack.last_mut() {
                Some(parent) => parent.children.push(node),
                None => nodes.push(node),
            }
        }

        loop {
            match reader.read_event_into(&mut buf)?.into_owned() {
                Event::Start(start) => stack.push(Element {
                    start,
                    children: Vec::new(),
                }),
                Event::Empty(start) => attach(
                    &mut stack,
                    &mut nodes,
                    Node::Element(Element {
                        start,
                        children: Vec::new(),
                    }),
                ),
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| {
                        DocxError::Malformed("closing tag without opening tag".into())
                    })?;
                    attach(&mut stack, &mut nodes, Node::Element(element));
                }
                Event::Text(text) => {
                    let text = text.unescape()?.into_owned();
                    attach(&mut stack, &mut nodes, Node::Text(text));
                }
                Event::Eof => break,
                other => attach(&mut stack, &mut nodes, Node::Other(other)),
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(DocxError::Malformed(format!(
                "{} unclosed element(s)",
                stack.len()
            )));
        }
        let root_at = nodes
            .iter()
            .position(|n| matches!(n, Node::Element(_)))
            .ok_or_else(|| DocxError::Malformed("no root element".into()))?;
        let epilog = nodes.split_off(root_at + 1);
        let root = match nodes.pop() {
            Some(Node::Element(root)) => root,
            _ => return Err(DocxError::Malformed("no root element".into())),
        };
        Ok(Self {
            prolog: nodes,
            root,
            epilog,
        })
    }

    pub(crate) fn root(&self) -> &Element {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    pub(crate) fn to_bytes(&self) -> Result<Vec<u8>, DocxError> {
        let mut writer = Writer::new(Vec::new());
        for node in &self.prolog {
            write_node(node, &mut writer)?;
        }
        self.root.write_to(&mut writer)?;
        for node in &self.epilog {
            write_node(node, &mut writer)?;
        }
        Ok(writer.into_inner())
    }
}
