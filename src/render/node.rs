//! DOM Tree
//!
//! A minimal owned element tree. Views build it, containers hold it, and
//! it serializes to HTML with all text and attribute values escaped.

use html_escaper::Escape;
use std::fmt::{self, Write};

/// Elements serialized without a closing tag
const VOID_ELEMENTS: [&str; 5] = ["br", "hr", "img", "input", "meta"];

/// Text or attribute value written HTML-escaped
pub(crate) struct Escaped<'a>(pub(crate) &'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.escape(f, false)
    }
}

/// A DOM node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text content of this node and its descendants
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Serialize to HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_html(&mut out);
        out
    }

    pub fn write_html<W: Write>(&self, out: &mut W) -> fmt::Result {
        match self {
            Node::Text(text) => write!(out, "{}", Escaped(text)),
            Node::Element(element) => element.write_html(out),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

/// An element with ordered attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing an earlier value of the same name
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn element_id(&self) -> Option<&str> {
        self.get_attr("id")
    }

    /// Child elements, skipping text nodes
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// First descendant (or self) with the given id
    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        if self.element_id() == Some(id) {
            return Some(self);
        }
        self.child_elements().find_map(|child| child.find_by_id(id))
    }

    /// All descendants (and self) with the given tag, in document order
    pub fn find_all(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_tag(tag, &mut found);
        found
    }

    fn collect_tag<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        if self.tag == tag {
            found.push(self);
        }
        for child in self.child_elements() {
            child.collect_tag(tag, found);
        }
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        let _ = self.write_html(&mut out);
        out
    }

    pub fn write_html<W: Write>(&self, out: &mut W) -> fmt::Result {
        write!(out, "<{}", self.tag)?;
        for (name, value) in &self.attrs {
            write!(out, " {}=\"{}\"", name, Escaped(value))?;
        }
        out.write_char('>')?;

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return Ok(());
        }

        for child in &self.children {
            child.write_html(out)?;
        }
        write!(out, "</{}>", self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_nested() {
        let node = Element::new("div")
            .id("box")
            .child(Element::new("h3").text("Title"))
            .child(Element::new("br"))
            .text("tail");

        assert_eq!(node.to_html(), r#"<div id="box"><h3>Title</h3><br>tail</div>"#);
    }

    #[test]
    fn test_escaping() {
        let node = Element::new("a")
            .attr("href", r#"x?a=1&b="2""#)
            .text("<script>alert(1)</script>");
        let html = node.to_html();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains(r#""2""#));
    }

    #[test]
    fn test_attr_replaces() {
        let element = Element::new("p").class("a").class("b");
        assert_eq!(element.attrs.len(), 1);
        assert_eq!(element.get_attr("class"), Some("b"));
    }

    #[test]
    fn test_find_and_text() {
        let tree = Element::new("ul")
            .child(Element::new("li").id("one").text("first"))
            .child(Element::new("li").child(Element::new("b").text("second")));

        assert_eq!(tree.find_all("li").len(), 2);
        assert_eq!(tree.find_by_id("one").unwrap().text_content(), "first");
        assert_eq!(tree.text_content(), "firstsecond");
        assert!(tree.find_by_id("missing").is_none());
    }
}
