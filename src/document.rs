//! Immutable markup trees and their HTML writer.
//!
//! Pages are built as plain values: a [`Node`] is an element, a text run, a
//! fragment of siblings, or a chunk of pre-sanitized HTML. Builders take
//! `self` by value and return the extended node, so a tree reads top-down the
//! way the markup does:
//!
//! ```
//! use daily_thoughts::document::{el, text};
//!
//! let link = el("a").attr("href", "/daily").child(text("< back to list"));
//! assert_eq!(link.to_html(), r#"<a href="/daily">&lt; back to list</a>"#);
//! ```
//!
//! Serialization goes through maud's [`Render`] trait, which also supplies the
//! escaping. Text and attribute values are always escaped; only [`Node::Raw`]
//! is written verbatim.

use maud::{DOCTYPE, Render};

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Fragment(Vec<Node>),
    /// Trusted HTML, already sanitized. Written without escaping.
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attributes: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

/// Start an element with no attributes or children.
pub fn el(tag: &'static str) -> Node {
    Node::Element(Element {
        tag,
        attributes: Vec::new(),
        children: Vec::new(),
    })
}

pub fn text(s: impl Into<String>) -> Node {
    Node::Text(s.into())
}

pub fn fragment(children: impl IntoIterator<Item = Node>) -> Node {
    Node::Fragment(children.into_iter().collect())
}

pub fn raw(html: impl Into<String>) -> Node {
    Node::Raw(html.into())
}

impl Node {
    /// Add an attribute. No-op on anything but an element.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        if let Node::Element(e) = &mut self {
            e.attributes.push((name, value.into()));
        }
        self
    }

    /// Shorthand for `attr("class", ...)`.
    pub fn class(self, value: impl Into<String>) -> Self {
        self.attr("class", value)
    }

    /// Append a child. Fragments accept children too.
    pub fn child(mut self, node: Node) -> Self {
        match &mut self {
            Node::Element(e) => e.children.push(node),
            Node::Fragment(nodes) => nodes.push(node),
            Node::Text(_) | Node::Raw(_) => {}
        }
        self
    }

    /// Append several children. An `Option<Node>` works here, which is how
    /// conditional content is expressed.
    pub fn children(self, nodes: impl IntoIterator<Item = Node>) -> Self {
        nodes.into_iter().fold(self, Node::child)
    }

    /// Serialize this node (no doctype).
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.render_to(&mut out);
        out
    }
}

impl Render for Node {
    fn render_to(&self, buffer: &mut String) {
        match self {
            Node::Text(s) => s.as_str().render_to(buffer),
            Node::Raw(html) => buffer.push_str(html),
            Node::Fragment(nodes) => {
                for node in nodes {
                    node.render_to(buffer);
                }
            }
            Node::Element(e) => {
                buffer.push('<');
                buffer.push_str(e.tag);
                for (name, value) in &e.attributes {
                    buffer.push(' ');
                    buffer.push_str(name);
                    buffer.push_str("=\"");
                    value.as_str().render_to(buffer);
                    buffer.push('"');
                }
                buffer.push('>');
                if VOID_ELEMENTS.contains(&e.tag) {
                    return;
                }
                for child in &e.children {
                    child.render_to(buffer);
                }
                buffer.push_str("</");
                buffer.push_str(e.tag);
                buffer.push('>');
            }
        }
    }
}

/// A complete page: the root `html` node plus its title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub root: Node,
}

impl Document {
    /// Serialize with a leading doctype declaration.
    pub fn into_html(self) -> String {
        let mut out = String::new();
        DOCTYPE.render_to(&mut out);
        self.root.render_to(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_nested_elements() {
        let node = el("ol")
            .class("m-8")
            .child(el("li").child(text("one")))
            .child(el("li").child(text("two")));
        assert_eq!(
            node.to_html(),
            r#"<ol class="m-8"><li>one</li><li>two</li></ol>"#
        );
    }

    #[test]
    fn escapes_text_and_attributes() {
        let node = el("a")
            .attr("title", r#"say "hi" & <bye>"#)
            .child(text("<script>alert('x')</script>"));
        let html = node.to_html();
        assert!(html.contains(r#"title="say &quot;hi&quot; &amp; &lt;bye&gt;""#));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn raw_is_written_verbatim() {
        let node = el("main").child(raw("<p>already <em>safe</em></p>"));
        assert_eq!(node.to_html(), "<main><p>already <em>safe</em></p></main>");
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let node = fragment([
            el("meta").attr("charset", "UTF-8"),
            el("link").attr("href", "/style.css").attr("rel", "stylesheet"),
        ]);
        assert_eq!(
            node.to_html(),
            r#"<meta charset="UTF-8"><link href="/style.css" rel="stylesheet">"#
        );
    }

    #[test]
    fn optional_children_are_skipped() {
        let present = Some(el("span").child(text("yes")));
        let absent: Option<Node> = None;
        let node = el("div").children(present).children(absent);
        assert_eq!(node.to_html(), "<div><span>yes</span></div>");
    }

    #[test]
    fn attr_on_text_is_ignored() {
        assert_eq!(text("plain").attr("class", "x"), text("plain"));
    }

    #[test]
    fn document_starts_with_doctype() {
        let doc = Document {
            title: "t".to_string(),
            root: el("html").attr("lang", "en"),
        };
        let html = doc.into_html();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with(r#"<html lang="en"></html>"#));
    }
}
