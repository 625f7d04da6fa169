//! Tolerant HTML tree loader for wcag-lint
//!
//! This crate turns an HTML string (a full document or a bare fragment) into a
//! mutable, index-addressed [`Document`] tree that checkers can walk and the
//! remediator can rewrite. Tokenizing and tree construction are delegated to
//! html5ever through `scraper`, so unclosed tags, stray end tags and other
//! malformed markup are recovered the way a browser would, never reported as
//! errors.
//!
//! # Quick Start
//!
//! ```
//! use wcag_lint_parser::parse_string;
//!
//! let doc = parse_string("<h1>Title</h1><p>Body <img src=a.png>");
//!
//! for img in doc.elements_by_tag("img") {
//!     assert_eq!(doc.attr(img, "src"), Some("a.png"));
//!     assert_eq!(doc.attr(img, "alt"), None);
//! }
//! ```
//!
//! # Modules
//!
//! - [`dom`]: Arena tree: [`Document`], [`NodeId`], [`NodeData`], [`Element`]
//! - [`error`]: [`ParseError`] for reading documents from disk
//!
//! # Fragments
//!
//! Input without an `<html>` tag is treated as a fragment. It is still parsed
//! inside a `<html><head></head><body>` shell so every top-level node has a
//! parent, but [`Document::to_html`] only emits the shell's content:
//!
//! ```
//! # use wcag_lint_parser::parse_string;
//! let doc = parse_string("<p>one</p><p>two");
//! assert!(doc.is_fragment());
//! assert_eq!(doc.to_html(), "<p>one</p><p>two</p>");
//! ```

pub mod dom;
pub mod error;
mod serialize;

pub use dom::{Document, Element, NodeData, NodeId};
pub use error::{ParseError, ParseResult};

use scraper::{Html, Node};
use std::fs;
use std::path::Path;

/// Parse an HTML document from disk
pub fn parse_file(path: &Path) -> ParseResult<Document> {
    let content = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_string(&content))
}

/// Parse an HTML document or fragment from a string
pub fn parse_string(source: &str) -> Document {
    let html = Html::parse_document(source);
    let mut doc = Document::new(!has_html_tag(source));

    // Explicit stack instead of recursion so deeply nested markup cannot
    // overflow the call stack.
    let mut stack = Vec::new();
    let root_children: Vec<_> = html.tree.root().children().collect();
    for child in root_children.into_iter().rev() {
        stack.push((child, doc.root()));
    }

    while let Some((node, parent)) = stack.pop() {
        let Some(data) = convert_node(node.value()) else {
            continue;
        };
        let id = doc.create_node(data);
        doc.append_child(parent, id);

        let children: Vec<_> = node.children().collect();
        for child in children.into_iter().rev() {
            stack.push((child, id));
        }
    }

    tracing::trace!(fragment = doc.is_fragment(), "parsed html document");
    doc
}

fn convert_node(node: &Node) -> Option<NodeData> {
    match node {
        Node::Doctype(doctype) => Some(NodeData::Doctype(doctype.name().to_string())),
        Node::Comment(comment) => Some(NodeData::Comment(comment.to_string())),
        Node::Text(text) => Some(NodeData::Text(text.to_string())),
        Node::Element(element) => {
            let mut converted = Element::new(element.name());
            for (name, value) in element.attrs() {
                converted.set_attr(name, value);
            }
            Some(NodeData::Element(converted))
        }
        _ => None,
    }
}

/// Check whether the source carries its own `<html>` start tag
fn has_html_tag(source: &str) -> bool {
    let lower = source.to_ascii_lowercase();
    lower.match_indices("<html").any(|(pos, tag)| {
        lower[pos + tag.len()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_whitespace() || c == '>' || c == '/')
    })
}
