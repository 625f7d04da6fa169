//! Arena-backed document tree.
//!
//! Every node lives in a single `Vec` owned by [`Document`] and is addressed by a
//! [`NodeId`]. Rewrites (rename, insert, detach) only edit parent/child index
//! lists, so a `NodeId` obtained before a rewrite stays valid afterwards. A
//! detached node keeps its slot in the arena but is no longer reachable from
//! [`Document::root`], which means it is skipped by every traversal.
//!
//! # Tree Structure
//!
//! ```text
//! Document (root)
//!  ├─ Doctype         ("html")
//!  └─ Element <html>
//!       ├─ Element <head>
//!       └─ Element <body>
//!            ├─ Element <p>  (attrs, children…)
//!            │    └─ Text
//!            └─ Comment
//! ```
//!
//! # Example
//!
//! ```
//! use wcag_lint_parser::parse_string;
//!
//! let mut doc = parse_string("<h1>Title</h1><h3>Sub</h3>");
//! let h3 = doc.elements_by_tag("h3")[0];
//! doc.rename(h3, "h2");
//!
//! assert_eq!(doc.to_html(), "<h1>Title</h1><h2>Sub</h2>");
//! ```

/// Index of a node inside a [`Document`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Payload of a single node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The synthetic document root.
    Document,
    /// `<!DOCTYPE name>`
    Doctype(String),
    /// An element with a tag name and attributes.
    Element(Element),
    /// A run of character data.
    Text(String),
    /// `<!-- … -->`
    Comment(String),
}

/// An element's tag name and attribute map.
///
/// Tag names are stored lowercase. Attribute names are unique and keep the
/// order in which they first appeared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name (e.g. `"h2"`, `"table"`).
    pub name: String,
    attrs: Vec<(String, String)>,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            attrs: Vec::new(),
        }
    }

    /// Get an attribute value by (case-insensitive) name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    /// Set an attribute, replacing the value in place if it already exists
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self
            .attrs
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
        {
            Some((_, v)) => *v = value.to_string(),
            None => self.attrs.push((name.to_ascii_lowercase(), value.to_string())),
        }
    }

    /// Remove an attribute, returning its previous value
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self
            .attrs
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(name))?;
        Some(self.attrs.remove(pos).1)
    }

    /// Iterate over `(name, value)` pairs in source order
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A parsed HTML document.
///
/// Fragments are parsed inside a synthetic `<html><head></head><body>` shell
/// so that their top-level nodes have an addressable parent (the `<body>`);
/// [`is_fragment`](Document::is_fragment) records whether that shell was
/// synthesized, and [`to_html`](crate::Document::to_html) strips it again.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    fragment: bool,
}

impl Document {
    /// Create an empty document holding only the root node
    pub fn new(fragment: bool) -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::Document,
                parent: None,
                children: Vec::new(),
            }],
            fragment,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Whether the source had no `<html>` tag of its own
    pub fn is_fragment(&self) -> bool {
        self.fragment
    }

    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.0].data {
            NodeData::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Tag name of an element node, `None` for every other kind of node
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.name.as_str())
    }

    /// Check if a node is an element with the given tag name
    pub fn is_tag(&self, id: NodeId, name: &str) -> bool {
        self.tag_name(id).is_some_and(|n| n.eq_ignore_ascii_case(name))
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attr(name))
    }

    /// Set an attribute on an element; no-op for non-element nodes
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element_mut(id) {
            element.set_attr(name, value);
        }
    }

    /// Change an element's tag name, keeping attributes and children.
    ///
    /// Returns `false` if the node is not an element.
    pub fn rename(&mut self, id: NodeId, name: &str) -> bool {
        match self.element_mut(id) {
            Some(element) => {
                element.name = name.to_ascii_lowercase();
                true
            }
            None => false,
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Iterate over the element children of a node
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[id.0]
            .children
            .iter()
            .copied()
            .filter(|&child| self.element(child).is_some())
    }

    /// Pre-order (document order) traversal of everything below `id`
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants::new(self, id)
    }

    /// Iterate from the parent of `id` up to the document root
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.parent(id),
        }
    }

    /// All attached elements with the given tag name, in document order
    pub fn elements_by_tag(&self, name: &str) -> Vec<NodeId> {
        self.find_descendants(self.root(), name)
    }

    /// Elements below `id` with the given tag name, in document order
    pub fn find_descendants(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(id)
            .filter(|&node| self.is_tag(node, name))
            .collect()
    }

    pub fn first_by_tag(&self, name: &str) -> Option<NodeId> {
        self.descendants(self.root())
            .find(|&node| self.is_tag(node, name))
    }

    /// The `<html>` element (synthesized for fragments)
    pub fn html_element(&self) -> Option<NodeId> {
        self.element_children(self.root())
            .find(|&node| self.is_tag(node, "html"))
    }

    pub fn head(&self) -> Option<NodeId> {
        let html = self.html_element()?;
        self.element_children(html)
            .find(|&node| self.is_tag(node, "head"))
    }

    pub fn body(&self) -> Option<NodeId> {
        let html = self.html_element()?;
        self.element_children(html)
            .find(|&node| self.is_tag(node, "body"))
    }

    /// Concatenated text of every text node below `id`
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &[], &mut out);
        out
    }

    /// Like [`text_content`](Self::text_content) but skipping `<script>`,
    /// `<style>` and `<template>` subtrees
    pub fn visible_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &["script", "style", "template"], &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, skip: &[&str], out: &mut String) {
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            match self.data(node) {
                NodeData::Text(text) => out.push_str(text),
                NodeData::Element(e) if skip.contains(&e.name.as_str()) => {}
                NodeData::Element(_) => stack.extend(self.children(node).iter().rev().copied()),
                _ => {}
            }
        }
    }

    /// Allocate a detached node
    pub fn create_node(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.create_node(NodeData::Element(Element::new(name)))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.create_node(NodeData::Text(text.to_string()))
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    ///
    /// Requests that would create a cycle are ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.would_cycle(parent, child) {
            return;
        }
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Insert `new` immediately before `reference` in its parent's child list.
    ///
    /// Does nothing if `reference` is detached or the insert would create a cycle.
    pub fn insert_before(&mut self, reference: NodeId, new: NodeId) {
        let Some(parent) = self.parent(reference) else {
            return;
        };
        if new == reference || self.would_cycle(parent, new) {
            return;
        }
        self.detach(new);
        let pos = self.nodes[parent.0]
            .children
            .iter()
            .position(|&c| c == reference)
            .unwrap_or(self.nodes[parent.0].children.len());
        self.nodes[new.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(pos, new);
    }

    /// Remove a node (and its subtree) from its parent
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
    }

    /// Put `new` where `old` currently is and detach `old`
    pub fn replace(&mut self, old: NodeId, new: NodeId) {
        if self.parent(old).is_none() {
            return;
        }
        self.insert_before(old, new);
        self.detach(old);
    }

    fn would_cycle(&self, parent: NodeId, child: NodeId) -> bool {
        parent == child || self.ancestors(parent).any(|a| a == child)
    }
}

/// Iterator returned by [`Document::descendants`]
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl<'a> Descendants<'a> {
    fn new(doc: &'a Document, start: NodeId) -> Self {
        let stack = doc.children(start).iter().rev().copied().collect();
        Self { doc, stack }
    }
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}

/// Iterator returned by [`Document::ancestors`]
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.doc.parent(id);
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new(true);
        let root = doc.root();
        let div = doc.create_element("div");
        let p = doc.create_element("P");
        let text = doc.create_text("hello");
        doc.append_child(root, div);
        doc.append_child(div, p);
        doc.append_child(p, text);
        (doc, div, p, text)
    }

    #[test]
    fn test_tag_names_are_lowercased() {
        let (doc, _, p, _) = sample();
        assert_eq!(doc.tag_name(p), Some("p"));
        assert!(doc.is_tag(p, "P"));
    }

    #[test]
    fn test_descendants_in_document_order() {
        let (doc, div, p, text) = sample();
        let order: Vec<_> = doc.descendants(doc.root()).collect();
        assert_eq!(order, vec![div, p, text]);
    }

    #[test]
    fn test_attributes_are_unique() {
        let mut element = Element::new("th");
        element.set_attr("scope", "row");
        element.set_attr("SCOPE", "col");
        assert_eq!(element.attrs().count(), 1);
        assert_eq!(element.attr("scope"), Some("col"));
        assert_eq!(element.remove_attr("scope"), Some("col".to_string()));
        assert!(!element.has_attr("scope"));
    }

    #[test]
    fn test_detached_nodes_are_unreachable() {
        let (mut doc, _, p, text) = sample();
        doc.detach(p);
        assert!(doc.elements_by_tag("p").is_empty());
        assert_eq!(doc.parent(p), None);
        // the subtree itself is intact
        assert_eq!(doc.children(p), &[text]);
    }

    #[test]
    fn test_insert_before_and_replace() {
        let (mut doc, div, p, _) = sample();
        let ul = doc.create_element("ul");
        doc.insert_before(p, ul);
        assert_eq!(doc.children(div), &[ul, p]);

        let h2 = doc.create_element("h2");
        doc.replace(p, h2);
        assert_eq!(doc.children(div), &[ul, h2]);
        assert_eq!(doc.parent(p), None);
    }

    #[test]
    fn test_append_child_ignores_cycles() {
        let (mut doc, div, p, _) = sample();
        doc.append_child(p, div);
        assert_eq!(doc.parent(p), Some(div));
        assert_eq!(doc.parent(div), Some(doc.root()));
    }

    #[test]
    fn test_text_content() {
        let (doc, div, _, _) = sample();
        assert_eq!(doc.text_content(div), "hello");
    }

    #[test]
    fn test_visible_text_keeps_order_and_skips_scripts() {
        let (mut doc, div, p, _) = sample();
        let script = doc.create_element("script");
        let code = doc.create_text("ignored()");
        doc.append_child(script, code);
        doc.insert_before(p, script);
        let tail = doc.create_text(" world");
        doc.append_child(div, tail);

        assert_eq!(doc.visible_text(div), "hello world");
        assert_eq!(doc.text_content(div), "ignored()hello world");
    }

    #[test]
    fn test_text_content_of_deep_tree() {
        let mut doc = Document::new(true);
        let mut current = doc.create_text("deep");
        for _ in 0..50_000 {
            let span = doc.create_element("span");
            doc.append_child(span, current);
            current = span;
        }
        let root = doc.root();
        doc.append_child(root, current);

        assert_eq!(doc.text_content(root), "deep");
        assert_eq!(doc.visible_text(root), "deep");
    }
}
