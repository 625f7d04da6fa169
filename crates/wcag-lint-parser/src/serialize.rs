//! HTML serialization for [`Document`].
//!
//! Output follows the HTML fragment serialization algorithm: void elements
//! have no end tag, children of raw-text elements are written verbatim, and
//! text/attribute values are escaped. Parsing the output again yields an
//! equivalent tree.

use crate::dom::{Document, NodeData, NodeId};

/// Elements that never have an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "embed", "frame", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Elements whose text children are not escaped
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe", "noembed", "noframes", "noscript", "plaintext", "script", "style", "xmp",
];

impl Document {
    /// Serialize the document back to HTML.
    ///
    /// For fragments the synthetic shell is stripped and only the content of
    /// `<head>` and `<body>` is returned; full documents include the doctype
    /// and `<html>` element.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if self.is_fragment() {
            for part in [self.head(), self.body()].into_iter().flatten() {
                self.write_children(part, &mut out);
            }
        } else {
            self.write_children(self.root(), &mut out);
        }
        out
    }

    /// Serialize a node including its own tag
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    /// Serialize only the children of a node
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_children(id, &mut out);
        out
    }

    fn write_children(&self, id: NodeId, out: &mut String) {
        let stack = self.children(id).iter().rev().map(|&c| Step::Enter(c)).collect();
        self.write_steps(stack, out);
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        self.write_steps(vec![Step::Enter(id)], out);
    }

    // Explicit stack so nesting depth is bounded by the heap, not the call stack.
    fn write_steps(&self, mut stack: Vec<Step>, out: &mut String) {
        while let Some(step) = stack.pop() {
            let id = match step {
                Step::Enter(id) => id,
                Step::Leave(id) => {
                    if let Some(name) = self.tag_name(id) {
                        out.push_str("</");
                        out.push_str(name);
                        out.push('>');
                    }
                    continue;
                }
            };

            match self.data(id) {
                NodeData::Document => {}
                NodeData::Doctype(name) => {
                    out.push_str("<!DOCTYPE ");
                    out.push_str(name);
                    out.push('>');
                }
                NodeData::Comment(text) => {
                    out.push_str("<!--");
                    out.push_str(text);
                    out.push_str("-->");
                }
                NodeData::Text(text) => {
                    let raw = self
                        .parent(id)
                        .and_then(|p| self.tag_name(p))
                        .is_some_and(|name| RAW_TEXT_ELEMENTS.contains(&name));
                    if raw {
                        out.push_str(text);
                    } else {
                        escape_text(text, out);
                    }
                }
                NodeData::Element(element) => {
                    out.push('<');
                    out.push_str(&element.name);
                    for (name, value) in element.attrs() {
                        out.push(' ');
                        out.push_str(name);
                        out.push_str("=\"");
                        escape_attr(value, out);
                        out.push('"');
                    }
                    out.push('>');

                    if VOID_ELEMENTS.contains(&element.name.as_str()) {
                        continue;
                    }
                    stack.push(Step::Leave(id));
                }
            }

            stack.extend(self.children(id).iter().rev().map(|&c| Step::Enter(c)));
        }
    }
}

/// A pending serialization action
enum Step {
    /// Write the node's start tag (or content) and queue its children
    Enter(NodeId),
    /// Write the element's end tag
    Leave(NodeId),
}

fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parse_string;

    #[test]
    fn test_fragment_round_trip() {
        let html = r#"<h1 class="title">Hello</h1><p>a &amp; b</p>"#;
        let doc = parse_string(html);
        assert_eq!(doc.to_html(), html);
    }

    #[test]
    fn test_void_elements_have_no_end_tag() {
        let doc = parse_string(r#"<p>line<br>next <img alt="" src="a.png"></p>"#);
        assert_eq!(
            doc.to_html(),
            r#"<p>line<br>next <img alt="" src="a.png"></p>"#
        );
    }

    #[test]
    fn test_attribute_quotes_are_escaped() {
        let doc = parse_string(r#"<a href="/" title='say "hi"'>x</a>"#);
        assert_eq!(
            doc.to_html(),
            r#"<a href="/" title="say &quot;hi&quot;">x</a>"#
        );
    }

    #[test]
    fn test_deep_nesting_serializes() {
        let depth = 50_000;
        let html = format!("{}x{}", "<span>".repeat(depth), "</span>".repeat(depth));
        let doc = parse_string(&html);
        assert_eq!(doc.to_html(), html);

        let outermost = doc.elements_by_tag("span")[0];
        assert_eq!(doc.outer_html(outermost).len(), html.len());
    }

    #[test]
    fn test_raw_text_is_not_escaped() {
        let html = "<script>if (a < b && c) {}</script>";
        let doc = parse_string(html);
        assert_eq!(doc.to_html(), html);
    }

    #[test]
    fn test_full_document_keeps_shell() {
        let html = r#"<!DOCTYPE html><html lang="en"><head><title>T</title></head><body><p>x</p></body></html>"#;
        let doc = parse_string(html);
        assert_eq!(doc.to_html(), html);
    }

    #[test]
    fn test_reparse_is_stable() {
        let html = "<ul><li>one<li>two</ul><table><tr><td>1</table><p>open";
        let once = parse_string(html).to_html();
        let twice = parse_string(&once).to_html();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_inner_html_of_body() {
        let doc = parse_string("<p>a</p><p>b</p>");
        let body = doc.body().unwrap();
        assert_eq!(doc.inner_html(body), "<p>a</p><p>b</p>");
        assert_eq!(doc.outer_html(body), "<body><p>a</p><p>b</p></body>");
    }
}
