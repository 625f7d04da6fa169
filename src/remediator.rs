//! Deterministic rewrites for a subset of detected issues.
//!
//! Fixes run in a fixed order on a private copy of the document:
//!
//! 1. heading renumbering ([`fix_hierarchy`])
//! 2. table headers and scopes ([`add_scope_attributes`])
//! 3. pseudo-list conversion ([`convert_pseudo_lists`])
//! 4. bold paragraph promotion ([`promote_bold_paragraphs`])
//!
//! A fix is only reported when the serialized document actually changed.

use crate::checkers::headings::fix_hierarchy;
use crate::checkers::lists::convert_pseudo_lists;
use crate::checkers::normalized_text;
use crate::checkers::tables::add_scope_attributes;
use serde::Serialize;
use wcag_lint_common::parser::NodeData;
use wcag_lint_common::{Document, NodeId, RemediationOptions, parse_string};

/// Maximum text length of a bold paragraph promoted to a heading
pub const MAX_BOLD_HEADING_LEN: usize = 120;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemediationResult {
    /// Remediated HTML (fragment content, or the full document)
    pub content: String,
    /// Human-readable description of each fix applied, in order
    pub fixes_applied: Vec<String>,
    pub fix_count: usize,
}

/// The single `<strong>`/`<b>` child that makes up a paragraph's visible content
fn sole_bold_child(doc: &Document, p: NodeId) -> Option<NodeId> {
    let mut bold = None;
    for &child in doc.children(p) {
        match doc.data(child) {
            NodeData::Text(text) if text.trim().is_empty() => {}
            NodeData::Comment(_) => {}
            NodeData::Element(e) if (e.name == "strong" || e.name == "b") && bold.is_none() => {
                bold = Some(child);
            }
            _ => return None,
        }
    }
    bold
}

/// Replace paragraphs consisting only of bold text with `<h2>` headings.
///
/// The heading carries the paragraph's plain text. Paragraphs whose text is
/// empty or longer than [`MAX_BOLD_HEADING_LEN`] characters are left alone.
/// Returns the number of paragraphs promoted.
pub fn promote_bold_paragraphs(doc: &mut Document) -> usize {
    let candidates: Vec<(NodeId, String)> = doc
        .elements_by_tag("p")
        .into_iter()
        .filter(|&p| sole_bold_child(doc, p).is_some())
        .map(|p| (p, normalized_text(doc, p)))
        .filter(|(_, text)| !text.is_empty() && text.chars().count() <= MAX_BOLD_HEADING_LEN)
        .collect();

    let count = candidates.len();
    for (p, text) in candidates {
        let heading = doc.create_element("h2");
        let text = doc.create_text(&text);
        doc.append_child(heading, text);
        doc.replace(p, heading);
    }
    count
}

pub struct Remediator {
    options: RemediationOptions,
}

impl Remediator {
    pub fn new() -> Self {
        Self::with_options(RemediationOptions::default())
    }

    pub fn with_options(options: RemediationOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RemediationOptions {
        &self.options
    }

    /// Parse, fix and re-serialize an HTML document or fragment.
    ///
    /// The input string is never modified.
    pub fn remediate(&self, html: &str) -> RemediationResult {
        let mut doc = parse_string(html);
        let fixes_applied = self.remediate_document(&mut doc);
        RemediationResult {
            content: doc.to_html(),
            fix_count: fixes_applied.len(),
            fixes_applied,
        }
    }

    /// Apply the enabled fixes to a parsed document and describe those that
    /// changed it
    pub fn remediate_document(&self, doc: &mut Document) -> Vec<String> {
        let mut fixes = Vec::new();

        if self.options.fix_headings {
            apply(doc, &mut fixes, fix_hierarchy, |n| {
                format!("Fixed heading hierarchy ({} headings renumbered)", n)
            });
        }
        if self.options.fix_tables {
            apply(doc, &mut fixes, add_scope_attributes, |n| {
                format!("Added table header scope attributes ({} cells updated)", n)
            });
        }
        if self.options.fix_lists {
            apply(doc, &mut fixes, convert_pseudo_lists, |n| {
                format!("Converted {} pseudo-lists to semantic list markup", n)
            });
        }
        if self.options.fix_bold_headings {
            apply(doc, &mut fixes, promote_bold_paragraphs, |n| {
                format!("Converted {} bold paragraphs to headings", n)
            });
        }

        tracing::debug!(fixes = fixes.len(), "remediation finished");
        fixes
    }
}

impl Default for Remediator {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one fix and record its description if the serialized tree changed
fn apply(
    doc: &mut Document,
    fixes: &mut Vec<String>,
    fix: fn(&mut Document) -> usize,
    describe: impl Fn(usize) -> String,
) {
    let before = doc.to_html();
    let count = fix(doc);
    if count > 0 && doc.to_html() != before {
        let description = describe(count);
        tracing::debug!(fix = %description, "applied fix");
        fixes.push(description);
    }
}

/// Remediate an HTML string with the given options
pub fn remediate(html: &str, options: RemediationOptions) -> RemediationResult {
    Remediator::with_options(options).remediate(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_fix() {
        let result = Remediator::new().remediate("<h1>T</h1><h3>S</h3>");
        assert_eq!(result.content, "<h1>T</h1><h2>S</h2>");
        assert_eq!(
            result.fixes_applied,
            vec!["Fixed heading hierarchy (1 headings renumbered)"]
        );
        assert_eq!(result.fix_count, 1);
    }

    #[test]
    fn test_bold_paragraph_promotion() {
        let result = Remediator::new().remediate(
            "<p><strong>Shipping</strong></p><p>We ship <b>worldwide</b>.</p><p> <b>Returns</b> </p>",
        );
        assert_eq!(
            result.content,
            "<h2>Shipping</h2><p>We ship <b>worldwide</b>.</p><h2>Returns</h2>"
        );
        assert_eq!(result.fixes_applied, vec!["Converted 2 bold paragraphs to headings"]);
    }

    #[test]
    fn test_long_bold_paragraph_is_kept() {
        let long = "x".repeat(121);
        let html = format!("<p><strong>{}</strong></p>", long);
        let result = Remediator::new().remediate(&html);
        assert_eq!(result.fix_count, 0);
        assert_eq!(result.content, html);
    }

    #[test]
    fn test_two_bold_children_are_not_promoted() {
        let html = "<p><b>One</b><b>Two</b></p>";
        assert_eq!(Remediator::new().remediate(html).fix_count, 0);
    }

    #[test]
    fn test_fixes_respect_options() {
        let options = RemediationOptions {
            fix_headings: false,
            ..Default::default()
        };
        let result = remediate("<h1>T</h1><h3>S</h3>", options);
        assert_eq!(result.fix_count, 0);
        assert_eq!(result.content, "<h1>T</h1><h3>S</h3>");
    }

    #[test]
    fn test_fixes_run_in_order() {
        let html = "<h1>T</h1><h4>S</h4>\
            <table><tr><td>a</td><td>b</td></tr><tr><td>1</td><td>2</td></tr></table>\
            <p>- x</p><p>- y</p><p>- z</p>\
            <p><b>Notes</b></p>";
        let result = Remediator::new().remediate(html);
        assert_eq!(result.fix_count, 4);
        assert!(result.fixes_applied[0].starts_with("Fixed heading hierarchy"));
        assert!(result.fixes_applied[1].starts_with("Added table header scope"));
        assert!(result.fixes_applied[2].starts_with("Converted 1 pseudo-lists"));
        assert!(result.fixes_applied[3].starts_with("Converted 1 bold"));
    }

    #[test]
    fn test_compliant_input_is_untouched() {
        let html = r#"<h1>Title</h1><h2>Section</h2><ul><li>a</li></ul>"#;
        let result = Remediator::new().remediate(html);
        assert_eq!(result.fix_count, 0);
        assert_eq!(result.content, html);
    }

    #[test]
    fn test_second_pass_finds_nothing() {
        let html = concat!(
            "<h1>T</h1><h3>S</h3>",
            "<table><tr><td>a</td><td>b</td></tr><tr><td>1</td><td>2</td></tr></table>",
            "<p>- one</p><p>- two</p><p>- three</p>",
            "<p><strong>Notes</strong></p><p>Closing text.</p>",
        );
        let first = Remediator::new().remediate(html);
        assert_eq!(first.fix_count, 4);
        assert!(first.content.contains("<ul><li>one</li><li>two</li><li>three</li></ul>"));
        assert!(first.content.contains("<h2>Notes</h2><p>Closing text.</p>"));

        let second = Remediator::new().remediate(&first.content);
        assert_eq!(second.fix_count, 0);
        assert_eq!(second.content, first.content);
    }

    #[test]
    fn test_full_document_keeps_shell() {
        let html = r#"<!DOCTYPE html><html lang="en"><head><title>x</title></head><body><h1>A</h1><h3>B</h3></body></html>"#;
        let result = Remediator::new().remediate(html);
        assert_eq!(
            result.content,
            r#"<!DOCTYPE html><html lang="en"><head><title>x</title></head><body><h1>A</h1><h2>B</h2></body></html>"#
        );
    }
}
