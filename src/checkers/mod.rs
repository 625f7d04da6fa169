//! The seven WCAG checkers.
//!
//! Each checker is a unit struct implementing [`Checker`] plus a `DOC`
//! static used by `wcag-lint why`. Checkers that have a matching automatic
//! fix expose it as a free function next to the checker (`fix_hierarchy`,
//! `add_scope_attributes`, `convert_pseudo_lists`) so the remediator and the
//! checker share the same classification logic.

pub mod contrast;
pub mod headings;
pub mod images;
pub mod language;
pub mod links;
pub mod lists;
pub mod tables;

pub use contrast::ColorContrastChecker;
pub use headings::HeadingHierarchyAnalyzer;
pub use images::AltTextRequirementChecker;
pub use language::LanguageChecker;
pub use links::LinkTextChecker;
pub use lists::ListMarkupChecker;
pub use tables::TableAccessibilityChecker;

use wcag_lint_common::{Checker, Document, NodeId};

/// All checkers in the order the validator runs them
pub fn default_checkers() -> Vec<Box<dyn Checker>> {
    vec![
        Box::new(ColorContrastChecker),
        Box::new(HeadingHierarchyAnalyzer),
        Box::new(AltTextRequirementChecker),
        Box::new(LinkTextChecker),
        Box::new(ListMarkupChecker),
        Box::new(TableAccessibilityChecker),
        Box::new(LanguageChecker),
    ]
}

/// Text content of a node with runs of whitespace collapsed and trimmed
pub(crate) fn normalized_text(doc: &Document, id: NodeId) -> String {
    doc.text_content(id)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// First `max` characters of `text`
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
