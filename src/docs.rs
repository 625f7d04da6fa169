//! Checker documentation for wcag-lint
//!
//! This module collects the documentation of every checker, explaining why
//! the check exists and what accessible markup looks like.

pub use wcag_lint_common::docs::CheckerDoc;

/// Get documentation for a checker by name
pub fn get_checker_doc(name: &str) -> Option<&'static CheckerDoc> {
    all_checker_docs().iter().find(|doc| doc.name == name).copied()
}

/// Get all checker documentation, in validation order
pub fn all_checker_docs() -> &'static [&'static CheckerDoc] {
    use crate::checkers::{contrast, headings, images, language, links, lists, tables};

    static DOCS: &[&CheckerDoc] = &[
        &contrast::DOC,
        &headings::DOC,
        &images::DOC,
        &links::DOC,
        &lists::DOC,
        &tables::DOC,
        &language::DOC,
    ];

    DOCS
}

/// Get all checker names
pub fn all_checker_names() -> Vec<&'static str> {
    all_checker_docs().iter().map(|doc| doc.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::default_checkers;

    #[test]
    fn test_get_checker_doc() {
        let doc = get_checker_doc("images");
        assert!(doc.is_some());
        let doc = doc.unwrap();
        assert_eq!(doc.name, "images");
        assert_eq!(doc.criteria, &["1.1.1"]);
    }

    #[test]
    fn test_get_checker_doc_not_found() {
        assert!(get_checker_doc("forms").is_none());
    }

    #[test]
    fn test_docs_match_checkers() {
        let checkers = default_checkers();
        assert_eq!(all_checker_names().len(), checkers.len());
        for checker in &checkers {
            let doc = get_checker_doc(checker.name()).unwrap();
            assert_eq!(doc.criteria, checker.criteria());
            assert_eq!(doc.description, checker.description());
            assert!(!doc.references.is_empty());
        }
    }
}
