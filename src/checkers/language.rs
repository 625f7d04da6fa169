use crate::docs::CheckerDoc;
use wcag_lint_common::{CheckResult, Checker, Document, Issue, NodeId};

/// Checker documentation
pub static DOC: CheckerDoc = CheckerDoc {
    name: "language",
    criteria: &["3.1.1"],
    description: "Detects documents that do not declare their language",
    severity: "warning",
    why: r#"Screen readers pick pronunciation rules from the page language.
Without a lang attribute on <html>, text may be read with the wrong voice
and accent.

HTML fragments are usually embedded in a host page that sets the language;
a fragment without any lang attribute is reported as a reminder."#,
    bad_example: include_str!("language/bad.html"),
    good_example: include_str!("language/good.html"),
    references: &["https://www.w3.org/WAI/WCAG21/Understanding/language-of-page.html"],
};

fn has_lang(doc: &Document, id: NodeId) -> bool {
    ["lang", "xml:lang"]
        .iter()
        .any(|name| doc.attr(id, name).is_some_and(|v| !v.trim().is_empty()))
}

/// Check that the document language is declared (WCAG 3.1.1)
pub struct LanguageChecker;

impl Checker for LanguageChecker {
    fn name(&self) -> &'static str {
        "language"
    }

    fn criteria(&self) -> &'static [&'static str] {
        DOC.criteria
    }

    fn description(&self) -> &'static str {
        DOC.description
    }

    fn check(&self, doc: &Document) -> CheckResult {
        let mut result = CheckResult::new();

        if doc.is_fragment() {
            let fragment_has_lang = doc
                .body()
                .is_some_and(|body| doc.element_children(body).any(|child| has_lang(doc, child)));
            if !fragment_has_lang {
                result.push(
                    Issue::warning("3.1.1", "Content fragment has no language identifier")
                        .with_suggestion(
                            "Make sure the host page sets lang on <html>, or add a lang attribute to the fragment's outer element",
                        ),
                );
            }
            return result;
        }

        if let Some(html) = doc.html_element() {
            if !has_lang(doc, html) {
                result.push(
                    Issue::warning("3.1.1", "Page language is not declared on the <html> element")
                        .with_element("<html>")
                        .with_suggestion("Add a lang attribute, e.g. <html lang=\"en\">"),
                );
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wcag_lint_common::parse_string;

    fn check(html: &str) -> CheckResult {
        LanguageChecker.check(&parse_string(html))
    }

    #[test]
    fn test_document_without_lang() {
        let result = check("<!DOCTYPE html><html><head></head><body><p>x</p></body></html>");
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].criterion, "3.1.1");
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_document_with_lang() {
        assert!(check(r#"<html lang="en"><body></body></html>"#).is_empty());
        assert!(check(r#"<html xml:lang="de"><body></body></html>"#).is_empty());
        assert_eq!(check(r#"<html lang=" "><body></body></html>"#).warnings.len(), 1);
    }

    #[test]
    fn test_fragment_without_lang() {
        let result = check("<p>Hello</p>");
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(
            result.warnings[0].description,
            "Content fragment has no language identifier"
        );
    }

    #[test]
    fn test_fragment_with_lang_on_top_level_element() {
        assert!(check(r#"<div lang="fr"><p>Bonjour</p></div>"#).is_empty());
        // lang deeper in the fragment does not count
        assert_eq!(
            check(r#"<div><p lang="fr">Bonjour</p></div>"#).warnings.len(),
            1
        );
    }

    #[test]
    fn test_doc_examples() {
        assert!(!check(DOC.bad_example).is_empty());
        assert!(check(DOC.good_example).is_empty());
    }
}
