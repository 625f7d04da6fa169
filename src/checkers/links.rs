use super::normalized_text;
use crate::docs::CheckerDoc;
use regex::Regex;
use std::sync::LazyLock;
use wcag_lint_common::{CheckResult, Checker, Document, Issue, NodeId};

/// Checker documentation
pub static DOC: CheckerDoc = CheckerDoc {
    name: "links",
    criteria: &["2.4.4"],
    description: "Detects links without an accessible name or with non-descriptive text",
    severity: "error",
    why: r#"Screen reader users often jump through a list of all links on a
page. Links named "click here" or "read more" are meaningless out of context,
bare URLs are tedious to listen to, and a link without any text or label is
announced only as "link".

Text provided through aria-label or aria-labelledby is trusted as the link's
name."#,
    bad_example: include_str!("links/bad.html"),
    good_example: include_str!("links/good.html"),
    references: &["https://www.w3.org/WAI/WCAG21/Understanding/link-purpose-in-context.html"],
};

/// Link texts that do not describe their destination
pub const GENERIC_LINK_TEXT: &[&str] = &[
    "click here",
    "read more",
    "more",
    "here",
    "link",
    "this",
    "learn more",
    "details",
    "info",
    "continue",
    "go",
];

static BARE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").expect("valid url regex"));

fn has_aria_name(doc: &Document, link: NodeId) -> bool {
    ["aria-label", "aria-labelledby"]
        .iter()
        .any(|name| doc.attr(link, name).is_some_and(|v| !v.trim().is_empty()))
}

fn has_image_name(doc: &Document, link: NodeId) -> bool {
    doc.find_descendants(link, "img")
        .into_iter()
        .any(|img| doc.attr(img, "alt").is_some_and(|alt| !alt.trim().is_empty()))
}

/// Check that links have a descriptive accessible name (WCAG 2.4.4)
pub struct LinkTextChecker;

impl Checker for LinkTextChecker {
    fn name(&self) -> &'static str {
        "links"
    }

    fn criteria(&self) -> &'static [&'static str] {
        DOC.criteria
    }

    fn description(&self) -> &'static str {
        DOC.description
    }

    fn check(&self, doc: &Document) -> CheckResult {
        let mut result = CheckResult::new();

        for (index, link) in doc.elements_by_tag("a").into_iter().enumerate() {
            let text = normalized_text(doc, link);
            let aria = has_aria_name(doc, link);

            if text.is_empty() && !aria && !has_image_name(doc, link) {
                result.push(
                    Issue::error("2.4.4", "Link has no accessible name")
                        .with_node(doc, link)
                        .with_suggestion(
                            "Add link text, an aria-label, or alt text to the image inside the link",
                        )
                        .with_extra("link_index", index),
                );
                continue;
            }

            // an aria label, when it is the only name, is trusted as-is
            if text.is_empty() {
                continue;
            }

            let lowered = text.to_lowercase();
            if GENERIC_LINK_TEXT.contains(&lowered.as_str()) {
                result.push(
                    Issue::warning(
                        "2.4.4",
                        &format!("Link text \"{}\" does not describe its destination", text),
                    )
                    .with_node(doc, link)
                    .with_suggestion("Use link text that describes where the link goes")
                    .with_extra("link_index", index),
                );
            } else if BARE_URL.is_match(&lowered) {
                result.push(
                    Issue::warning("2.4.4", "Link text is a bare URL")
                        .with_node(doc, link)
                        .with_suggestion("Replace the URL with a description of the linked page")
                        .with_extra("link_index", index),
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
        LinkTextChecker.check(&parse_string(html))
    }

    #[test]
    fn test_empty_link_is_error() {
        let result = check(r#"<a href="/x"></a><a href="/y">  </a>"#);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[1].extra["link_index"], 1);
    }

    #[test]
    fn test_image_alt_names_link() {
        assert!(check(r#"<a href="/"><img src="logo.png" alt="Home"></a>"#).is_empty());
        assert_eq!(
            check(r#"<a href="/"><img src="logo.png" alt=""></a>"#).errors.len(),
            1
        );
    }

    #[test]
    fn test_aria_label_is_trusted() {
        assert!(check(r#"<a href="/cart" aria-label="click here"></a>"#).is_empty());
        assert!(check(r#"<a href="/cart" aria-labelledby="cart-label"></a>"#).is_empty());
    }

    #[test]
    fn test_generic_text_is_warning() {
        let result = check(r#"<a href="/a">Click Here</a><a href="/b"> read   more </a><a href="/c">Pricing plans</a>"#);
        assert!(result.errors.is_empty());
        assert_eq!(result.warnings.len(), 2);
        assert!(result.warnings[0].description.contains("Click Here"));
    }

    #[test]
    fn test_visible_text_checked_even_with_aria() {
        let result = check(r#"<a href="/a" aria-label="Pricing">here</a>"#);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_bare_url_is_warning() {
        let result = check(r#"<a href="https://example.com">https://example.com/docs</a>"#);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].description, "Link text is a bare URL");
    }

    #[test]
    fn test_doc_examples() {
        assert!(!check(DOC.bad_example).is_empty());
        assert!(check(DOC.good_example).is_empty());
    }
}
