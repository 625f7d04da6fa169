use crate::docs::CheckerDoc;
use regex::Regex;
use std::sync::LazyLock;
use wcag_lint_common::{CheckResult, Checker, Document, Issue, NodeId};

/// Checker documentation
pub static DOC: CheckerDoc = CheckerDoc {
    name: "images",
    criteria: &["1.1.1"],
    description: "Detects images without alt text or with file names as alt text",
    severity: "error",
    why: r#"Screen readers announce an image by its alt text. Without an alt
attribute many screen readers read out the file name instead, and an alt text
such as "IMG_0042.jpg" is no better.

Purely decorative images should have an empty alt attribute together with
role="presentation" or aria-hidden="true" so they are skipped."#,
    bad_example: include_str!("images/bad.html"),
    good_example: include_str!("images/good.html"),
    references: &["https://www.w3.org/WAI/WCAG21/Understanding/non-text-content.html"],
};

static FILENAME_ALT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(IMG_|DSC_|DCIM_|Photo_|Screenshot_|image)?\w*\.(jpe?g|png|gif|tiff?|webp|bmp|svg)$")
        .expect("valid file name regex")
});

fn is_decorative(doc: &Document, img: NodeId) -> bool {
    doc.attr(img, "role")
        .is_some_and(|r| r.trim().eq_ignore_ascii_case("presentation") || r.trim().eq_ignore_ascii_case("none"))
        || doc
            .attr(img, "aria-hidden")
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

/// Check that every image has meaningful alternative text (WCAG 1.1.1)
pub struct AltTextRequirementChecker;

impl Checker for AltTextRequirementChecker {
    fn name(&self) -> &'static str {
        "images"
    }

    fn criteria(&self) -> &'static [&'static str] {
        DOC.criteria
    }

    fn description(&self) -> &'static str {
        DOC.description
    }

    fn check(&self, doc: &Document) -> CheckResult {
        let mut result = CheckResult::new();

        for (index, img) in doc.elements_by_tag("img").into_iter().enumerate() {
            let alt = match doc.attr(img, "alt") {
                Some(alt) => alt.trim(),
                None => {
                    result.push(
                        Issue::error("1.1.1", "Image is missing an alt attribute")
                            .with_node(doc, img)
                            .with_suggestion(
                                "Add an alt attribute describing the image, or alt=\"\" with role=\"presentation\" if it is decorative",
                            )
                            .with_extra("image_index", index),
                    );
                    continue;
                }
            };

            if alt.is_empty() {
                if !is_decorative(doc, img) {
                    result.push(
                        Issue::warning(
                            "1.1.1",
                            "Image has empty alt text but is not marked as decorative",
                        )
                        .with_node(doc, img)
                        .with_suggestion(
                            "Describe the image in its alt text, or add role=\"presentation\" if it is decorative",
                        )
                        .with_extra("image_index", index),
                    );
                }
            } else if FILENAME_ALT.is_match(alt) {
                result.push(
                    Issue::error(
                        "1.1.1",
                        &format!("Image alt text \"{}\" looks like a file name", alt),
                    )
                    .with_node(doc, img)
                    .with_suggestion("Replace the file name with a description of the image")
                    .with_extra("image_index", index),
                );
            }
        }

        result
    }
}
