use super::normalized_text;
use crate::docs::CheckerDoc;
use regex::Regex;
use std::sync::LazyLock;
use wcag_lint_common::{CheckResult, Checker, Document, Issue, NodeId};

/// Checker documentation
pub static DOC: CheckerDoc = CheckerDoc {
    name: "headings",
    criteria: &["1.3.1", "2.4.6", "2.4.10"],
    description: "Detects skipped heading levels, missing or duplicate H1 and unhelpful heading text",
    severity: "error",
    why: r#"Screen reader users navigate by headings. A heading outline that
jumps from H1 straight to H3 implies a missing section, a page without an H1
has no obvious title, and headings such as "Introduction" or "Section 2" do
not tell the user what the section is about.

Long documents without any headings cannot be navigated at all."#,
    bad_example: include_str!("headings/bad.html"),
    good_example: include_str!("headings/good.html"),
    references: &[
        "https://www.w3.org/WAI/WCAG21/Understanding/info-and-relationships.html",
        "https://www.w3.org/WAI/WCAG21/Understanding/headings-and-labels.html",
        "https://www.w3.org/WAI/WCAG21/Understanding/section-headings.html",
    ],
};

/// Documents longer than this many words need at least one heading
pub const LONG_CONTENT_WORDS: usize = 500;

static GENERIC_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(introduction|conclusion|overview|summary|untitled|heading|section \d+)$")
        .expect("valid generic heading regex")
});

/// A heading element with its numeric level and trimmed text
#[derive(Debug, Clone)]
pub struct Heading {
    pub id: NodeId,
    pub level: u8,
    pub text: String,
}

/// Level of an `h1`..`h6` element
pub fn heading_level(doc: &Document, id: NodeId) -> Option<u8> {
    let name = doc.tag_name(id)?;
    let level = name.strip_prefix('h')?.parse::<u8>().ok()?;
    (1..=6).contains(&level).then_some(level)
}

/// All headings in document order
pub fn collect_headings(doc: &Document) -> Vec<Heading> {
    doc.descendants(doc.root())
        .filter_map(|id| {
            heading_level(doc, id).map(|level| Heading {
                id,
                level,
                text: normalized_text(doc, id),
            })
        })
        .collect()
}

fn word_count(doc: &Document) -> usize {
    let scope = doc.body().unwrap_or(doc.root());
    doc.visible_text(scope).split_whitespace().count()
}

/// Check heading structure (WCAG 1.3.1, 2.4.6, 2.4.10)
pub struct HeadingHierarchyAnalyzer;

impl Checker for HeadingHierarchyAnalyzer {
    fn name(&self) -> &'static str {
        "headings"
    }

    fn criteria(&self) -> &'static [&'static str] {
        DOC.criteria
    }

    fn description(&self) -> &'static str {
        DOC.description
    }

    fn check(&self, doc: &Document) -> CheckResult {
        let mut result = CheckResult::new();
        let headings = collect_headings(doc);

        if headings.is_empty() {
            let words = word_count(doc);
            if words > LONG_CONTENT_WORDS {
                result.push(
                    Issue::error(
                        "2.4.10",
                        &format!(
                            "Long content ({} words) needs headings to organize it into sections",
                            words
                        ),
                    )
                    .with_suggestion("Add headings that describe each section of the content")
                    .with_extra("word_count", words),
                );
            }
        }

        let h1_count = headings.iter().filter(|h| h.level == 1).count();
        if h1_count == 0 {
            result.push(
                Issue::warning("2.4.6", "Document has no H1 heading")
                    .with_suggestion("Add a single H1 heading describing the page"),
            );
        } else if h1_count > 1 {
            result.push(
                Issue::warning(
                    "2.4.6",
                    &format!("Document has {} H1 headings", h1_count),
                )
                .with_suggestion("Use a single H1 for the page title and H2-H6 for sections")
                .with_extra("h1_count", h1_count),
            );
        }

        let mut previous: Option<u8> = None;
        for heading in &headings {
            if heading.text.is_empty() {
                result.push(
                    Issue::error("2.4.6", &format!("H{} heading is empty", heading.level))
                        .with_node(doc, heading.id)
                        .with_suggestion("Add descriptive text to the heading or remove it"),
                );
            }

            // compared against the literal previous level, not a corrected one
            if let Some(prev) = previous {
                if heading.level > prev + 1 {
                    result.push(
                        Issue::error(
                            "1.3.1",
                            &format!(
                                "Heading level skipped from H{} to H{}",
                                prev, heading.level
                            ),
                        )
                        .with_node(doc, heading.id)
                        .with_suggestion(&format!("Change this heading to H{}", prev + 1))
                        .with_extra("from_level", prev)
                        .with_extra("to_level", heading.level),
                    );
                }
            }

            if GENERIC_HEADING.is_match(&heading.text) {
                result.push(
                    Issue::warning(
                        "2.4.6",
                        &format!("Heading text \"{}\" is too generic", heading.text),
                    )
                    .with_node(doc, heading.id)
                    .with_suggestion("Use heading text that describes the section's topic"),
                );
            }

            previous = Some(heading.level);
        }

        result
    }
}

/// Renumber headings so that no heading is more than one level deeper than
/// the (corrected) heading before it.
///
/// The first heading keeps its level. Only the tag name of changed headings
/// is rewritten; attributes and children are preserved. Returns the number
/// of headings renumbered.
pub fn fix_hierarchy(doc: &mut Document) -> usize {
    let headings = collect_headings(doc);
    let mut previous: Option<u8> = None;
    let mut changed = 0;

    for heading in headings {
        let corrected = match previous {
            None => heading.level,
            Some(prev) if heading.level <= prev => heading.level,
            Some(prev) => (prev + 1).min(6),
        };

        if corrected != heading.level && doc.rename(heading.id, &format!("h{}", corrected)) {
            tracing::debug!(from = heading.level, to = corrected, "renumbered heading");
            changed += 1;
        }
        previous = Some(corrected);
    }

    changed
}
