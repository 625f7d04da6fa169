use super::{normalized_text, truncate_chars};
use crate::docs::CheckerDoc;
use regex::Regex;
use std::sync::LazyLock;
use wcag_lint_common::{CheckResult, Checker, Document, Issue, NodeId};

/// Checker documentation
pub static DOC: CheckerDoc = CheckerDoc {
    name: "lists",
    criteria: &["1.3.1"],
    description: "Detects runs of paragraphs that imitate a list with typed markers",
    severity: "warning",
    why: r#"Paragraphs that start with "-", "*" or "1." look like a list but
are not announced as one. Screen reader users do not hear how many items the
list has or where it ends, and cannot skip over it.

Three or more consecutive marker paragraphs are reported; use <ul> or <ol>
with <li> items instead."#,
    bad_example: include_str!("lists/bad.html"),
    good_example: include_str!("lists/good.html"),
    references: &["https://www.w3.org/WAI/WCAG21/Understanding/info-and-relationships.html"],
};

/// Minimum number of consecutive marker paragraphs reported as a list
pub const MIN_PSEUDO_LIST_ITEMS: usize = 3;

const SNIPPET_LEN: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListType {
    Ordered,
    Unordered,
}

impl ListType {
    pub fn as_str(self) -> &'static str {
        match self {
            ListType::Ordered => "ordered",
            ListType::Unordered => "unordered",
        }
    }

    /// Tag name of the semantic list element
    pub fn tag(self) -> &'static str {
        match self {
            ListType::Ordered => "ol",
            ListType::Unordered => "ul",
        }
    }
}

struct MarkerPattern {
    regex: Regex,
    list_type: ListType,
}

/// Leading-marker patterns, tried in order; the first match wins
static MARKER_PATTERNS: LazyLock<Vec<MarkerPattern>> = LazyLock::new(|| {
    [
        (r"^\s*[-–—•●○]\s+", ListType::Unordered),
        (r"^\s*\*\s+", ListType::Unordered),
        (r"^\s*--\s+", ListType::Unordered),
        (r"^\s*\d+[.)]\s+", ListType::Ordered),
        (r"^\s*[a-z][.)]\s+", ListType::Ordered),
    ]
    .into_iter()
    .map(|(pattern, list_type)| MarkerPattern {
        regex: Regex::new(pattern).expect("valid list marker regex"),
        list_type,
    })
    .collect()
});

/// A paragraph whose text starts with a list marker
#[derive(Debug, Clone)]
pub struct MarkerParagraph {
    pub id: NodeId,
    pub list_type: ListType,
    /// Text with the matched marker stripped
    pub item_text: String,
}

/// Classify a paragraph's text by its leading marker
pub fn match_marker(text: &str) -> Option<(ListType, String)> {
    MARKER_PATTERNS.iter().find_map(|pattern| {
        pattern.regex.find(text).map(|m| {
            (
                pattern.list_type,
                text[m.end()..].trim().to_string(),
            )
        })
    })
}

/// Every `<p>` in document order, `Some` when it starts with a marker
fn classify_paragraphs(doc: &Document) -> Vec<Option<MarkerParagraph>> {
    doc.elements_by_tag("p")
        .into_iter()
        .map(|id| {
            let text = normalized_text(doc, id);
            match_marker(&text).map(|(list_type, item_text)| MarkerParagraph {
                id,
                list_type,
                item_text,
            })
        })
        .collect()
}

/// Group consecutive marker paragraphs.
///
/// A non-marker paragraph always ends a group. With `split_on_change`, a
/// change of list type or parent element ends it too.
fn group_paragraphs(
    doc: &Document,
    paragraphs: Vec<Option<MarkerParagraph>>,
    split_on_change: bool,
) -> Vec<Vec<MarkerParagraph>> {
    let mut groups = Vec::new();
    let mut current: Vec<MarkerParagraph> = Vec::new();

    for marker in paragraphs {
        let Some(marker) = marker else {
            if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
            continue;
        };

        if split_on_change {
            if let Some(last) = current.last() {
                if last.list_type != marker.list_type || doc.parent(last.id) != doc.parent(marker.id) {
                    groups.push(std::mem::take(&mut current));
                }
            }
        }
        current.push(marker);
    }
    if !current.is_empty() {
        groups.push(current);
    }

    groups.retain(|group| group.len() >= MIN_PSEUDO_LIST_ITEMS);
    groups
}

/// Check for paragraphs imitating lists (WCAG 1.3.1)
pub struct ListMarkupChecker;

impl Checker for ListMarkupChecker {
    fn name(&self) -> &'static str {
        "lists"
    }

    fn criteria(&self) -> &'static [&'static str] {
        DOC.criteria
    }

    fn description(&self) -> &'static str {
        DOC.description
    }

    fn check(&self, doc: &Document) -> CheckResult {
        let mut result = CheckResult::new();

        for group in group_paragraphs(doc, classify_paragraphs(doc), false) {
            let first = &group[0];
            let list_type = first.list_type;
            result.push(
                Issue::warning(
                    "1.3.1",
                    &format!(
                        "{} consecutive paragraphs look like an {} list",
                        group.len(),
                        list_type.as_str()
                    ),
                )
                .with_element(&truncate_chars(&doc.outer_html(first.id), SNIPPET_LEN))
                .with_suggestion(&format!(
                    "Use <{}> with <li> items instead of paragraphs with typed markers",
                    list_type.tag()
                ))
                .with_extra("pseudo_list_count", group.len())
                .with_extra("list_type", list_type.as_str()),
            );
        }

        result
    }
}

/// Replace runs of marker paragraphs with `<ul>`/`<ol>` lists.
///
/// Only runs of at least three paragraphs with the same list type and the
/// same parent are converted. Each paragraph becomes an `<li>` holding its
/// text without the marker. Returns the number of lists created.
pub fn convert_pseudo_lists(doc: &mut Document) -> usize {
    let groups = group_paragraphs(doc, classify_paragraphs(doc), true);
    let count = groups.len();

    for group in groups {
        let list_type = group[0].list_type;
        let list = doc.create_element(list_type.tag());
        doc.insert_before(group[0].id, list);

        for item in group {
            let li = doc.create_element("li");
            let text = doc.create_text(&item.item_text);
            doc.append_child(li, text);
            doc.append_child(list, li);
            doc.detach(item.id);
        }
        tracing::debug!(list = list_type.tag(), "converted pseudo-list");
    }

    count
}
