use super::{normalized_text, truncate_chars};
use crate::docs::CheckerDoc;
use wcag_lint_common::{CheckResult, Checker, Document, Issue, NodeId};

/// Checker documentation
pub static DOC: CheckerDoc = CheckerDoc {
    name: "tables",
    criteria: &["1.3.1"],
    description: "Detects data tables without header cells, scope attributes or captions",
    severity: "error",
    why: r#"Screen readers announce the matching row and column headers when
moving through a data table. That only works when header cells are marked up
with <th> and their direction is given with scope="col" or scope="row". A
<caption> tells the user what the table is about before entering it.

Tables used purely for layout (role="presentation", or a single cell) are
skipped."#,
    bad_example: include_str!("tables/bad.html"),
    good_example: include_str!("tables/good.html"),
    references: &[
        "https://www.w3.org/WAI/WCAG21/Understanding/info-and-relationships.html",
        "https://www.w3.org/WAI/tutorials/tables/",
    ],
};

const HEADER_SNIPPET_LEN: usize = 30;

/// Descendants of `table` with the given tag that are not inside a nested table
fn own_descendants(doc: &Document, table: NodeId, tag: &str) -> Vec<NodeId> {
    doc.find_descendants(table, tag)
        .into_iter()
        .filter(|&id| doc.ancestors(id).find(|&a| doc.is_tag(a, "table")) == Some(table))
        .collect()
}

/// Rows of a table, excluding rows of nested tables
pub fn table_rows(doc: &Document, table: NodeId) -> Vec<NodeId> {
    own_descendants(doc, table, "tr")
}

/// `<td>` and `<th>` children of a row
pub fn row_cells(doc: &Document, row: NodeId) -> Vec<NodeId> {
    doc.element_children(row)
        .filter(|&cell| doc.is_tag(cell, "td") || doc.is_tag(cell, "th"))
        .collect()
}

/// Whether a table is used for layout rather than data.
///
/// An explicit presentation role means layout; a caption, a `summary`
/// attribute or any header cell means data; a single row holding a single
/// cell means layout; everything else is data.
pub fn is_layout_table(doc: &Document, table: NodeId) -> bool {
    if doc
        .attr(table, "role")
        .is_some_and(|r| matches!(r.trim().to_ascii_lowercase().as_str(), "presentation" | "none"))
    {
        return true;
    }

    if !own_descendants(doc, table, "caption").is_empty() || doc.attr(table, "summary").is_some() {
        return false;
    }

    if !own_descendants(doc, table, "th").is_empty() {
        return false;
    }

    let rows = table_rows(doc, table);
    rows.len() == 1 && row_cells(doc, rows[0]).len() == 1
}

/// Check data table markup (WCAG 1.3.1)
pub struct TableAccessibilityChecker;

impl Checker for TableAccessibilityChecker {
    fn name(&self) -> &'static str {
        "tables"
    }

    fn criteria(&self) -> &'static [&'static str] {
        DOC.criteria
    }

    fn description(&self) -> &'static str {
        DOC.description
    }

    fn check(&self, doc: &Document) -> CheckResult {
        let mut result = CheckResult::new();

        for (index, table) in doc.elements_by_tag("table").into_iter().enumerate() {
            if is_layout_table(doc, table) {
                tracing::trace!(table_index = index, "skipping layout table");
                continue;
            }

            let headers = own_descendants(doc, table, "th");
            if headers.is_empty() {
                result.push(
                    Issue::error("1.3.1", "Data table has no header cells")
                        .with_node(doc, table)
                        .with_suggestion("Mark up the header row or column with <th> elements")
                        .with_extra("table_index", index),
                );
            }

            for th in headers {
                if doc.attr(th, "scope").is_some_and(|s| !s.trim().is_empty()) {
                    continue;
                }
                let text = truncate_chars(&normalized_text(doc, th), HEADER_SNIPPET_LEN);
                result.push(
                    Issue::error(
                        "1.3.1",
                        &format!("Table header \"{}\" is missing a scope attribute", text),
                    )
                    .with_node(doc, th)
                    .with_suggestion("Add scope=\"col\" or scope=\"row\" to the header cell")
                    .with_extra("table_index", index),
                );
            }

            if own_descendants(doc, table, "caption").is_empty() {
                result.push(
                    Issue::warning("1.3.1", "Data table has no caption")
                        .with_node(doc, table)
                        .with_suggestion("Add a <caption> describing the table's contents")
                        .with_extra("table_index", index),
                );
            }
        }

        result
    }
}

/// Add header cells and `scope` attributes to data tables.
///
/// Tables without any `<th>` get their first row promoted to
/// `<th scope="col">`. In tables that already have headers, each `<th>`
/// without a scope gets `col` when it is in the first row, `row` when it
/// starts its row, and `col` otherwise. Layout tables are left alone.
/// Returns the number of cells changed.
pub fn add_scope_attributes(doc: &mut Document) -> usize {
    let mut changed = 0;

    for table in doc.elements_by_tag("table") {
        if is_layout_table(doc, table) {
            continue;
        }

        let rows = table_rows(doc, table);
        let headers = own_descendants(doc, table, "th");

        if headers.is_empty() {
            let Some(&first_row) = rows.first() else {
                continue;
            };
            for cell in row_cells(doc, first_row) {
                if doc.rename(cell, "th") {
                    doc.set_attr(cell, "scope", "col");
                    changed += 1;
                }
            }
            continue;
        }

        for th in headers {
            if doc.attr(th, "scope").is_some_and(|s| !s.trim().is_empty()) {
                continue;
            }
            let row = doc.parent(th).filter(|&p| doc.is_tag(p, "tr"));
            let in_first_row = row.is_some() && row == rows.first().copied();
            let starts_row = row.is_some_and(|r| row_cells(doc, r).first() == Some(&th));

            let scope = if in_first_row {
                "col"
            } else if starts_row {
                "row"
            } else {
                "col"
            };
            doc.set_attr(th, "scope", scope);
            changed += 1;
        }
    }

    if changed > 0 {
        tracing::debug!(cells = changed, "added table header scopes");
    }
    changed
}
