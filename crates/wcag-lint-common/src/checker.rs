use crate::parser::{Document, NodeId};
use serde::Serialize;
use std::collections::BTreeMap;

/// Maximum length (in characters) of [`Issue::element`]
pub const MAX_ELEMENT_LEN: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single accessibility finding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    /// WCAG success criterion, e.g. `"1.1.1"`
    pub criterion: String,
    pub severity: Severity,
    /// Outer HTML of the offending element, at most [`MAX_ELEMENT_LEN`] characters
    pub element: String,
    pub description: String,
    pub suggestion: String,
    /// Checker-specific details (`table_index`, `contrast_ratio`, ...)
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Issue {
    pub fn new(criterion: &str, severity: Severity, description: &str) -> Self {
        Self {
            criterion: criterion.to_string(),
            severity,
            element: String::new(),
            description: description.to_string(),
            suggestion: String::new(),
            extra: BTreeMap::new(),
        }
    }

    pub fn error(criterion: &str, description: &str) -> Self {
        Self::new(criterion, Severity::Error, description)
    }

    pub fn warning(criterion: &str, description: &str) -> Self {
        Self::new(criterion, Severity::Warning, description)
    }

    /// Attach the serialized element, truncated to [`MAX_ELEMENT_LEN`]
    pub fn with_element(mut self, html: &str) -> Self {
        self.element = truncate_with_ellipsis(html, MAX_ELEMENT_LEN);
        self
    }

    /// Attach the outer HTML of a node in `doc`
    pub fn with_node(self, doc: &Document, id: NodeId) -> Self {
        let html = element_snippet(doc, id);
        self.with_element(&html)
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestion = suggestion.to_string();
        self
    }

    pub fn with_extra(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Outer HTML of a node truncated to [`MAX_ELEMENT_LEN`] characters
pub fn element_snippet(doc: &Document, id: NodeId) -> String {
    truncate_with_ellipsis(&doc.outer_html(id), MAX_ELEMENT_LEN)
}

fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(3)).collect();
    out.push_str("...");
    out
}

/// Errors and warnings produced by a single checker run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CheckResult {
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route an issue to `errors` or `warnings` by its severity
    pub fn push(&mut self, issue: Issue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
        }
    }

    pub fn extend(&mut self, other: CheckResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }

    /// Total number of issues
    pub fn len(&self) -> usize {
        self.errors.len() + self.warnings.len()
    }
}

/// A WCAG checker run over a parsed document.
///
/// Checkers are stateless and never mutate the tree; anything they cannot
/// assess (an unparseable color, a missing font size) is skipped silently.
pub trait Checker: Send + Sync {
    /// Stable identifier used by `check_<name>` options (e.g. `"images"`)
    fn name(&self) -> &'static str;
    /// WCAG success criteria this checker reports on
    fn criteria(&self) -> &'static [&'static str];
    fn description(&self) -> &'static str;
    fn check(&self, doc: &Document) -> CheckResult;
}
