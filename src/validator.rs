//! Runs the enabled checkers over a document and scores the result.
//!
//! Scoring starts at 100. Every error subtracts a penalty that depends on its
//! WCAG criterion (see [`criterion_penalty`]) and every warning subtracts 1.
//! The score is clamped to `0..=100`. A document is valid when it has no
//! errors and its score reaches the threshold of the selected mode (70
//! standard, 95 strict).

use crate::checkers::default_checkers;
use serde::Serialize;
use wcag_lint_common::{
    Checker, Document, Issue, Severity, ValidationOptions, parse_string,
};

/// Score deduction for a warning, regardless of criterion
pub const WARNING_PENALTY: u32 = 1;

/// Score deduction for an error against the given criterion
pub fn criterion_penalty(criterion: &str) -> u32 {
    match criterion {
        "1.1.1" => 5,
        "2.4.10" => 5,
        "1.3.1" | "1.4.3" => 3,
        "2.4.4" | "2.4.6" | "4.1.1" => 2,
        c if c.starts_with("3.1.") => 2,
        _ => 3,
    }
}

/// Compute the 0-100 compliance score for a set of issues
pub fn compute_score(errors: &[Issue], warnings: &[Issue]) -> u32 {
    let error_penalty: i64 = errors
        .iter()
        .map(|e| i64::from(criterion_penalty(&e.criterion)))
        .sum();
    let warning_penalty = warnings.len() as i64 * i64::from(WARNING_PENALTY);
    (100 - error_penalty - warning_penalty).clamp(0, 100) as u32
}

/// Issue counts for one WCAG criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CriterionSummary {
    pub criterion: String,
    pub error_count: usize,
    pub warning_count: usize,
}

/// A distinct suggestion, tagged with the first issue that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemediationAction {
    pub criterion: String,
    pub severity: Severity,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub score: u32,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub summary: Vec<CriterionSummary>,
    pub remediation_actions: Vec<RemediationAction>,
}

impl ValidationResult {
    /// Build a result from collected issues, scoring against `threshold`
    pub fn from_issues(errors: Vec<Issue>, warnings: Vec<Issue>, threshold: u32) -> Self {
        let score = compute_score(&errors, &warnings);
        let valid = errors.is_empty() && score >= threshold;
        let summary = summarize(&errors, &warnings);
        let remediation_actions = remediation_actions(&errors, &warnings);

        Self {
            valid,
            score,
            errors,
            warnings,
            summary,
            remediation_actions,
        }
    }

    pub fn has_issues(&self) -> bool {
        !self.errors.is_empty() || !self.warnings.is_empty()
    }

    /// Errors followed by warnings
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.errors.iter().chain(self.warnings.iter())
    }
}

/// Per-criterion counts, in the order each criterion is first seen
fn summarize(errors: &[Issue], warnings: &[Issue]) -> Vec<CriterionSummary> {
    let mut summary: Vec<CriterionSummary> = Vec::new();

    for issue in errors.iter().chain(warnings) {
        let entry = match summary.iter().position(|s| s.criterion == issue.criterion) {
            Some(pos) => &mut summary[pos],
            None => {
                summary.push(CriterionSummary {
                    criterion: issue.criterion.clone(),
                    error_count: 0,
                    warning_count: 0,
                });
                let last = summary.len() - 1;
                &mut summary[last]
            }
        };
        match issue.severity {
            Severity::Error => entry.error_count += 1,
            Severity::Warning => entry.warning_count += 1,
        }
    }

    summary
}

/// Distinct non-empty suggestions, first occurrence wins
fn remediation_actions(errors: &[Issue], warnings: &[Issue]) -> Vec<RemediationAction> {
    let mut actions: Vec<RemediationAction> = Vec::new();

    for issue in errors.iter().chain(warnings) {
        if issue.suggestion.is_empty() || actions.iter().any(|a| a.action == issue.suggestion) {
            continue;
        }
        actions.push(RemediationAction {
            criterion: issue.criterion.clone(),
            severity: issue.severity,
            action: issue.suggestion.clone(),
        });
    }

    actions
}

/// Holds the enabled checkers and runs them against documents
pub struct Validator {
    checkers: Vec<Box<dyn Checker>>,
    options: ValidationOptions,
}

impl Validator {
    pub fn new() -> Self {
        Self::with_options(ValidationOptions::default())
    }

    /// Create a validator running every checker whose `check_<name>` option is set
    pub fn with_options(options: ValidationOptions) -> Self {
        let checkers = default_checkers()
            .into_iter()
            .filter(|checker| options.is_enabled(checker.name()))
            .collect();
        Self { checkers, options }
    }

    pub fn add_checker(&mut self, checker: Box<dyn Checker>) {
        self.checkers.push(checker);
    }

    /// Get a reference to all enabled checkers
    pub fn checkers(&self) -> &[Box<dyn Checker>] {
        &self.checkers
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    /// Parse and validate an HTML document or fragment
    pub fn validate(&self, html: &str) -> ValidationResult {
        let doc = parse_string(html);
        self.validate_document(&doc)
    }

    /// Validate an already parsed document
    pub fn validate_document(&self, doc: &Document) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for checker in &self.checkers {
            let result = checker.check(doc);
            tracing::debug!(
                checker = checker.name(),
                errors = result.errors.len(),
                warnings = result.warnings.len(),
                "checker finished"
            );
            errors.extend(result.errors);
            warnings.extend(result.warnings);
        }

        let result = ValidationResult::from_issues(errors, warnings, self.options.threshold());
        tracing::debug!(
            score = result.score,
            valid = result.valid,
            strict = self.options.strict_mode,
            "validation finished"
        );
        result
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate an HTML string with the given options
pub fn validate(html: &str, options: ValidationOptions) -> ValidationResult {
    Validator::with_options(options).validate(html)
}

/// A titled validation result, one per document of a batch report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchEntry {
    pub title: String,
    pub result: ValidationResult,
}

/// Validate several `(title, html)` documents, preserving input order
#[cfg(feature = "cli")]
pub fn validate_batch(documents: &[(String, String)], options: ValidationOptions) -> Vec<BatchEntry> {
    use rayon::prelude::*;

    let validator = Validator::with_options(options);
    documents
        .par_iter()
        .map(|(title, html)| BatchEntry {
            title: title.clone(),
            result: validator.validate(html),
        })
        .collect()
}

/// Validate several `(title, html)` documents, preserving input order
#[cfg(not(feature = "cli"))]
pub fn validate_batch(documents: &[(String, String)], options: ValidationOptions) -> Vec<BatchEntry> {
    let validator = Validator::with_options(options);
    documents
        .iter()
        .map(|(title, html)| BatchEntry {
            title: title.clone(),
            result: validator.validate(html),
        })
        .collect()
}
