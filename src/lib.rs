//! WCAG 2.1 AA accessibility checking and remediation for HTML content.
//!
//! The engine takes raw HTML (a full document or a content fragment), runs a
//! fixed set of checkers over the parsed tree and returns a scored
//! [`ValidationResult`]. The [`Remediator`] applies deterministic rewrites for
//! a subset of the problems it finds.
//!
//! ```
//! use wcag_lint::{ValidationOptions, validate};
//!
//! let result = validate(r#"<h1>Title</h1><img src="photo.jpg">"#, ValidationOptions::default());
//! assert!(!result.valid);
//! assert_eq!(result.errors[0].criterion, "1.1.1");
//! ```
//!
//! ```
//! use wcag_lint::{RemediationOptions, remediate};
//!
//! let fixed = remediate("<h1>A</h1><h3>B</h3>", RemediationOptions::default());
//! assert_eq!(fixed.content, "<h1>A</h1><h2>B</h2>");
//! assert_eq!(fixed.fix_count, 1);
//! ```
//!
//! Both entry points are total: any string, including `""` or text that is
//! not HTML at all, produces a well-formed result.

pub mod checkers;
pub mod color;
pub mod config;
pub mod docs;
pub mod remediator;
pub mod reporter;
pub mod validator;

pub use config::{Color, ColorConfig, ColorMode, ConfigError, LintConfig, ValidationError};
pub use remediator::{RemediationResult, Remediator, remediate};
pub use reporter::{
    OutputFormat, ReportError, Reporter, generate_batch_report, generate_report,
};
pub use validator::{
    BatchEntry, CriterionSummary, RemediationAction, ValidationResult, Validator, validate,
    validate_batch,
};
pub use wcag_lint_common::{
    CheckResult, Checker, Issue, RemediationOptions, Severity, ValidationOptions,
};
pub use wcag_lint_parser::{Document, NodeId, ParseError, parse_file, parse_string};
