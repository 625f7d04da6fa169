//! Core types shared between the wcag-lint checkers, validator and CLI.
//!
//! # Modules
//!
//! - [`checker`]: [`Checker`] trait, [`Issue`], [`Severity`], [`CheckResult`]
//! - [`options`]: Per-call option structs ([`ValidationOptions`], [`RemediationOptions`])
//! - [`docs`]: Checker documentation ([`CheckerDoc`])
//!
//! # Quick reference
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Checker`] | Trait that every WCAG checker implements |
//! | [`Issue`] | A single finding with criterion, severity, snippet and suggestion |
//! | [`Severity`] | `Error` or `Warning` |
//! | [`CheckResult`] | Errors and warnings produced by one checker run |
//! | [`ValidationOptions`] | Which checks run and whether strict scoring applies |
//! | [`RemediationOptions`] | Which automatic fixes are applied |
//!
//! # Re-exports
//!
//! The [`parser`] module re-exports the entire [`wcag_lint_parser`] crate,
//! giving access to [`parse_string`], [`parse_file`] and the tree types.

pub mod checker;
pub mod docs;
pub mod options;

// Re-export parser crate
pub use wcag_lint_parser as parser;

pub use checker::{CheckResult, Checker, Issue, MAX_ELEMENT_LEN, Severity, element_snippet};
pub use docs::CheckerDoc;
pub use options::{
    CHECK_NAMES, RemediationOptions, STANDARD_THRESHOLD, STRICT_THRESHOLD, ValidationOptions,
};
pub use wcag_lint_parser::{Document, NodeId, parse_file, parse_string};
