//! Checker documentation types for wcag-lint
//!
//! This module provides type definitions for checker documentation.

/// Documentation for a checker (static version, one per checker module)
pub struct CheckerDoc {
    /// Checker identifier (e.g., "images")
    pub name: &'static str,
    /// WCAG success criteria covered (e.g., ["1.1.1"])
    pub criteria: &'static [&'static str],
    /// Short description
    pub description: &'static str,
    /// Highest severity the checker reports
    pub severity: &'static str,
    /// Why this check exists
    pub why: &'static str,
    /// Example of inaccessible markup
    pub bad_example: &'static str,
    /// Example of accessible markup
    pub good_example: &'static str,
    /// References (URLs, documentation links)
    pub references: &'static [&'static str],
}
