//! Explicit per-call options for validation and remediation.
//!
//! These structs are the only configuration the checkers, validator and
//! remediator read. Both deserialize from the flat key/value bag callers
//! already use (`{"check_contrast": false, "strict_mode": true}`); missing
//! keys take their defaults and unknown keys are ignored.

use serde::{Deserialize, Serialize};

/// Minimum score for a document to be valid in standard mode
pub const STANDARD_THRESHOLD: u32 = 70;

/// Minimum score for a document to be valid in strict mode
pub const STRICT_THRESHOLD: u32 = 95;

/// Checker identifiers in the order the validator runs them
pub const CHECK_NAMES: &[&str] = &[
    "contrast", "headings", "images", "links", "lists", "tables", "language",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationOptions {
    pub check_contrast: bool,
    pub check_headings: bool,
    pub check_images: bool,
    pub check_links: bool,
    pub check_lists: bool,
    pub check_tables: bool,
    pub check_language: bool,
    pub strict_mode: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            check_contrast: true,
            check_headings: true,
            check_images: true,
            check_links: true,
            check_lists: true,
            check_tables: true,
            check_language: true,
            strict_mode: false,
        }
    }
}

impl ValidationOptions {
    /// Whether the checker with the given identifier should run.
    ///
    /// Unknown identifiers are treated as enabled.
    pub fn is_enabled(&self, check: &str) -> bool {
        match check {
            "contrast" => self.check_contrast,
            "headings" => self.check_headings,
            "images" => self.check_images,
            "links" => self.check_links,
            "lists" => self.check_lists,
            "tables" => self.check_tables,
            "language" => self.check_language,
            _ => true,
        }
    }

    /// Enable or disable a checker by identifier.
    ///
    /// Returns `false` if the identifier is unknown.
    pub fn set_enabled(&mut self, check: &str, enabled: bool) -> bool {
        let flag = match check {
            "contrast" => &mut self.check_contrast,
            "headings" => &mut self.check_headings,
            "images" => &mut self.check_images,
            "links" => &mut self.check_links,
            "lists" => &mut self.check_lists,
            "tables" => &mut self.check_tables,
            "language" => &mut self.check_language,
            _ => return false,
        };
        *flag = enabled;
        true
    }

    /// Score a document must reach to be valid
    pub fn threshold(&self) -> u32 {
        if self.strict_mode {
            STRICT_THRESHOLD
        } else {
            STANDARD_THRESHOLD
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemediationOptions {
    /// Renumber headings so no level is skipped
    pub fix_headings: bool,
    /// Add header cells and `scope` attributes to data tables
    pub fix_tables: bool,
    /// Convert runs of marker paragraphs into `<ul>`/`<ol>`
    pub fix_lists: bool,
    /// Promote paragraphs that are only bold text to `<h2>`
    pub fix_bold_headings: bool,
}

impl Default for RemediationOptions {
    fn default() -> Self {
        Self {
            fix_headings: true,
            fix_tables: true,
            fix_lists: true,
            fix_bold_headings: true,
        }
    }
}
