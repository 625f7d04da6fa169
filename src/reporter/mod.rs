mod csv;
mod html;
mod json;
mod text;

use crate::config::ColorConfig;
use crate::validator::{BatchEntry, ValidationResult};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// WCAG version every report is produced against
pub const WCAG_VERSION: &str = "2.1";
/// Conformance level every report is produced against
pub const CONFORMANCE_LEVEL: &str = "AA";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
    Csv,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Text,
        OutputFormat::Json,
        OutputFormat::Html,
        OutputFormat::Csv,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
            OutputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == lower)
            .ok_or_else(|| ReportError::UnknownFormat(s.to_string()))
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("unknown report format '{0}' (expected text, json, html or csv)")]
    UnknownFormat(String),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render a single validation result
pub fn generate_report(
    result: &ValidationResult,
    title: &str,
    format: OutputFormat,
) -> Result<String, ReportError> {
    Reporter::new(format).format(result, title)
}

/// Render several titled results as one report
pub fn generate_batch_report(
    entries: &[BatchEntry],
    format: OutputFormat,
) -> Result<String, ReportError> {
    Reporter::new(format).format_batch(entries)
}

/// Formats validation results, carrying the terminal colors used by the text format
pub struct Reporter {
    format: OutputFormat,
    colors: ColorConfig,
}

impl Reporter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colors: ColorConfig::default(),
        }
    }

    pub fn with_colors(format: OutputFormat, colors: ColorConfig) -> Self {
        Self { format, colors }
    }

    pub fn format_kind(&self) -> OutputFormat {
        self.format
    }

    pub fn format(&self, result: &ValidationResult, title: &str) -> Result<String, ReportError> {
        match self.format {
            OutputFormat::Text => Ok(text::format(result, title, &self.colors)),
            OutputFormat::Json => json::format(result, title),
            OutputFormat::Html => Ok(html::format(result, title)),
            OutputFormat::Csv => Ok(csv::format(result)),
        }
    }

    pub fn format_batch(&self, entries: &[BatchEntry]) -> Result<String, ReportError> {
        match self.format {
            OutputFormat::Text => Ok(text::format_batch(entries, &self.colors)),
            OutputFormat::Json => json::format_batch(entries),
            OutputFormat::Html => Ok(html::format_batch(entries)),
            OutputFormat::Csv => Ok(csv::format_batch(entries)),
        }
    }

    /// Print a single result to stdout
    pub fn report(&self, result: &ValidationResult, title: &str) -> Result<(), ReportError> {
        let output = self.format(result, title)?;
        print!("{}", output);
        Ok(())
    }
}

/// Aggregate counts over a batch
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub(crate) struct Totals {
    pub documents: usize,
    pub valid: usize,
    pub invalid: usize,
    pub average_score: f64,
    pub errors: usize,
    pub warnings: usize,
}

impl Totals {
    pub(crate) fn from_entries(entries: &[BatchEntry]) -> Self {
        let documents = entries.len();
        let valid = entries.iter().filter(|e| e.result.valid).count();
        let score_sum: u32 = entries.iter().map(|e| e.result.score).sum();
        let average_score = if documents == 0 {
            0.0
        } else {
            (f64::from(score_sum) / documents as f64 * 100.0).round() / 100.0
        };

        Self {
            documents,
            valid,
            invalid: documents - valid,
            average_score,
            errors: entries.iter().map(|e| e.result.errors.len()).sum(),
            warnings: entries.iter().map(|e| e.result.warnings.len()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::validate;
    use wcag_lint_common::ValidationOptions;

    fn entry(title: &str, html: &str) -> BatchEntry {
        BatchEntry {
            title: title.to_string(),
            result: validate(html, ValidationOptions::default()),
        }
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("HTML".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert_eq!(" csv ".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert!(matches!(
            "xml".parse::<OutputFormat>(),
            Err(ReportError::UnknownFormat(name)) if name == "xml"
        ));
    }

    #[test]
    fn test_output_format_display_round_trip() {
        for format in OutputFormat::ALL {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
        }
    }

    #[test]
    fn test_totals() {
        let entries = vec![
            entry("ok", r#"<html lang="en"><body><h1>Title</h1><p>Text</p></body></html>"#),
            entry("bad", r#"<h1>T</h1><img src="a.png"><img src="b.png">"#),
        ];
        let totals = Totals::from_entries(&entries);
        assert_eq!(totals.documents, 2);
        assert_eq!(totals.valid, 1);
        assert_eq!(totals.invalid, 1);
        assert_eq!(totals.errors, 2);
        let expected =
            f64::from(entries[0].result.score + entries[1].result.score) / 2.0;
        assert!((totals.average_score - expected).abs() < 0.01);
    }

    #[test]
    fn test_totals_empty_batch() {
        let totals = Totals::from_entries(&[]);
        assert_eq!(totals.documents, 0);
        assert_eq!(totals.average_score, 0.0);
    }
}
