use super::Totals;
use crate::config::{Color, ColorConfig};
use crate::validator::{BatchEntry, ValidationResult};
use colored::{ColoredString, Colorize};
use std::fmt::Write;
use wcag_lint_common::Severity;

pub(crate) fn format(result: &ValidationResult, title: &str, colors: &ColorConfig) -> String {
    let mut out = String::new();
    write_issues(&mut out, result, title, colors);

    if result.has_issues() {
        out.push('\n');
        let _ = writeln!(out, "Found {}", counts(result.errors.len(), result.warnings.len()));
    }
    let _ = writeln!(out, "{}", score_line(result));
    out
}

pub(crate) fn format_batch(entries: &[BatchEntry], colors: &ColorConfig) -> String {
    let mut out = String::new();
    for entry in entries {
        write_issues(&mut out, &entry.result, &entry.title, colors);
        let _ = writeln!(out, "{}: {}", entry.title, score_line(&entry.result));
    }

    let totals = Totals::from_entries(entries);
    out.push('\n');
    let _ = writeln!(
        out,
        "Checked {} document(s): {} valid, {} invalid, average score {:.2}",
        totals.documents, totals.valid, totals.invalid, totals.average_score
    );
    if totals.errors + totals.warnings > 0 {
        let _ = writeln!(out, "Found {}", counts(totals.errors, totals.warnings));
    }
    out
}

fn write_issues(out: &mut String, result: &ValidationResult, title: &str, colors: &ColorConfig) {
    for issue in result.issues() {
        let color = match issue.severity {
            Severity::Error => colors.error,
            Severity::Warning => colors.warning,
        };
        let label = apply_color(&format!("{}[{}]", issue.severity, issue.criterion), color).bold();
        let _ = writeln!(out, "{}: {}: {}", title, label, issue.description);
    }
}

fn counts(errors: usize, warnings: usize) -> String {
    let mut parts = Vec::new();
    if errors > 0 {
        parts.push(format!("{} error(s)", errors));
    }
    if warnings > 0 {
        parts.push(format!("{} warning(s)", warnings));
    }
    parts.join(", ")
}

fn score_line(result: &ValidationResult) -> String {
    let status = if result.valid { "valid" } else { "invalid" };
    format!("Score: {}/100 ({})", result.score, status)
}

/// Apply a color to a string
fn apply_color(s: &str, color: Color) -> ColoredString {
    match color {
        Color::Black => s.black(),
        Color::Red => s.red(),
        Color::Green => s.green(),
        Color::Yellow => s.yellow(),
        Color::Blue => s.blue(),
        Color::Magenta => s.magenta(),
        Color::Cyan => s.cyan(),
        Color::White => s.white(),
        Color::BrightBlack => s.bright_black(),
        Color::BrightRed => s.bright_red(),
        Color::BrightGreen => s.bright_green(),
        Color::BrightYellow => s.bright_yellow(),
        Color::BrightBlue => s.bright_blue(),
        Color::BrightMagenta => s.bright_magenta(),
        Color::BrightCyan => s.bright_cyan(),
        Color::BrightWhite => s.bright_white(),
    }
}
