use super::{CONFORMANCE_LEVEL, Totals, WCAG_VERSION};
use crate::validator::{BatchEntry, ValidationResult};
use wcag_lint_common::Issue;

pub(crate) fn format(result: &ValidationResult, title: &str) -> String {
    let heading = if title.is_empty() {
        "Accessibility Report"
    } else {
        title
    };
    page(heading, &document_section(result, None))
}

pub(crate) fn format_batch(entries: &[BatchEntry]) -> String {
    let totals = Totals::from_entries(entries);
    let sections: Vec<String> = entries
        .iter()
        .map(|entry| document_section(&entry.result, Some(&entry.title)))
        .collect();

    let body = format!(
        r#"<section class="totals">
    <div class="stat"><span class="value">{documents}</span><span class="label">Documents</span></div>
    <div class="stat"><span class="value">{valid}</span><span class="label">Valid</span></div>
    <div class="stat"><span class="value">{invalid}</span><span class="label">Invalid</span></div>
    <div class="stat"><span class="value">{average:.2}</span><span class="label">Average score</span></div>
    <div class="stat"><span class="value">{errors}</span><span class="label">Errors</span></div>
    <div class="stat"><span class="value">{warnings}</span><span class="label">Warnings</span></div>
</section>
{sections}"#,
        documents = totals.documents,
        valid = totals.valid,
        invalid = totals.invalid,
        average = totals.average_score,
        errors = totals.errors,
        warnings = totals.warnings,
        sections = sections.join("\n"),
    );
    page("Accessibility Batch Report", &body)
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<style>{css}</style>
</head>
<body>
<header>
<h1>{title}</h1>
<p class="meta">WCAG {version} Level {level} &middot; Generated {timestamp}</p>
</header>
<main>
{body}
</main>
<footer>Generated by wcag-lint {crate_version}</footer>
</body>
</html>
"#,
        title = html_escape(title),
        css = CSS,
        version = WCAG_VERSION,
        level = CONFORMANCE_LEVEL,
        timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        body = body,
        crate_version = env!("CARGO_PKG_VERSION"),
    )
}

fn document_section(result: &ValidationResult, title: Option<&str>) -> String {
    let heading = title
        .map(|t| format!("<h2>{}</h2>\n", html_escape(t)))
        .unwrap_or_default();
    let (badge_class, badge_text) = if result.valid {
        ("valid", "Valid")
    } else {
        ("invalid", "Invalid")
    };

    let summary_rows: Vec<String> = result
        .summary
        .iter()
        .map(|s| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                html_escape(&s.criterion),
                s.error_count,
                s.warning_count
            )
        })
        .collect();
    let summary = if summary_rows.is_empty() {
        r#"<p class="empty">No issues found.</p>"#.to_string()
    } else {
        format!(
            r#"<table class="summary">
<thead><tr><th scope="col">Criterion</th><th scope="col">Errors</th><th scope="col">Warnings</th></tr></thead>
<tbody>
{}
</tbody>
</table>"#,
            summary_rows.join("\n")
        )
    };

    let actions = if result.remediation_actions.is_empty() {
        String::new()
    } else {
        let items: Vec<String> = result
            .remediation_actions
            .iter()
            .map(|a| {
                format!(
                    r#"<li><span class="badge {sev}">{criterion}</span> {action}</li>"#,
                    sev = a.severity,
                    criterion = html_escape(&a.criterion),
                    action = html_escape(&a.action),
                )
            })
            .collect();
        format!(
            "<h3>Remediation actions</h3>\n<ul class=\"actions\">\n{}\n</ul>",
            items.join("\n")
        )
    };

    format!(
        r#"<section class="document">
{heading}<div class="score">
    <span class="value">{score}/100</span>
    <span class="badge {badge_class}">{badge_text}</span>
</div>
<h3>Summary</h3>
{summary}
{errors}
{warnings}
{actions}
</section>"#,
        heading = heading,
        score = result.score,
        badge_class = badge_class,
        badge_text = badge_text,
        summary = summary,
        errors = issue_table("Errors", &result.errors),
        warnings = issue_table("Warnings", &result.warnings),
        actions = actions,
    )
}

fn issue_table(caption: &str, issues: &[Issue]) -> String {
    if issues.is_empty() {
        return String::new();
    }
    let rows: Vec<String> = issues.iter().map(format_row).collect();
    format!(
        r#"<table class="issues">
<caption>{caption} ({count})</caption>
<thead><tr><th scope="col">Criterion</th><th scope="col">Severity</th><th scope="col">Description</th><th scope="col">Element</th><th scope="col">Suggestion</th></tr></thead>
<tbody>
{rows}
</tbody>
</table>"#,
        caption = caption,
        count = issues.len(),
        rows = rows.join("\n"),
    )
}

fn format_row(issue: &Issue) -> String {
    format!(
        r#"<tr class="severity-{sev}">
    <td>{criterion}</td>
    <td><span class="badge {sev}">{sev}</span></td>
    <td class="message">{description}</td>
    <td><code>{element}</code></td>
    <td>{suggestion}</td>
</tr>"#,
        sev = issue.severity,
        criterion = html_escape(&issue.criterion),
        description = html_escape(&issue.description),
        element = html_escape(&issue.element),
        suggestion = html_escape(&issue.suggestion),
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const CSS: &str = r#"
* {
    box-sizing: border-box;
}

body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    line-height: 1.5;
    color: #222;
    max-width: 1200px;
    margin: 0 auto;
    padding: 20px;
    background: #f5f5f5;
}

header {
    background: #0d47a1;
    color: #fff;
    padding: 24px;
    border-radius: 8px;
    margin-bottom: 20px;
}

header .meta {
    margin: 0;
    opacity: 0.9;
}

section {
    background: #fff;
    padding: 20px;
    border-radius: 8px;
    margin-bottom: 20px;
}

.totals {
    display: flex;
    gap: 24px;
    flex-wrap: wrap;
}

.stat .value {
    display: block;
    font-size: 1.6em;
    font-weight: bold;
}

.score .value {
    font-size: 2em;
    font-weight: bold;
    margin-right: 12px;
}

.badge {
    display: inline-block;
    padding: 2px 8px;
    border-radius: 4px;
    font-size: 0.85em;
    font-weight: bold;
    color: #fff;
}

.badge.valid { background: #1b5e20; }
.badge.invalid, .badge.error { background: #b71c1c; }
.badge.warning { background: #8a4b00; }

table {
    width: 100%;
    border-collapse: collapse;
    margin: 12px 0;
}

caption {
    text-align: left;
    font-weight: bold;
    padding: 6px 0;
}

th, td {
    text-align: left;
    padding: 8px;
    border-bottom: 1px solid #ddd;
    vertical-align: top;
}

code {
    font-size: 0.85em;
    word-break: break-all;
}

footer {
    text-align: center;
    color: #555;
    font-size: 0.85em;
}
"#;
