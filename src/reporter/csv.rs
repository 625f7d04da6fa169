use crate::validator::{BatchEntry, ValidationResult};

const HEADER: [&str; 4] = ["Criterion", "Severity", "Description", "Suggestion"];

pub(crate) fn format(result: &ValidationResult) -> String {
    let mut out = String::new();
    push_row(&mut out, &HEADER);
    for issue in result.issues() {
        let severity = issue.severity.to_string();
        push_row(
            &mut out,
            &[
                issue.criterion.as_str(),
                severity.as_str(),
                issue.description.as_str(),
                issue.suggestion.as_str(),
            ],
        );
    }
    out
}

pub(crate) fn format_batch(entries: &[BatchEntry]) -> String {
    let mut out = String::new();
    let mut header = vec!["Document"];
    header.extend(HEADER);
    push_row(&mut out, &header);

    for entry in entries {
        for issue in entry.result.issues() {
            let severity = issue.severity.to_string();
            push_row(
                &mut out,
                &[
                    entry.title.as_str(),
                    issue.criterion.as_str(),
                    severity.as_str(),
                    issue.description.as_str(),
                    issue.suggestion.as_str(),
                ],
            );
        }
    }
    out
}

fn push_row(out: &mut String, fields: &[&str]) {
    let row: Vec<String> = fields.iter().map(|field| quote(field)).collect();
    out.push_str(&row.join(","));
    out.push('\n');
}

/// Double-quote a field, doubling any embedded quotes
fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
