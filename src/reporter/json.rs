use super::{CONFORMANCE_LEVEL, Totals, WCAG_VERSION};
use super::ReportError;
use crate::validator::{BatchEntry, ValidationResult};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

#[derive(Serialize)]
struct JsonReport<'a> {
    title: &'a str,
    generated_at: String,
    wcag_version: &'static str,
    conformance_level: &'static str,
    #[serde(flatten)]
    result: &'a ValidationResult,
}

#[derive(Serialize)]
struct JsonBatchReport<'a> {
    generated_at: String,
    wcag_version: &'static str,
    conformance_level: &'static str,
    documents: Vec<JsonDocument<'a>>,
    totals: Totals,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    title: &'a str,
    #[serde(flatten)]
    result: &'a ValidationResult,
}

pub(crate) fn format(result: &ValidationResult, title: &str) -> Result<String, ReportError> {
    format_at(result, title, Utc::now())
}

pub(crate) fn format_batch(entries: &[BatchEntry]) -> Result<String, ReportError> {
    format_batch_at(entries, Utc::now())
}

fn format_at(
    result: &ValidationResult,
    title: &str,
    now: DateTime<Utc>,
) -> Result<String, ReportError> {
    let report = JsonReport {
        title,
        generated_at: timestamp(now),
        wcag_version: WCAG_VERSION,
        conformance_level: CONFORMANCE_LEVEL,
        result,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn format_batch_at(entries: &[BatchEntry], now: DateTime<Utc>) -> Result<String, ReportError> {
    let report = JsonBatchReport {
        generated_at: timestamp(now),
        wcag_version: WCAG_VERSION,
        conformance_level: CONFORMANCE_LEVEL,
        documents: entries
            .iter()
            .map(|entry| JsonDocument {
                title: &entry.title,
                result: &entry.result,
            })
            .collect(),
        totals: Totals::from_entries(entries),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::validate;
    use chrono::TimeZone;
    use wcag_lint_common::ValidationOptions;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_json_structure() {
        let result = validate(r#"<h1>T</h1><img src="a.png">"#, ValidationOptions::default());
        let output = format_at(&result, "Course page", fixed_time()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["title"], "Course page");
        assert_eq!(json["generated_at"], "2024-05-01T12:30:00Z");
        assert_eq!(json["wcag_version"], "2.1");
        assert_eq!(json["conformance_level"], "AA");
        assert_eq!(json["valid"], false);
        assert_eq!(json["score"], result.score);
        assert_eq!(json["errors"][0]["criterion"], "1.1.1");
        assert_eq!(json["errors"][0]["severity"], "error");
        assert_eq!(json["errors"][0]["extra"]["image_index"], 0);
        assert!(json["warnings"].is_array());
        assert!(json["summary"].is_array());
        assert!(json["remediation_actions"].is_array());
    }

    #[test]
    fn test_json_clean_document() {
        let result = validate(
            r#"<html lang="en"><body><h1>Title</h1></body></html>"#,
            ValidationOptions::default(),
        );
        let output = format_at(&result, "", fixed_time()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["valid"], true);
        assert_eq!(json["score"], 100);
        assert!(json["errors"].as_array().unwrap().is_empty());
        assert!(json["warnings"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_json_batch_structure() {
        let entries = vec![
            BatchEntry {
                title: "first".to_string(),
                result: validate(
                    r#"<html lang="en"><body><h1>A</h1></body></html>"#,
                    ValidationOptions::default(),
                ),
            },
            BatchEntry {
                title: "second".to_string(),
                result: validate(r#"<h1>B</h1><img src="b.png">"#, ValidationOptions::default()),
            },
        ];
        let output = format_batch_at(&entries, fixed_time()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["wcag_version"], "2.1");
        assert_eq!(json["documents"].as_array().unwrap().len(), 2);
        assert_eq!(json["documents"][0]["title"], "first");
        assert_eq!(json["documents"][1]["title"], "second");
        assert_eq!(json["documents"][1]["valid"], false);
        assert_eq!(json["totals"]["documents"], 2);
        assert_eq!(json["totals"]["valid"], 1);
        assert_eq!(json["totals"]["invalid"], 1);
        assert_eq!(json["totals"]["errors"], 1);
    }
}
