use std::fs;
use std::path::PathBuf;
use wcag_lint::{Severity, ValidationOptions, ValidationResult, Validator, parse_file, validate};

fn fixtures_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .join("document.html")
}

fn validate_fixture(name: &str) -> ValidationResult {
    let html = fs::read_to_string(fixtures_path(name)).expect("Failed to read fixture");
    validate(&html, ValidationOptions::default())
}

fn criteria(issues: &[wcag_lint::Issue]) -> Vec<&str> {
    issues.iter().map(|i| i.criterion.as_str()).collect()
}

#[test]
fn test_accessible_document() {
    let result = validate_fixture("accessible");

    assert!(
        !result.has_issues(),
        "Expected no errors or warnings, got: {:?} {:?}",
        result.errors,
        result.warnings
    );
    assert_eq!(result.score, 100);
    assert!(result.valid);
    assert!(result.summary.is_empty());
    assert!(result.remediation_actions.is_empty());
}

#[test]
fn test_images_document() {
    let result = validate_fixture("images");

    assert_eq!(criteria(&result.errors), vec!["1.1.1", "1.1.1"]);
    assert_eq!(result.errors[0].description, "Image is missing an alt attribute");
    assert_eq!(result.errors[0].element, r#"<img src="logo.png">"#);
    assert_eq!(result.errors[0].extra["image_index"], 0);
    assert_eq!(
        result.errors[1].description,
        "Image alt text \"IMG_0042.jpg\" looks like a file name"
    );
    assert_eq!(result.errors[1].extra["image_index"], 3);

    // the decorative spacer is not reported
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].extra["image_index"], 1);

    assert_eq!(result.score, 89);
    assert!(!result.valid);
}

#[test]
fn test_heading_skip_document() {
    let result = validate_fixture("heading_skip");

    let skips: Vec<_> = result
        .errors
        .iter()
        .filter(|e| e.criterion == "1.3.1")
        .collect();
    assert_eq!(skips.len(), 2);
    assert!(skips[0].description.contains("H1 to H3"));
    assert_eq!(skips[0].suggestion, "Change this heading to H2");
    assert!(skips[1].description.contains("H2 to H5"));
    assert_eq!(skips[1].suggestion, "Change this heading to H3");
    assert!(result.warnings.is_empty());
    assert_eq!(result.score, 94);
}

#[test]
fn test_low_contrast_document() {
    let result = validate_fixture("low_contrast");

    // large text, unresolvable colors and background shorthands are not errors
    assert_eq!(result.errors.len(), 1, "got: {:?}", result.errors);
    let error = &result.errors[0];
    assert_eq!(error.criterion, "1.4.3");
    let ratio = error.extra["contrast_ratio"].as_f64().unwrap();
    assert!((ratio - 2.85).abs() < 0.01, "ratio was {}", ratio);
    assert_eq!(error.extra["required_ratio"], 4.5);
    assert_eq!(error.extra["foreground"], "#999999");
    assert!(result.warnings.is_empty());
}

#[test]
fn test_tables_document() {
    let result = validate_fixture("tables");

    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].description, "Data table has no header cells");
    assert_eq!(result.errors[0].extra["table_index"], 0);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].description, "Data table has no caption");
}

#[test]
fn test_pseudo_lists_document() {
    let result = validate_fixture("pseudo_lists");

    assert!(result.errors.is_empty());
    assert_eq!(result.warnings.len(), 2);
    assert_eq!(result.warnings[0].extra["list_type"], "unordered");
    assert_eq!(result.warnings[0].extra["pseudo_list_count"], 3);
    assert_eq!(result.warnings[1].extra["list_type"], "ordered");
    assert_eq!(result.score, 98);
    assert!(result.valid);
}

#[test]
fn test_links_document() {
    let result = validate_fixture("links");

    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].description, "Link has no accessible name");
    assert_eq!(result.errors[0].extra["link_index"], 1);

    let warnings: Vec<_> = result.warnings.iter().map(|w| w.description.as_str()).collect();
    assert_eq!(
        warnings,
        vec![
            "Link text \"click here\" does not describe its destination",
            "Link text is a bare URL",
        ]
    );
    assert_eq!(result.score, 96);
}

#[test]
fn test_fragment_document() {
    let result = validate_fixture("fragment");

    assert!(result.errors.is_empty());
    let descriptions: Vec<_> = result.warnings.iter().map(|w| w.description.as_str()).collect();
    assert_eq!(
        descriptions,
        vec![
            "Document has no H1 heading",
            "Content fragment has no language identifier",
        ]
    );
    assert_eq!(result.score, 98);
    assert!(result.valid);
}

#[test]
fn test_long_document_without_headings() {
    let result = validate_fixture("long_without_headings");

    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].criterion, "2.4.10");
    assert_eq!(result.errors[0].extra["word_count"], 600);
    assert_eq!(result.score, 94);
    assert!(!result.valid);
}

#[test]
fn test_summary_and_remediation_actions() {
    let result = validate_fixture("images");

    assert_eq!(result.summary.len(), 1);
    assert_eq!(result.summary[0].criterion, "1.1.1");
    assert_eq!(result.summary[0].error_count, 2);
    assert_eq!(result.summary[0].warning_count, 1);

    // one action per distinct suggestion
    assert_eq!(result.remediation_actions.len(), 3);
    assert!(result
        .remediation_actions
        .iter()
        .all(|a| a.criterion == "1.1.1"));
    assert_eq!(result.remediation_actions[0].severity, Severity::Error);
}

#[test]
fn test_strict_mode_raises_threshold() {
    let html = format!(
        "<h1>Links</h1>{}",
        r#"<p><a href="/x">here</a></p>"#.repeat(5)
    );

    let standard = validate(&html, ValidationOptions::default());
    assert!(standard.errors.is_empty());
    assert_eq!(standard.score, 94);
    assert!(standard.valid);

    let strict = validate(
        &html,
        ValidationOptions {
            strict_mode: true,
            ..ValidationOptions::default()
        },
    );
    assert_eq!(strict.score, 94);
    assert!(!strict.valid);
}

#[test]
fn test_disabled_checks_are_not_run() {
    let mut options = ValidationOptions::default();
    options.check_images = false;
    let validator = Validator::with_options(options);

    let html = fs::read_to_string(fixtures_path("images")).unwrap();
    let result = validator.validate(&html);
    assert!(result.errors.is_empty());
    assert!(result.valid);
    assert!(validator.checkers().iter().all(|c| c.name() != "images"));
}

#[test]
fn test_validate_parsed_file() {
    let doc = parse_file(&fixtures_path("heading_skip")).expect("Failed to parse fixture");
    assert!(!doc.is_fragment());

    let result = Validator::new().validate_document(&doc);
    assert_eq!(result.errors.len(), 2);
}

#[test]
fn test_deeply_nested_document() {
    let depth = 50_000;
    let html = format!(
        "<h1>Nested</h1>{}<img src=\"deep.png\">{}",
        "<span>".repeat(depth),
        "</span>".repeat(depth)
    );
    let result = validate(&html, ValidationOptions::default());

    assert_eq!(criteria(&result.errors), vec!["1.1.1"]);
    assert_eq!(result.errors[0].element, r#"<img src="deep.png">"#);
    assert!(!result.valid);
}

#[test]
fn test_malformed_input_is_total() {
    for html in [
        "",
        "plain text, no markup at all",
        "<<<>>>",
        "<table><tr><td>unclosed",
        "<h1><h2><h3>",
        "</p></div></body>",
        "<img src=\"a.png\" alt=",
        "<div style=\"color:\">x</div>",
    ] {
        let result = validate(html, ValidationOptions::default());
        assert!(result.score <= 100, "input {:?}", html);
        assert_eq!(result.valid, result.errors.is_empty() && result.score >= 70);
    }
}
