use std::fs;
use std::path::PathBuf;
use wcag_lint::{RemediationOptions, Remediator, ValidationOptions, remediate, validate};

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
        .join("document.html");
    fs::read_to_string(path).expect("Failed to read fixture")
}

#[test]
fn test_remediate_applies_all_fixes_in_order() {
    let html = fixture("remediable");
    let before = validate(&html, ValidationOptions::default());
    assert!(!before.valid);

    let result = remediate(&html, RemediationOptions::default());
    assert_eq!(
        result.fixes_applied,
        vec![
            "Fixed heading hierarchy (1 headings renumbered)",
            "Added table header scope attributes (2 cells updated)",
            "Converted 1 pseudo-lists to semantic list markup",
            "Converted 1 bold paragraphs to headings",
        ]
    );
    assert_eq!(result.fix_count, 4);

    let content = &result.content;
    assert!(content.starts_with("<h1>Unit 4</h1>"));
    assert!(content.contains("<h2>Key terms</h2>"));
    assert!(!content.contains("<h3>"));
    assert!(content.contains("<h2>Vocabulary</h2>"));
    assert!(!content.contains("<strong>"));
    assert!(content.contains("<ul><li>osmosis</li><li>diffusion</li><li>active transport</li></ul>"));
    assert!(content.contains(r#"<th scope="col">Term</th><th scope="col">Definition</th>"#));
    // fragments come back without a document shell
    assert!(!content.contains("<html"));
    assert!(!content.contains("<body"));

    let after = validate(content, ValidationOptions::default());
    assert!(after.errors.is_empty(), "got: {:?}", after.errors);
    assert!(after.valid);
    assert!(after.score > before.score);
}

#[test]
fn test_remediate_heading_fixture() {
    let result = remediate(&fixture("heading_skip"), RemediationOptions::default());
    assert_eq!(
        result.fixes_applied,
        vec!["Fixed heading hierarchy (2 headings renumbered)"]
    );
    assert!(result.content.contains("<h2>Light reactions</h2>"));
    assert!(result.content.contains("<h3>Carbon fixation</h3>"));
    assert!(!result.content.contains("<h5>"));

    // full documents keep their shell
    assert!(result.content.starts_with("<!DOCTYPE html><html lang=\"en\">"));
    assert!(result.content.contains("<title>Outline</title>"));
}

#[test]
fn test_remediate_pseudo_lists_fixture() {
    let result = remediate(&fixture("pseudo_lists"), RemediationOptions::default());
    assert_eq!(
        result.fixes_applied,
        vec!["Converted 2 pseudo-lists to semantic list markup"]
    );
    assert!(result.content.contains("<ul><li>Safety goggles</li>"));
    assert!(result.content.contains("<ol><li>Measure 10 ml of water</li>"));
    assert!(result.content.contains("<p>Follow these steps in order.</p>"));

    let after = validate(&result.content, ValidationOptions::default());
    assert!(!after.has_issues());
}

#[test]
fn test_remediate_respects_options() {
    let options = RemediationOptions {
        fix_headings: false,
        fix_lists: false,
        ..RemediationOptions::default()
    };
    let result = Remediator::with_options(options).remediate(&fixture("remediable"));

    assert_eq!(result.fix_count, 2);
    assert!(result.content.contains("<h3>Key terms</h3>"));
    assert!(result.content.contains("<p>- osmosis</p>"));
    assert!(result.fixes_applied[0].starts_with("Added table header scope attributes"));
    assert!(result.fixes_applied[1].starts_with("Converted 1 bold paragraphs"));
}

#[test]
fn test_remediate_clean_document_is_unchanged() {
    let html = fixture("accessible");
    let result = remediate(&html, RemediationOptions::default());
    assert_eq!(result.fix_count, 0);
    assert!(result.fixes_applied.is_empty());

    let before = validate(&html, ValidationOptions::default());
    let after = validate(&result.content, ValidationOptions::default());
    assert_eq!(before, after);
}

#[test]
fn test_remediate_with_everything_disabled() {
    let options = RemediationOptions {
        fix_headings: false,
        fix_tables: false,
        fix_lists: false,
        fix_bold_headings: false,
    };
    let html = "<h1>A</h1><h4>B</h4>";
    let result = remediate(html, options);
    assert_eq!(result.fix_count, 0);
    assert_eq!(result.content, html);
}

#[test]
fn test_remediate_is_total() {
    for html in ["", "just text", "<p><b>", "<table><td>x", "<h6></h6><h1>"] {
        let result = remediate(html, RemediationOptions::default());
        assert_eq!(result.fix_count, result.fixes_applied.len());
    }
}

#[test]
fn test_remediate_deeply_nested_document() {
    let depth = 50_000;
    let html = format!(
        "<h1>T</h1>{}x{}<h3>x</h3>",
        "<span>".repeat(depth),
        "</span>".repeat(depth)
    );
    let result = remediate(&html, RemediationOptions::default());

    assert_eq!(
        result.fixes_applied,
        vec!["Fixed heading hierarchy (1 headings renumbered)"]
    );
    assert!(result.content.starts_with("<h1>T</h1><span><span>"));
    assert!(result.content.ends_with("</span></span><h2>x</h2>"));
    assert_eq!(result.content.matches("<span>").count(), depth);
}
