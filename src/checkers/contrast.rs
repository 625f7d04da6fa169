use crate::color::{contrast_ratio, is_large_text, parse_background, parse_color, parse_inline_style};
use crate::docs::CheckerDoc;
use wcag_lint_common::{CheckResult, Checker, Document, Issue};

/// Checker documentation
pub static DOC: CheckerDoc = CheckerDoc {
    name: "contrast",
    criteria: &["1.4.3"],
    description: "Detects inline text colors with insufficient contrast against their background",
    severity: "error",
    why: r#"Text must have a contrast ratio of at least 4.5:1 against its
background (3:1 for large text, 18pt or 14pt bold) so that people with low
vision or color deficiencies can read it.

Only elements that set both a foreground color and a background color in
their inline style attribute can be evaluated. Colors coming from
stylesheets, gradients, currentColor or CSS variables are skipped."#,
    bad_example: include_str!("contrast/bad.html"),
    good_example: include_str!("contrast/good.html"),
    references: &["https://www.w3.org/WAI/WCAG21/Understanding/contrast-minimum.html"],
};

/// Minimum contrast ratio for normal text
pub const NORMAL_TEXT_RATIO: f64 = 4.5;

/// Minimum contrast ratio for large text
pub const LARGE_TEXT_RATIO: f64 = 3.0;

/// Check inline foreground/background color pairs (WCAG 1.4.3)
pub struct ColorContrastChecker;

impl Checker for ColorContrastChecker {
    fn name(&self) -> &'static str {
        "contrast"
    }

    fn criteria(&self) -> &'static [&'static str] {
        DOC.criteria
    }

    fn description(&self) -> &'static str {
        DOC.description
    }

    fn check(&self, doc: &Document) -> CheckResult {
        let mut result = CheckResult::new();

        for id in doc.descendants(doc.root()) {
            let Some(element) = doc.element(id) else {
                continue;
            };
            let Some(style_attr) = element.attr("style") else {
                continue;
            };

            let style = parse_inline_style(style_attr);
            let Some(fg_value) = style.get("color") else {
                continue;
            };
            let bg_value = style
                .get("background-color")
                .or_else(|| style.get("background"));
            let Some(bg_value) = bg_value else {
                continue;
            };

            let fg = parse_color(fg_value);
            let bg = parse_color(bg_value).or_else(|| parse_background(bg_value));
            let (Some(fg), Some(bg)) = (fg, bg) else {
                tracing::trace!(
                    tag = %element.name,
                    foreground = %fg_value,
                    background = %bg_value,
                    "skipping element with unresolvable colors"
                );
                continue;
            };

            let ratio = contrast_ratio(fg, bg);
            let required = if is_large_text(&style, &element.name) {
                LARGE_TEXT_RATIO
            } else {
                NORMAL_TEXT_RATIO
            };

            if ratio < required {
                result.push(
                    Issue::error(
                        "1.4.3",
                        &format!(
                            "Insufficient color contrast {:.2}:1 (required {:.1}:1) between foreground {} and background {}",
                            ratio, required, fg_value, bg_value
                        ),
                    )
                    .with_node(doc, id)
                    .with_suggestion(&format!(
                        "Darken the text or lighten the background to reach a contrast ratio of at least {:.1}:1",
                        required
                    ))
                    .with_extra("contrast_ratio", (ratio * 100.0).round() / 100.0)
                    .with_extra("required_ratio", required)
                    .with_extra("foreground", fg_value.as_str())
                    .with_extra("background", bg_value.as_str()),
                );
            }
        }

        result
    }
}
