//! Color parsing and WCAG contrast math.
//!
//! Only the color syntaxes that appear in inline `style` attributes are
//! understood: `#rgb`, `#rrggbb`, `rgb()`/`rgba()` and the CSS named colors.
//! Anything else (`currentColor`, gradients, `var(--x)`) yields `None`, which
//! callers treat as "cannot be evaluated".

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// An sRGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

static RGB_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*[\d.]+%?\s*)?\)$")
        .expect("valid rgb() regex")
});

static FONT_SIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+)?|\.\d+)\s*(px|pt|em|rem)?$").expect("valid font-size regex")
});

/// Parse a CSS color value.
///
/// ```
/// use wcag_lint::color::{parse_color, Rgb};
///
/// assert_eq!(parse_color("#f00"), Some(Rgb::new(255, 0, 0)));
/// assert_eq!(parse_color("rgba(0, 128, 0, 0.5)"), Some(Rgb::new(0, 128, 0)));
/// assert_eq!(parse_color("RebeccaPurple"), Some(Rgb::new(102, 51, 153)));
/// assert_eq!(parse_color("currentColor"), None);
/// ```
pub fn parse_color(value: &str) -> Option<Rgb> {
    let value = value.trim().to_ascii_lowercase();
    let value = value.trim_end_matches("!important").trim();

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }

    if let Some(caps) = RGB_FUNCTION.captures(value) {
        let channel = |i: usize| -> Option<u8> {
            let n: u32 = caps.get(i)?.as_str().parse().ok()?;
            Some(n.min(255) as u8)
        };
        return Some(Rgb::new(channel(1)?, channel(2)?, channel(3)?));
    }

    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == value)
        .map(|&(_, rgb)| rgb)
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => Some(Rgb::new(
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        )),
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|d| d * 17);
            Some(Rgb::new(digit(0)?, digit(1)?, digit(2)?))
        }
        _ => None,
    }
}

/// WCAG relative luminance in `[0, 1]`
pub fn relative_luminance(rgb: Rgb) -> f64 {
    fn linearize(v: u8) -> f64 {
        let c = f64::from(v) / 255.0;
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    0.2126 * linearize(rgb.r) + 0.7152 * linearize(rgb.g) + 0.0722 * linearize(rgb.b)
}

/// WCAG contrast ratio in `[1, 21]`; symmetric in its arguments
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Split an inline `style` attribute into lowercase property names and
/// trimmed values. Later declarations win.
pub fn parse_inline_style(style: &str) -> HashMap<String, String> {
    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .map(|(prop, value)| (prop.trim().to_ascii_lowercase(), value.trim().to_string()))
        .filter(|(prop, value)| !prop.is_empty() && !value.is_empty())
        .collect()
}

/// Resolve the color of a `background` shorthand.
///
/// Tries the whole value first, then each top-level component, so
/// `url(bg.png) #333 no-repeat` resolves to `#333`. Colors inside function
/// arguments are never picked up, and a gradient layer makes the value
/// unresolvable.
pub fn parse_background(value: &str) -> Option<Rgb> {
    if let Some(color) = parse_color(value) {
        return Some(color);
    }
    let tokens = top_level_tokens(value);
    if tokens
        .iter()
        .any(|token| token.to_ascii_lowercase().contains("gradient("))
    {
        return None;
    }
    tokens.into_iter().find_map(parse_color)
}

/// Whitespace-separated components of a CSS value, keeping parenthesized
/// groups such as `rgb(0, 0, 0)` in one piece
fn top_level_tokens(value: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start = None;

    for (i, ch) in value.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => {
                if let Some(s) = start.take() {
                    tokens.push(&value[s..i]);
                }
                continue;
            }
            _ => {}
        }
        start.get_or_insert(i);
    }
    if let Some(s) = start {
        tokens.push(&value[s..]);
    }
    tokens
}

/// Font size in points, or `None` when the value is missing or uses an
/// unsupported unit (`%`, keywords, `calc()`).
///
/// `px` converts at 0.75pt and `em`/`rem` at 12pt; unitless values are
/// treated as pixels.
pub fn font_size_pt(value: &str) -> Option<f64> {
    let value = value.trim().to_ascii_lowercase();
    let caps = FONT_SIZE.captures(&value)?;
    let size: f64 = caps.get(1)?.as_str().parse().ok()?;
    let factor = match caps.get(2).map(|m| m.as_str()) {
        Some("pt") => 1.0,
        Some("em") | Some("rem") => 12.0,
        _ => 0.75,
    };
    Some(size * factor)
}

const BOLD_TAGS: &[&str] = &["h1", "h2", "h3", "strong", "b"];

/// Whether text qualifies for the relaxed 3:1 contrast threshold.
///
/// Large means at least 18pt, or at least 14pt and bold. Without a
/// `font-size` the text is never large.
pub fn is_large_text(style: &HashMap<String, String>, tag: &str) -> bool {
    let Some(size) = style.get("font-size").and_then(|v| font_size_pt(v)) else {
        return false;
    };

    let bold = BOLD_TAGS.contains(&tag.to_ascii_lowercase().as_str())
        || style.get("font-weight").is_some_and(|w| {
            let w = w.trim().to_ascii_lowercase();
            w == "bold" || w.parse::<u32>().is_ok_and(|n| n >= 700)
        });

    size >= 18.0 || (size >= 14.0 && bold)
}

/// CSS named colors (CSS Color Module Level 4)
static NAMED_COLORS: &[(&str, Rgb)] = &[
    ("aliceblue", Rgb::new(240, 248, 255)),
    ("antiquewhite", Rgb::new(250, 235, 215)),
    ("aqua", Rgb::new(0, 255, 255)),
    ("aquamarine", Rgb::new(127, 255, 212)),
    ("azure", Rgb::new(240, 255, 255)),
    ("beige", Rgb::new(245, 245, 220)),
    ("bisque", Rgb::new(255, 228, 196)),
    ("black", Rgb::new(0, 0, 0)),
    ("blanchedalmond", Rgb::new(255, 235, 205)),
    ("blue", Rgb::new(0, 0, 255)),
    ("blueviolet", Rgb::new(138, 43, 226)),
    ("brown", Rgb::new(165, 42, 42)),
    ("burlywood", Rgb::new(222, 184, 135)),
    ("cadetblue", Rgb::new(95, 158, 160)),
    ("chartreuse", Rgb::new(127, 255, 0)),
    ("chocolate", Rgb::new(210, 105, 30)),
    ("coral", Rgb::new(255, 127, 80)),
    ("cornflowerblue", Rgb::new(100, 149, 237)),
    ("cornsilk", Rgb::new(255, 248, 220)),
    ("crimson", Rgb::new(220, 20, 60)),
    ("cyan", Rgb::new(0, 255, 255)),
    ("darkblue", Rgb::new(0, 0, 139)),
    ("darkcyan", Rgb::new(0, 139, 139)),
    ("darkgoldenrod", Rgb::new(184, 134, 11)),
    ("darkgray", Rgb::new(169, 169, 169)),
    ("darkgreen", Rgb::new(0, 100, 0)),
    ("darkgrey", Rgb::new(169, 169, 169)),
    ("darkkhaki", Rgb::new(189, 183, 107)),
    ("darkmagenta", Rgb::new(139, 0, 139)),
    ("darkolivegreen", Rgb::new(85, 107, 47)),
    ("darkorange", Rgb::new(255, 140, 0)),
    ("darkorchid", Rgb::new(153, 50, 204)),
    ("darkred", Rgb::new(139, 0, 0)),
    ("darksalmon", Rgb::new(233, 150, 122)),
    ("darkseagreen", Rgb::new(143, 188, 143)),
    ("darkslateblue", Rgb::new(72, 61, 139)),
    ("darkslategray", Rgb::new(47, 79, 79)),
    ("darkslategrey", Rgb::new(47, 79, 79)),
    ("darkturquoise", Rgb::new(0, 206, 209)),
    ("darkviolet", Rgb::new(148, 0, 211)),
    ("deeppink", Rgb::new(255, 20, 147)),
    ("deepskyblue", Rgb::new(0, 191, 255)),
    ("dimgray", Rgb::new(105, 105, 105)),
    ("dimgrey", Rgb::new(105, 105, 105)),
    ("dodgerblue", Rgb::new(30, 144, 255)),
    ("firebrick", Rgb::new(178, 34, 34)),
    ("floralwhite", Rgb::new(255, 250, 240)),
    ("forestgreen", Rgb::new(34, 139, 34)),
    ("fuchsia", Rgb::new(255, 0, 255)),
    ("gainsboro", Rgb::new(220, 220, 220)),
    ("ghostwhite", Rgb::new(248, 248, 255)),
    ("gold", Rgb::new(255, 215, 0)),
    ("goldenrod", Rgb::new(218, 165, 32)),
    ("gray", Rgb::new(128, 128, 128)),
    ("green", Rgb::new(0, 128, 0)),
    ("greenyellow", Rgb::new(173, 255, 47)),
    ("grey", Rgb::new(128, 128, 128)),
    ("honeydew", Rgb::new(240, 255, 240)),
    ("hotpink", Rgb::new(255, 105, 180)),
    ("indianred", Rgb::new(205, 92, 92)),
    ("indigo", Rgb::new(75, 0, 130)),
    ("ivory", Rgb::new(255, 255, 240)),
    ("khaki", Rgb::new(240, 230, 140)),
    ("lavender", Rgb::new(230, 230, 250)),
    ("lavenderblush", Rgb::new(255, 240, 245)),
    ("lawngreen", Rgb::new(124, 252, 0)),
    ("lemonchiffon", Rgb::new(255, 250, 205)),
    ("lightblue", Rgb::new(173, 216, 230)),
    ("lightcoral", Rgb::new(240, 128, 128)),
    ("lightcyan", Rgb::new(224, 255, 255)),
    ("lightgoldenrodyellow", Rgb::new(250, 250, 210)),
    ("lightgray", Rgb::new(211, 211, 211)),
    ("lightgreen", Rgb::new(144, 238, 144)),
    ("lightgrey", Rgb::new(211, 211, 211)),
    ("lightpink", Rgb::new(255, 182, 193)),
    ("lightsalmon", Rgb::new(255, 160, 122)),
    ("lightseagreen", Rgb::new(32, 178, 170)),
    ("lightskyblue", Rgb::new(135, 206, 250)),
    ("lightslategray", Rgb::new(119, 136, 153)),
    ("lightslategrey", Rgb::new(119, 136, 153)),
    ("lightsteelblue", Rgb::new(176, 196, 222)),
    ("lightyellow", Rgb::new(255, 255, 224)),
    ("lime", Rgb::new(0, 255, 0)),
    ("limegreen", Rgb::new(50, 205, 50)),
    ("linen", Rgb::new(250, 240, 230)),
    ("magenta", Rgb::new(255, 0, 255)),
    ("maroon", Rgb::new(128, 0, 0)),
    ("mediumaquamarine", Rgb::new(102, 205, 170)),
    ("mediumblue", Rgb::new(0, 0, 205)),
    ("mediumorchid", Rgb::new(186, 85, 211)),
    ("mediumpurple", Rgb::new(147, 112, 219)),
    ("mediumseagreen", Rgb::new(60, 179, 113)),
    ("mediumslateblue", Rgb::new(123, 104, 238)),
    ("mediumspringgreen", Rgb::new(0, 250, 154)),
    ("mediumturquoise", Rgb::new(72, 209, 204)),
    ("mediumvioletred", Rgb::new(199, 21, 133)),
    ("midnightblue", Rgb::new(25, 25, 112)),
    ("mintcream", Rgb::new(245, 255, 250)),
    ("mistyrose", Rgb::new(255, 228, 225)),
    ("moccasin", Rgb::new(255, 228, 181)),
    ("navajowhite", Rgb::new(255, 222, 173)),
    ("navy", Rgb::new(0, 0, 128)),
    ("oldlace", Rgb::new(253, 245, 230)),
    ("olive", Rgb::new(128, 128, 0)),
    ("olivedrab", Rgb::new(107, 142, 35)),
    ("orange", Rgb::new(255, 165, 0)),
    ("orangered", Rgb::new(255, 69, 0)),
    ("orchid", Rgb::new(218, 112, 214)),
    ("palegoldenrod", Rgb::new(238, 232, 170)),
    ("palegreen", Rgb::new(152, 251, 152)),
    ("paleturquoise", Rgb::new(175, 238, 238)),
    ("palevioletred", Rgb::new(219, 112, 147)),
    ("papayawhip", Rgb::new(255, 239, 213)),
    ("peachpuff", Rgb::new(255, 218, 185)),
    ("peru", Rgb::new(205, 133, 63)),
    ("pink", Rgb::new(255, 192, 203)),
    ("plum", Rgb::new(221, 160, 221)),
    ("powderblue", Rgb::new(176, 224, 230)),
    ("purple", Rgb::new(128, 0, 128)),
    ("rebeccapurple", Rgb::new(102, 51, 153)),
    ("red", Rgb::new(255, 0, 0)),
    ("rosybrown", Rgb::new(188, 143, 143)),
    ("royalblue", Rgb::new(65, 105, 225)),
    ("saddlebrown", Rgb::new(139, 69, 19)),
    ("salmon", Rgb::new(250, 128, 114)),
    ("sandybrown", Rgb::new(244, 164, 96)),
    ("seagreen", Rgb::new(46, 139, 87)),
    ("seashell", Rgb::new(255, 245, 238)),
    ("sienna", Rgb::new(160, 82, 45)),
    ("silver", Rgb::new(192, 192, 192)),
    ("skyblue", Rgb::new(135, 206, 235)),
    ("slateblue", Rgb::new(106, 90, 205)),
    ("slategray", Rgb::new(112, 128, 144)),
    ("slategrey", Rgb::new(112, 128, 144)),
    ("snow", Rgb::new(255, 250, 250)),
    ("springgreen", Rgb::new(0, 255, 127)),
    ("steelblue", Rgb::new(70, 130, 180)),
    ("tan", Rgb::new(210, 180, 140)),
    ("teal", Rgb::new(0, 128, 128)),
    ("thistle", Rgb::new(216, 191, 216)),
    ("tomato", Rgb::new(255, 99, 71)),
    ("turquoise", Rgb::new(64, 224, 208)),
    ("violet", Rgb::new(238, 130, 238)),
    ("wheat", Rgb::new(245, 222, 179)),
    ("white", Rgb::new(255, 255, 255)),
    ("whitesmoke", Rgb::new(245, 245, 245)),
    ("yellow", Rgb::new(255, 255, 0)),
    ("yellowgreen", Rgb::new(154, 205, 50)),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color_forms_agree() {
        let red = Some(Rgb::new(255, 0, 0));
        assert_eq!(parse_color("#FF0000"), red);
        assert_eq!(parse_color("#f00"), red);
        assert_eq!(parse_color("rgb(255,0,0)"), red);
        assert_eq!(parse_color("rgb( 255 , 0 , 0 )"), red);
        assert_eq!(parse_color("RED"), red);
        assert_eq!(parse_color("red !important"), red);
    }

    #[test]
    fn test_parse_color_rejects_unknown() {
        assert_eq!(parse_color("currentColor"), None);
        assert_eq!(parse_color("transparent"), None);
        assert_eq!(parse_color("linear-gradient(red, blue)"), None);
        assert_eq!(parse_color("var(--fg)"), None);
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#ggg"), None);
        assert_eq!(parse_color(""), None);
    }

    #[test]
    fn test_rgb_channels_are_clamped() {
        assert_eq!(parse_color("rgb(300, 0, 0)"), Some(Rgb::new(255, 0, 0)));
    }

    #[test]
    fn test_luminance_bounds() {
        assert_eq!(relative_luminance(Rgb::BLACK), 0.0);
        assert!((relative_luminance(Rgb::WHITE) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_contrast_ratio() {
        assert!((contrast_ratio(Rgb::BLACK, Rgb::WHITE) - 21.0).abs() < 0.1);
        let grey = Rgb::new(119, 119, 119);
        assert_eq!(contrast_ratio(grey, grey), 1.0);
        assert_eq!(
            contrast_ratio(grey, Rgb::WHITE),
            contrast_ratio(Rgb::WHITE, grey)
        );
        // #777 on white is the classic just-failing grey
        assert!(contrast_ratio(grey, Rgb::WHITE) < 4.5);
    }

    #[test]
    fn test_named_color_table() {
        assert_eq!(NAMED_COLORS.len(), 148);
        assert!(NAMED_COLORS.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_parse_inline_style() {
        let style = parse_inline_style("COLOR: #333; background-color : white;; font-size:12px");
        assert_eq!(style.get("color").map(String::as_str), Some("#333"));
        assert_eq!(
            style.get("background-color").map(String::as_str),
            Some("white")
        );
        assert_eq!(style.get("font-size").map(String::as_str), Some("12px"));
    }

    #[test]
    fn test_parse_background_shorthand() {
        assert_eq!(
            parse_background("url(bg.png) #333 no-repeat"),
            Some(Rgb::new(51, 51, 51))
        );
        assert_eq!(parse_background("rgb(0, 0, 0)"), Some(Rgb::BLACK));
        assert_eq!(parse_background("url(bg.png)"), None);
        assert_eq!(
            parse_background("url(bg.png) rgb(51, 51, 51) repeat-x"),
            Some(Rgb::new(51, 51, 51))
        );
    }

    #[test]
    fn test_background_ignores_function_arguments() {
        assert_eq!(
            parse_background("linear-gradient(to right, red 0%, blue 100%)"),
            None
        );
        assert_eq!(parse_background("radial-gradient(white, black) #fff"), None);
        assert_eq!(parse_background("url(red.png) no-repeat"), None);
        assert_eq!(top_level_tokens("url(a b.png)  #fff"), vec!["url(a b.png)", "#fff"]);
    }

    #[test]
    fn test_font_size_units() {
        assert_eq!(font_size_pt("24px"), Some(18.0));
        assert_eq!(font_size_pt("14pt"), Some(14.0));
        assert_eq!(font_size_pt("1.5em"), Some(18.0));
        assert_eq!(font_size_pt("2rem"), Some(24.0));
        assert_eq!(font_size_pt("120%"), None);
        assert_eq!(font_size_pt("large"), None);
    }

    #[test]
    fn test_is_large_text() {
        let style = |s: &str| parse_inline_style(s);
        assert!(is_large_text(&style("font-size: 24px"), "p"));
        assert!(!is_large_text(&style("font-size: 18px"), "p"));
        assert!(is_large_text(&style("font-size: 19px; font-weight: bold"), "p"));
        assert!(is_large_text(&style("font-size: 14pt; font-weight: 700"), "span"));
        assert!(!is_large_text(&style("font-size: 14pt; font-weight: 600"), "span"));
        assert!(is_large_text(&style("font-size: 14pt"), "h2"));
        assert!(!is_large_text(&style("font-weight: bold"), "h1"));
    }
}
