//! Configuration loaded from `.wcag-lint.toml`.
//!
//! The file is the settings source the CLI turns into the explicit
//! [`ValidationOptions`] and [`RemediationOptions`] passed to the validator
//! and remediator; library code never reads it on its own.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use wcag_lint_common::{CHECK_NAMES, RemediationOptions, ValidationOptions};

/// File name searched for by [`LintConfig::find_and_load`]
pub const CONFIG_FILE_NAME: &str = ".wcag-lint.toml";

/// Template written by `wcag-lint config init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# wcag-lint configuration

# Require a score of 95 instead of 70 for a document to be valid
strict_mode = false

# Checks to run (all enabled by default)
[checks]
contrast = true
headings = true
images = true
links = true
lists = true
tables = true
language = true

# Automatic fixes applied with --fix
[remediation]
fix_headings = true
fix_tables = true
fix_lists = true
fix_bold_headings = true

# Terminal output colors
[color]
ui = "auto"        # "auto", "always" or "never"
error = "red"
warning = "yellow"
"#;

/// [`DEFAULT_CONFIG_TEMPLATE`] with strict scoring switched on and the named
/// checks switched off. Unknown check names are left untouched.
pub fn config_template(strict: bool, disabled: &[&str]) -> String {
    let mut template = DEFAULT_CONFIG_TEMPLATE.to_string();
    if strict {
        template = template.replace("\nstrict_mode = false\n", "\nstrict_mode = true\n");
    }
    for check in disabled.iter().filter(|c| CHECK_NAMES.contains(*c)) {
        template = template.replace(
            &format!("\n{} = true\n", check),
            &format!("\n{} = false\n", check),
        );
    }
    template
}

/// Configuration for wcag-lint loaded from .wcag-lint.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    pub strict_mode: bool,
    pub checks: ChecksConfig,
    pub remediation: RemediationOptions,
    pub color: ColorConfig,
}

/// Which checkers run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ChecksConfig {
    pub contrast: bool,
    pub headings: bool,
    pub images: bool,
    pub links: bool,
    pub lists: bool,
    pub tables: bool,
    pub language: bool,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            contrast: true,
            headings: true,
            images: true,
            links: true,
            lists: true,
            tables: true,
            language: true,
        }
    }
}

/// Color output configuration
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Color mode: "auto" (default), "always", or "never"
    pub ui: ColorMode,
    /// Color used for errors
    pub error: Color,
    /// Color used for warnings
    pub warning: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            ui: ColorMode::Auto,
            error: Color::Red,
            warning: Color::Yellow,
        }
    }
}

/// Color mode for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Automatically detect (default) - respects NO_COLOR env and terminal detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl ColorMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for ColorMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let s = String::deserialize(deserializer)?;
        ColorMode::from_name(&s).ok_or_else(|| {
            D::Error::custom(format!(
                "invalid color mode '{}', expected 'auto', 'always', or 'never'",
                s
            ))
        })
    }
}

/// Terminal colors available for severities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

/// Names accepted for [`Color`] in the configuration file
pub const COLOR_NAMES: &[&str] = &[
    "black",
    "red",
    "green",
    "yellow",
    "blue",
    "magenta",
    "cyan",
    "white",
    "bright_black",
    "bright_red",
    "bright_green",
    "bright_yellow",
    "bright_blue",
    "bright_magenta",
    "bright_cyan",
    "bright_white",
];

impl Color {
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name {
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "bright_black" => Color::BrightBlack,
            "bright_red" => Color::BrightRed,
            "bright_green" => Color::BrightGreen,
            "bright_yellow" => Color::BrightYellow,
            "bright_blue" => Color::BrightBlue,
            "bright_magenta" => Color::BrightMagenta,
            "bright_cyan" => Color::BrightCyan,
            "bright_white" => Color::BrightWhite,
            _ => return None,
        };
        Some(color)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let s = String::deserialize(deserializer)?;
        Color::from_name(&s).ok_or_else(|| D::Error::custom(format!("invalid color '{}'", s)))
    }
}

impl LintConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Find and load .wcag-lint.toml from the given directory or its parents
    pub fn find_and_load(dir: &Path) -> Option<Self> {
        let mut current = dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::from_file(&config_path) {
                    Ok(config) => {
                        tracing::debug!(path = %config_path.display(), "loaded configuration");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!("ignoring configuration: {}", e);
                        None
                    }
                };
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Options for the validator
    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            check_contrast: self.checks.contrast,
            check_headings: self.checks.headings,
            check_images: self.checks.images,
            check_links: self.checks.links,
            check_lists: self.checks.lists,
            check_tables: self.checks.tables,
            check_language: self.checks.language,
            strict_mode: self.strict_mode,
        }
    }

    /// Options for the remediator
    pub fn remediation_options(&self) -> RemediationOptions {
        self.remediation
    }

    /// Get the color mode setting
    pub fn color_mode(&self) -> ColorMode {
        self.color.ui
    }

    /// Check a configuration file for unknown sections, unknown keys and
    /// values of the wrong type.
    ///
    /// Returns `Ok` with the (possibly empty) list of problems when the file
    /// is readable TOML.
    pub fn validate_file(path: &Path) -> Result<Vec<ValidationError>, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let table: toml::Table = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(validate_table(&table))
    }
}

const REMEDIATION_KEYS: &[&str] = &["fix_headings", "fix_tables", "fix_lists", "fix_bold_headings"];

fn validate_table(table: &toml::Table) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (key, value) in table {
        match key.as_str() {
            "strict_mode" => expect_bool(&mut errors, key, value),
            "checks" => validate_section(&mut errors, key, value, |errors, name, value| {
                if CHECK_NAMES.contains(&name) {
                    expect_bool(errors, &format!("checks.{}", name), value);
                    true
                } else {
                    false
                }
            }),
            "remediation" => validate_section(&mut errors, key, value, |errors, name, value| {
                if REMEDIATION_KEYS.contains(&name) {
                    expect_bool(errors, &format!("remediation.{}", name), value);
                    true
                } else {
                    false
                }
            }),
            "color" => validate_section(&mut errors, key, value, |errors, name, value| {
                let key = format!("color.{}", name);
                match name {
                    "ui" => expect_name(errors, &key, value, &["auto", "always", "never"]),
                    "error" | "warning" => expect_name(errors, &key, value, COLOR_NAMES),
                    _ => return false,
                }
                true
            }),
            _ => errors.push(ValidationError::UnknownKey { key: key.clone() }),
        }
    }

    errors
}

fn validate_section(
    errors: &mut Vec<ValidationError>,
    section: &str,
    value: &toml::Value,
    check_key: impl Fn(&mut Vec<ValidationError>, &str, &toml::Value) -> bool,
) {
    let Some(table) = value.as_table() else {
        errors.push(ValidationError::InvalidType {
            key: section.to_string(),
            expected: "table",
        });
        return;
    };
    for (name, value) in table {
        if !check_key(errors, name, value) {
            errors.push(ValidationError::UnknownKey {
                key: format!("{}.{}", section, name),
            });
        }
    }
}

fn expect_bool(errors: &mut Vec<ValidationError>, key: &str, value: &toml::Value) {
    if !value.is_bool() {
        errors.push(ValidationError::InvalidType {
            key: key.to_string(),
            expected: "boolean",
        });
    }
}

fn expect_name(errors: &mut Vec<ValidationError>, key: &str, value: &toml::Value, allowed: &[&str]) {
    match value.as_str() {
        Some(s) if allowed.contains(&s) => {}
        Some(s) => errors.push(ValidationError::InvalidValue {
            key: key.to_string(),
            value: s.to_string(),
            allowed: allowed.join(", "),
        }),
        None => errors.push(ValidationError::InvalidType {
            key: key.to_string(),
            expected: "string",
        }),
    }
}

/// A problem found by [`LintConfig::validate_file`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown key '{key}'")]
    UnknownKey { key: String },
    #[error("'{key}' must be a {expected}")]
    InvalidType { key: String, expected: &'static str },
    #[error("invalid value '{value}' for '{key}' (expected one of: {allowed})")]
    InvalidValue {
        key: String,
        value: String,
        allowed: String,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
