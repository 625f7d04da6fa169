pub mod config;
pub mod lint;
pub mod report;
pub mod why;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use wcag_lint::OutputFormat;

#[derive(Parser)]
#[command(name = "wcag-lint")]
#[command(author, version, about = "Check HTML content against WCAG 2.1 AA", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// HTML file(s) or directories to check ("-" reads stdin)
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    pub format: Format,

    /// Require a score of 95 instead of 70 for a document to be valid
    #[arg(long)]
    pub strict: bool,

    /// Rewrite files in place with the automatic fixes
    #[arg(long)]
    pub fix: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Force colored output
    #[arg(long, conflicts_with = "no_color")]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not exit with non-zero code on warnings (only fail on errors)
    #[arg(long)]
    pub no_fail_on_warnings: bool,

    /// Disable a check (may be repeated, e.g. --disable contrast)
    #[arg(long, value_name = "CHECK")]
    pub disable: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a combined report for several documents
    Report {
        /// HTML file(s) or directories to include
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Report format
        #[arg(short = 'o', long, value_enum, default_value = "json")]
        format: Format,

        /// Write the report to a file instead of stdout
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Require a score of 95 instead of 70 for a document to be valid
        #[arg(long)]
        strict: bool,

        /// Path to configuration file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Configuration file management
    Config {
        #[command(subcommand)]
        command: config::ConfigCommands,
    },
    /// Show detailed documentation for a check
    Why {
        /// Check name (e.g., "contrast")
        check: Option<String>,

        /// List all available checks
        #[arg(short, long)]
        list: bool,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
pub enum Format {
    Text,
    Json,
    Html,
    Csv,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Html => OutputFormat::Html,
            Format::Csv => OutputFormat::Csv,
        }
    }
}

/// Expand directories to the HTML files below them; plain paths pass through
pub(crate) fn collect_html_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, String> {
    let mut paths = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            paths.push(input.clone());
            continue;
        }

        let mut found = html_files_in(input)?;
        if found.is_empty() {
            return Err(format!("no HTML files found in directory {}", input.display()));
        }
        found.sort();
        paths.extend(found);
    }
    Ok(paths)
}

fn html_files_in(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let mut found = Vec::new();
    for extension in ["html", "htm"] {
        let pattern = dir.join("**").join(format!("*.{}", extension));
        let pattern = pattern.to_string_lossy();
        let entries = glob::glob(&pattern).map_err(|e| format!("invalid pattern {}: {}", pattern, e))?;
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => found.push(path),
                Ok(_) => {}
                Err(e) => tracing::warn!("skipping unreadable path: {}", e),
            }
        }
    }
    Ok(found)
}
