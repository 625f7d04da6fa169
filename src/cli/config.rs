use clap::Subcommand;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use wcag_lint::config::{CONFIG_FILE_NAME, config_template};
use wcag_lint::{LintConfig, ValidationOptions};
use wcag_lint_common::CHECK_NAMES;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write a starter .wcag-lint.toml
    Init {
        /// Output path for the configuration file
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,

        /// Start with strict scoring (threshold 95)
        #[arg(long)]
        strict: bool,

        /// Check to switch off in the generated file (can be repeated)
        #[arg(long, value_name = "CHECK")]
        disable: Vec<String>,
    },
    /// Check a configuration file and show which checks it leaves enabled
    Validate {
        /// Path to the configuration file to validate
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        config: PathBuf,
    },
}

pub fn run_config(command: &ConfigCommands) -> ExitCode {
    match command {
        ConfigCommands::Init {
            output,
            force,
            strict,
            disable,
        } => run_init(output, *force, *strict, disable),
        ConfigCommands::Validate { config } => run_validate(config),
    }
}

fn run_init(output: &Path, force: bool, strict: bool, disable: &[String]) -> ExitCode {
    if let Some(unknown) = disable
        .iter()
        .find(|check| !CHECK_NAMES.contains(&check.as_str()))
    {
        eprintln!(
            "Error: unknown check '{}' (expected one of: {})",
            unknown,
            CHECK_NAMES.join(", ")
        );
        return ExitCode::from(2);
    }

    if output.exists() && !force {
        eprintln!(
            "Error: {} already exists. Use --force to overwrite.",
            output.display()
        );
        return ExitCode::from(1);
    }

    let disabled: Vec<&str> = disable.iter().map(String::as_str).collect();
    match fs::write(output, config_template(strict, &disabled)) {
        Ok(()) => {
            eprintln!("Created {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error writing {}: {}", output.display(), e);
            ExitCode::from(2)
        }
    }
}

fn run_validate(config_path: &Path) -> ExitCode {
    if !config_path.exists() {
        eprintln!("Error: {} not found", config_path.display());
        return ExitCode::from(2);
    }

    let problems = match LintConfig::validate_file(config_path) {
        Ok(problems) => problems,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };
    if !problems.is_empty() {
        eprintln!("{}:", config_path.display());
        for problem in &problems {
            eprintln!("  - {}", problem);
        }
        eprintln!("\nFound {} error(s)", problems.len());
        return ExitCode::from(1);
    }

    let options = match LintConfig::from_file(config_path) {
        Ok(config) => config.validation_options(),
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let enabled = enabled_checks(&options);
    if enabled.is_empty() {
        eprintln!(
            "{}: every check is disabled, so any document would pass",
            config_path.display()
        );
        return ExitCode::from(1);
    }

    eprintln!("{}: OK", config_path.display());
    eprintln!(
        "  checks: {} ({} of {})",
        enabled.join(", "),
        enabled.len(),
        CHECK_NAMES.len()
    );
    eprintln!("  valid at score >= {}", options.threshold());
    ExitCode::SUCCESS
}

/// Check names the options leave switched on, in checker order
fn enabled_checks(options: &ValidationOptions) -> Vec<&'static str> {
    CHECK_NAMES
        .iter()
        .copied()
        .filter(|check| options.is_enabled(check))
        .collect()
}
