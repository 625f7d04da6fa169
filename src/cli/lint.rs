use super::{Cli, collect_html_files};
use clap::CommandFactory;
use colored::control;
use rayon::prelude::*;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use wcag_lint::{
    BatchEntry, ColorMode, LintConfig, ParseError, Remediator, Reporter, ValidationOptions,
    ValidationResult, Validator, parse_file,
};

/// Result of checking a single file
enum FileResult {
    Checked {
        path: PathBuf,
        result: ValidationResult,
        fixes: Vec<String>,
    },
    ReadError {
        error: ParseError,
    },
}

/// Load the explicit configuration file, or search upwards from `search_dir`
pub(crate) fn load_config(
    explicit: Option<&Path>,
    search_dir: &Path,
) -> Result<Option<LintConfig>, ExitCode> {
    match explicit {
        Some(config_path) => match LintConfig::from_file(config_path) {
            Ok(cfg) => {
                tracing::debug!(path = %config_path.display(), "using configuration");
                Ok(Some(cfg))
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                Err(ExitCode::from(2))
            }
        },
        None => Ok(LintConfig::find_and_load(search_dir)),
    }
}

/// Merge configuration, `--strict` and `--disable` into validation options
pub(crate) fn validation_options(
    config: Option<&LintConfig>,
    strict: bool,
    disabled: &[String],
) -> Result<ValidationOptions, ExitCode> {
    let mut options = config
        .map(LintConfig::validation_options)
        .unwrap_or_default();
    if strict {
        options.strict_mode = true;
    }
    for name in disabled {
        if !options.set_enabled(name, false) {
            eprintln!("Error: unknown check '{}'", name);
            eprintln!("Use `wcag-lint why --list` to see all available checks.");
            return Err(ExitCode::from(2));
        }
    }
    Ok(options)
}

fn check_file(
    path: &Path,
    validator: &Validator,
    remediator: Option<&Remediator>,
) -> FileResult {
    let mut doc = match parse_file(path) {
        Ok(doc) => doc,
        Err(error) => return FileResult::ReadError { error },
    };

    let mut fixes = Vec::new();
    if let Some(remediator) = remediator {
        fixes = remediator.remediate_document(&mut doc);
        if !fixes.is_empty()
            && let Err(source) = std::fs::write(path, doc.to_html())
        {
            return FileResult::ReadError {
                error: ParseError::Io {
                    path: path.to_path_buf(),
                    source,
                },
            };
        }
    }

    FileResult::Checked {
        path: path.to_path_buf(),
        result: validator.validate_document(&doc),
        fixes,
    }
}

fn has_failures(results: &[&ValidationResult], no_fail_on_warnings: bool) -> bool {
    results.iter().any(|result| {
        if no_fail_on_warnings {
            !result.errors.is_empty()
        } else {
            result.has_issues()
        }
    })
}

pub fn run_lint(cli: Cli) -> ExitCode {
    // 1. Detect stdin mode and read content if applicable
    let stdin_mode = cli.files.len() == 1 && cli.files[0].as_os_str() == "-";
    let stdin_content = if stdin_mode {
        let mut content = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut content) {
            eprintln!("Error reading from stdin: {}", e);
            return ExitCode::from(2);
        }
        Some(content)
    } else {
        None
    };

    // 2. Resolve files (file mode only)
    let file_paths = if stdin_content.is_none() {
        if cli.files.is_empty() {
            let _ = Cli::command().print_help();
            eprintln!();
            return ExitCode::from(2);
        }
        match collect_html_files(&cli.files) {
            Ok(paths) => paths,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(2);
            }
        }
    } else {
        Vec::new()
    };

    // 3. Load configuration
    let search_dir = file_paths
        .first()
        .and_then(|p| p.parent())
        .unwrap_or(Path::new("."));
    let lint_config = match load_config(cli.config.as_deref(), search_dir) {
        Ok(config) => config,
        Err(code) => return code,
    };

    // 4. Configure color output (CLI flags take precedence over config)
    if cli.color {
        control::set_override(true);
    } else if cli.no_color {
        control::set_override(false);
    } else if let Some(ref config) = lint_config {
        match config.color_mode() {
            ColorMode::Always => control::set_override(true),
            ColorMode::Never => control::set_override(false),
            ColorMode::Auto => {}
        }
    }

    // 5. Build validator, remediator and reporter
    let options = match validation_options(lint_config.as_ref(), cli.strict, &cli.disable) {
        Ok(options) => options,
        Err(code) => return code,
    };
    let validator = Validator::with_options(options);
    let remediator = cli.fix.then(|| {
        Remediator::with_options(
            lint_config
                .as_ref()
                .map(LintConfig::remediation_options)
                .unwrap_or_default(),
        )
    });
    let color_config = lint_config.as_ref().map(|c| c.color).unwrap_or_default();
    let reporter = Reporter::with_colors(cli.format.into(), color_config);

    if cli.verbose {
        let names: Vec<_> = validator.checkers().iter().map(|c| c.name()).collect();
        eprintln!("Enabled checks: {}", names.join(", "));
    }

    // 6. Branch: stdin mode vs file mode
    if let Some(ref content) = stdin_content {
        if let Some(remediator) = remediator {
            let fixed = remediator.remediate(content);
            for fix in &fixed.fixes_applied {
                eprintln!("Applied: {}", fix);
            }
            print!("{}", fixed.content);
            let result = validator.validate(&fixed.content);
            return exit_code(&[&result], cli.no_fail_on_warnings);
        }

        let result = validator.validate(content);
        if let Err(e) = reporter.report(&result, "<stdin>") {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
        return exit_code(&[&result], cli.no_fail_on_warnings);
    }

    if cli.verbose {
        eprintln!("Checking {} file(s)", file_paths.len());
        for path in &file_paths {
            eprintln!("  - {}", path.display());
        }
    }

    let results: Vec<FileResult> = file_paths
        .par_iter()
        .map(|path| check_file(path, &validator, remediator.as_ref()))
        .collect();

    // Process results sequentially (for consistent output ordering)
    let mut entries: Vec<BatchEntry> = Vec::new();
    let mut has_fatal_error = false;

    for file_result in results {
        match file_result {
            FileResult::ReadError { error } => {
                eprintln!("Error: {}", error);
                has_fatal_error = true;
            }
            FileResult::Checked {
                path,
                result,
                fixes,
            } => {
                if !fixes.is_empty() {
                    eprintln!("Applied {} fix(es) to {}", fixes.len(), path.display());
                    if cli.verbose {
                        for fix in &fixes {
                            eprintln!("  - {}", fix);
                        }
                    }
                }
                entries.push(BatchEntry {
                    title: path.display().to_string(),
                    result,
                });
            }
        }
    }

    let output = match entries.as_slice() {
        [] => Ok(String::new()),
        [single] => reporter.format(&single.result, &single.title),
        _ => reporter.format_batch(&entries),
    };
    match output {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    }

    if has_fatal_error {
        return ExitCode::from(2);
    }

    let results: Vec<&ValidationResult> = entries.iter().map(|e| &e.result).collect();
    exit_code(&results, cli.no_fail_on_warnings)
}

fn exit_code(results: &[&ValidationResult], no_fail_on_warnings: bool) -> ExitCode {
    if has_failures(results, no_fail_on_warnings) {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}
