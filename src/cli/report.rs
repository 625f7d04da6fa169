use super::collect_html_files;
use super::lint::{load_config, validation_options};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use wcag_lint::{OutputFormat, generate_batch_report, validate_batch};

pub struct ReportArgs<'a> {
    pub files: &'a [PathBuf],
    pub format: OutputFormat,
    pub output: Option<&'a Path>,
    pub strict: bool,
    pub config: Option<&'a Path>,
}

pub fn run_report(args: ReportArgs<'_>) -> ExitCode {
    let paths = match collect_html_files(args.files) {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let search_dir = paths
        .first()
        .and_then(|p| p.parent())
        .unwrap_or(Path::new("."));
    let lint_config = match load_config(args.config, search_dir) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let options = match validation_options(lint_config.as_ref(), args.strict, &[]) {
        Ok(options) => options,
        Err(code) => return code,
    };

    let documents: Vec<(String, String)> = match paths
        .par_iter()
        .map(|path| {
            fs::read_to_string(path)
                .map(|html| (path.display().to_string(), html))
                .map_err(|e| format!("{}: {}", path.display(), e))
        })
        .collect::<Result<_, _>>()
    {
        Ok(documents) => documents,
        Err(e) => {
            eprintln!("Error reading {}", e);
            return ExitCode::from(2);
        }
    };

    let entries = validate_batch(&documents, options);
    let report = match generate_batch_report(&entries, args.format) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    match args.output {
        Some(output) => {
            if let Err(e) = fs::write(output, report) {
                eprintln!("Error writing {}: {}", output.display(), e);
                return ExitCode::from(2);
            }
            eprintln!(
                "Wrote {} report for {} document(s) to {}",
                args.format,
                entries.len(),
                output.display()
            );
        }
        None => print!("{}", report),
    }

    ExitCode::SUCCESS
}
