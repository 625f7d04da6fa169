mod cli;

use clap::Parser;
use cli::config::run_config;
use cli::lint::run_lint;
use cli::report::{ReportArgs, run_report};
use cli::why::run_why;
use cli::{Cli, Commands};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Log to stderr so reports on stdout stay machine-readable.
/// `RUST_LOG` takes precedence over `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "wcag_lint=debug" } else { "wcag_lint=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let mut cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command.take() else {
        return run_lint(cli);
    };

    match command {
        Commands::Config { command } => run_config(&command),
        Commands::Why { check, list } => run_why(check, list),
        Commands::Report {
            files,
            format,
            output,
            strict,
            config,
        } => run_report(ReportArgs {
            files: &files,
            format: format.into(),
            output: output.as_deref(),
            strict,
            config: config.as_deref(),
        }),
    }
}
