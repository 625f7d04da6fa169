use std::process::ExitCode;
use wcag_lint::docs::{CheckerDoc, all_checker_docs, get_checker_doc};

pub fn run_why(check: Option<String>, list: bool) -> ExitCode {
    use colored::Colorize;

    if list {
        eprintln!("{}", "Available checks:".bold());
        eprintln!();
        for doc in all_checker_docs() {
            eprintln!(
                "  {} {} {}",
                "▸".cyan(),
                doc.name.yellow(),
                format!("[{}]", doc.criteria.join(", ")).dimmed()
            );
            eprintln!("      {}", doc.description);
        }
        eprintln!();
        eprintln!(
            "Use {} to see detailed documentation.",
            "wcag-lint why <check-name>".cyan()
        );
        return ExitCode::SUCCESS;
    }

    let check_name = match check {
        Some(name) => name,
        None => {
            eprintln!("Usage: wcag-lint why <check-name>");
            eprintln!("       wcag-lint why --list");
            eprintln!();
            eprintln!("Use {} to see all available checks.", "--list".cyan());
            return ExitCode::from(1);
        }
    };

    match get_checker_doc(&check_name) {
        Some(doc) => {
            print_checker_doc(doc);
            ExitCode::SUCCESS
        }
        None => {
            eprintln!("{} Unknown check: {}", "Error:".red().bold(), check_name);
            eprintln!();
            eprintln!(
                "Use {} to see all available checks.",
                "wcag-lint why --list".cyan()
            );
            ExitCode::from(1)
        }
    }
}

fn print_checker_doc(doc: &CheckerDoc) {
    use colored::Colorize;

    eprintln!();
    eprintln!("{} {}", "Check:".bold(), doc.name.yellow());
    eprintln!("{} {}", "Criteria:".bold(), doc.criteria.join(", "));
    eprintln!("{} {}", "Severity:".bold(), doc.severity);
    eprintln!();
    eprintln!("{}", "Why:".bold());
    for line in doc.why.lines() {
        eprintln!("  {}", line);
    }
    eprintln!();
    eprintln!("{}", "Bad Example:".bold().red());
    eprintln!("{}", "─".repeat(60).dimmed());
    for line in doc.bad_example.lines() {
        eprintln!("  {}", line);
    }
    eprintln!("{}", "─".repeat(60).dimmed());
    eprintln!();
    eprintln!("{}", "Good Example:".bold().green());
    eprintln!("{}", "─".repeat(60).dimmed());
    for line in doc.good_example.lines() {
        eprintln!("  {}", line);
    }
    eprintln!("{}", "─".repeat(60).dimmed());

    if !doc.references.is_empty() {
        eprintln!();
        eprintln!("{}", "References:".bold());
        for reference in doc.references {
            eprintln!("  • {}", reference.cyan());
        }
    }
    eprintln!();
}
