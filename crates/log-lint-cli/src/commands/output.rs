//! Shared output formatting for lint results.

use anyhow::Result;
use log_lint_core::{LintResult, Report, Severity, Violation, ViolationDiagnostic};

use crate::OutputFormat;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat, fail_on: Severity) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result, fail_on),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
        OutputFormat::Fancy => print_fancy(result),
    }
    Ok(())
}

fn print_text(result: &LintResult, fail_on: Severity) {
    print!("{}", Report::new(result, fail_on).format());
    println!();
    print_summary(result);
}

fn print_summary(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} element(s)\x1b[0m",
        summary_color, errors, warnings, infos, result.elements_checked
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for violation in &result.violations {
        println!("{violation}");
    }
}

fn print_fancy(result: &LintResult) {
    for violation in &result.violations {
        match std::fs::read_to_string(&violation.location.file) {
            Ok(content) => {
                let help = rationale(result, violation).map(|r| format!("because {r}"));
                let diagnostic = ViolationDiagnostic::new(violation, content, help);
                println!("{:?}", miette::Report::new(diagnostic));
            }
            Err(e) => {
                tracing::debug!("No snippet for {}: {e}", violation.location.file.display());
                println!("{violation}");
            }
        }
    }
    print_summary(result);
}

fn rationale<'a>(result: &'a LintResult, violation: &Violation) -> Option<&'a str> {
    result
        .rules
        .iter()
        .find(|s| s.name == violation.rule)
        .map(|s| s.rationale.as_str())
}
