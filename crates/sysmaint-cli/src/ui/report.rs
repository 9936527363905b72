//! Execution report formatting
//!
//! Column-aligned recap printed after an execution pass.

use super::theme::Theme;
use crossterm::style::Stylize;
use sysmaint_core::ExecutionReport;
use sysmaint_core::executor::Outcome;

/// Column headers for the report.
pub fn report_header() -> String {
    let theme = Theme::default();
    let header = format!(
        "  {:<nw$} {:<tw$} {}",
        "action",
        "tier",
        "outcome",
        nw = theme.layout.name_width,
        tw = theme.layout.tier_width,
    );
    header.dark_grey().to_string()
}

/// One row per processed action.
pub fn report_rows(report: &ExecutionReport) -> Vec<String> {
    let theme = Theme::default();

    report
        .outcomes
        .iter()
        .map(|entry| {
            let tier = entry.action.tier();
            let name_part = format!(
                "{:<width$}",
                entry.action.name(),
                width = theme.layout.name_width
            );
            let tier_part = format!("{:<width$}", tier.as_str(), width = theme.layout.tier_width);
            let (outcome_color, detail) = match &entry.outcome {
                Outcome::Executed => (theme.colors.success, String::new()),
                Outcome::Skipped { reason } => (theme.colors.secondary, format!(" ({reason})")),
                Outcome::Failed { reason } => (theme.colors.error, format!(" ({reason})")),
            };
            let outcome_part = format!(
                "{:<width$}",
                entry.outcome.as_str(),
                width = theme.layout.outcome_width
            );

            format!(
                "  {} {} {}{}",
                name_part.with(theme.colors.action_name),
                tier_part.with(theme.tier_color(tier)),
                outcome_part.with(outcome_color),
                detail.with(theme.colors.secondary)
            )
        })
        .collect()
}

/// Footer line with totals.
pub fn report_footer(report: &ExecutionReport) -> String {
    format!(
        "  {} executed, {} skipped, {} failed",
        report.executed(),
        report.skipped(),
        report.failed()
    )
}

/// Print the whole report to stdout.
pub fn print_report(report: &ExecutionReport) {
    if report.is_empty() {
        return;
    }
    println!();
    println!("{}", report_header());
    for row in report_rows(report) {
        println!("{row}");
    }
    println!();
    let footer = report_footer(report);
    if report.failed() > 0 {
        println!("{}", footer.red());
    } else {
        println!("{}", footer.dark_grey());
    }
}
