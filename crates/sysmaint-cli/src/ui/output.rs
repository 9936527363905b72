//! Terminal implementation of the core `Reporter`.
//!
//! Execution is strictly sequential, so lines are written straight to
//! stdout/stderr as events arrive.

use super::theme::Theme;
use crossterm::style::Stylize;
use sysmaint_core::executor::Outcome;
use sysmaint_core::{Action, Reporter};

/// Styled console output for analysis and execution.
#[derive(Debug, Clone)]
pub struct Output {
    theme: Theme,
    verbose: bool,
}

impl Output {
    /// Create a new output handle. `verbose` enables [`Reporter::detail`] lines.
    pub fn new(verbose: bool) -> Self {
        Self {
            theme: Theme::default(),
            verbose,
        }
    }

    /// Print a block of pre-rendered text (the plan summary).
    pub fn block(&self, text: &str) {
        println!();
        print!("{text}");
    }

    fn outcome_line(&self, action: &Action, outcome: &Outcome) -> String {
        let theme = &self.theme;
        let name = action.name().with(theme.colors.action_name);
        match outcome {
            Outcome::Executed => format!(
                "  {} {name} {}",
                theme.icons.success.with(theme.colors.success),
                "done".with(theme.colors.success)
            ),
            Outcome::Skipped { reason } => format!(
                "  {} {name} {}",
                theme.icons.skipped.with(theme.colors.secondary),
                format!("skipped: {reason}").with(theme.colors.secondary)
            ),
            Outcome::Failed { reason } => format!(
                "  {} {name} {}",
                theme.icons.error.with(theme.colors.error),
                format!("FAILED: {reason}").with(theme.colors.error)
            ),
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new(false)
    }
}

impl Reporter for Output {
    fn section(&self, title: &str) {
        println!();
        println!("{}", title.with(self.theme.colors.header));
    }

    fn detail(&self, msg: &str) {
        if self.verbose {
            println!(
                "  {} {}",
                self.theme.icons.info.with(self.theme.colors.secondary),
                msg.with(self.theme.colors.secondary)
            );
        }
    }

    fn success(&self, msg: &str) {
        println!(
            "{} {}",
            self.theme.icons.success.with(self.theme.colors.success),
            msg.with(self.theme.colors.success)
        );
    }

    fn warning(&self, msg: &str) {
        eprintln!(
            "{} {}",
            self.theme.icons.warning.with(self.theme.colors.warning),
            msg.with(self.theme.colors.warning)
        );
    }

    fn running(&self, action: &Action) {
        println!(
            "  {} {} {}",
            self.theme.icons.active.with(self.theme.colors.active),
            action.name().with(self.theme.colors.action_name),
            format!("$ {}", action.command()).with(self.theme.colors.secondary)
        );
    }

    fn finished(&self, action: &Action, outcome: &Outcome) {
        println!("{}", self.outcome_line(action, outcome));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sysmaint_core::{CommandLine, Tier};

    fn action() -> Action {
        Action::new(Tier::Safe, "Clear package cache", CommandLine::new("apt-get", ["clean"]), None)
            .unwrap()
    }

    #[test]
    fn test_outcome_lines_mention_state() {
        let output = Output::new(false);
        let done = output.outcome_line(&action(), &Outcome::Executed);
        assert!(done.contains("Clear package cache"));
        assert!(done.contains("done"));

        let failed = output.outcome_line(
            &action(),
            &Outcome::Failed {
                reason: "exit status: 100".into(),
            },
        );
        assert!(failed.contains("FAILED: exit status: 100"));
    }

    #[test]
    fn test_reporter_calls_do_not_panic() {
        let output = Output::new(true);
        output.section("Clean analysis");
        output.detail("Running kernel 5.15.0-91-generic");
        output.running(&action());
        output.finished(
            &action(),
            &Outcome::Skipped {
                reason: "declined by operator".into(),
            },
        );
    }
}
