//! Tiered execution engine.
//!
//! Runs every queued action at most once: all `Safe` actions first, then
//! `Warning`, then `Unsafe`, each tier in enqueue order. Every transition
//! (queued, decision, running, outcome) goes to the journal as it happens.
//! A failed action never stops the ones after it, and nothing is rolled back.

use crate::journal::Journal;
use crate::mode::{RunMode, TierPolicy};
use crate::registry::ActionRegistry;
use crate::reporter::Reporter;
use crate::runner::{CommandRunner, Confirm};
use crate::types::{Action, Tier};

/// Final state of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The command ran and exited successfully.
    Executed,
    /// The action was not run.
    Skipped {
        /// Why it was not run.
        reason: String,
    },
    /// The command could not start or exited non-zero.
    Failed {
        /// What went wrong.
        reason: String,
    },
}

impl Outcome {
    /// Lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Executed => "executed",
            Outcome::Skipped { .. } => "skipped",
            Outcome::Failed { .. } => "failed",
        }
    }
}

/// An action paired with what happened to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// The action as queued.
    pub action: Action,
    /// Its final state.
    pub outcome: Outcome,
}

/// Result of an execution pass, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    /// One entry per processed action.
    pub outcomes: Vec<ActionOutcome>,
}

impl ExecutionReport {
    /// Number of actions that ran successfully.
    pub fn executed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Executed))
    }

    /// Number of actions that were not run.
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped { .. }))
    }

    /// Number of actions that failed.
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Failed { .. }))
    }

    /// True when nothing was processed (dry run or empty plan).
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.outcome)).count()
    }
}

/// Decision taken before running an action.
enum Decision {
    Run(&'static str),
    Skip(String),
}

/// Executes an [`ActionRegistry`] under a [`RunMode`].
pub struct Executor<'a> {
    mode: RunMode,
    runner: &'a mut dyn CommandRunner,
    confirm: &'a mut dyn Confirm,
    journal: &'a Journal,
    reporter: &'a dyn Reporter,
}

impl std::fmt::Debug for Executor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("mode", &self.mode)
            .field("journal", &self.journal)
            .finish_non_exhaustive()
    }
}

impl<'a> Executor<'a> {
    /// Build an executor from its collaborators.
    pub fn new(
        mode: RunMode,
        runner: &'a mut dyn CommandRunner,
        confirm: &'a mut dyn Confirm,
        journal: &'a Journal,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            mode,
            runner,
            confirm,
            journal,
            reporter,
        }
    }

    /// Process every queued action.
    ///
    /// In dry-run mode nothing is invoked and the report is empty.
    pub fn execute(&mut self, registry: &ActionRegistry) -> ExecutionReport {
        let mut report = ExecutionReport::default();

        if !self.mode.execute {
            self.journal.info(format!(
                "Dry run: {} action(s) planned, nothing executed",
                registry.len()
            ));
            return report;
        }

        self.journal.info(format!(
            "Execution started: {} safe, {} warning, {} unsafe",
            registry.count_by_tier(Tier::Safe),
            registry.count_by_tier(Tier::Warning),
            registry.count_by_tier(Tier::Unsafe),
        ));

        for tier in Tier::ALL {
            let actions = registry.tier(tier);
            if actions.is_empty() {
                continue;
            }
            self.reporter.section(&format!(
                "{} actions ({})",
                tier_title(tier),
                self.mode.policy(tier).as_str()
            ));
            for action in actions {
                let outcome = self.process(action);
                report.outcomes.push(ActionOutcome {
                    action: action.clone(),
                    outcome,
                });
            }
        }

        self.journal.info(format!(
            "Execution finished: {} executed, {} skipped, {} failed",
            report.executed(),
            report.skipped(),
            report.failed()
        ));
        report
    }

    fn process(&mut self, action: &Action) -> Outcome {
        let tier = action.tier();
        self.journal.info(format!(
            "Queued {tier} action '{}': {}",
            action.name(),
            action.command()
        ));

        let decision = match self.mode.policy(tier) {
            TierPolicy::Always => Decision::Run("safe tier"),
            TierPolicy::AutoApprove => Decision::Run("auto-approved"),
            TierPolicy::Skip => Decision::Skip(format!("{tier} tier skipped")),
            TierPolicy::Prompt => {
                if self.confirm.confirm(action) {
                    Decision::Run("approved by operator")
                } else {
                    Decision::Skip("declined by operator".to_string())
                }
            }
        };

        let outcome = match decision {
            Decision::Skip(reason) => {
                self.journal
                    .warn(format!("Skipped '{}': {reason}", action.name()));
                tracing::info!(action = action.name(), %reason, "skipped");
                Outcome::Skipped { reason }
            }
            Decision::Run(why) => {
                self.journal
                    .info(format!("Running '{}' ({why}): {}", action.name(), action.command()));
                self.reporter.running(action);

                match self.runner.run(action.command()) {
                    Ok(()) => {
                        self.journal.info(format!("Executed '{}'", action.name()));
                        Outcome::Executed
                    }
                    Err(e) => {
                        let reason = e.to_string();
                        self.journal
                            .error(format!("Failed '{}': {reason}", action.name()));
                        tracing::warn!(action = action.name(), %reason, "action failed");
                        Outcome::Failed { reason }
                    }
                }
            }
        };

        self.reporter.finished(action, &outcome);
        outcome
    }
}

/// Capitalized tier name for headings.
pub fn tier_title(tier: Tier) -> &'static str {
    match tier {
        Tier::Safe => "Safe",
        Tier::Warning => "Warning",
        Tier::Unsafe => "Unsafe",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::NullReporter;
    use crate::runner::{AlwaysApprove, AlwaysDeny, RunError};
    use crate::types::CommandLine;
    use tempfile::TempDir;

    /// Records every command and fails those whose program is listed.
    #[derive(Default)]
    struct RecordingRunner {
        calls: Vec<String>,
        failing: Vec<&'static str>,
    }

    impl CommandRunner for RecordingRunner {
        fn run(&mut self, command: &CommandLine) -> Result<(), RunError> {
            self.calls.push(command.args.join(" "));
            if self.failing.contains(&command.program.as_str()) {
                return Err(RunError::ExitStatus {
                    program: command.program.clone(),
                    status: "exit status: 100".to_string(),
                });
            }
            Ok(())
        }
    }

    /// Counts prompts and answers from a script.
    struct ScriptedConfirm {
        answers: Vec<bool>,
        asked: Vec<String>,
    }

    impl Confirm for ScriptedConfirm {
        fn confirm(&mut self, action: &Action) -> bool {
            self.asked.push(action.name().to_string());
            if self.answers.is_empty() {
                false
            } else {
                self.answers.remove(0)
            }
        }
    }

    /// Records reporter events by name.
    #[derive(Default)]
    struct EventRecorder {
        events: std::cell::RefCell<Vec<String>>,
    }

    impl Reporter for EventRecorder {
        fn section(&self, title: &str) {
            self.events.borrow_mut().push(format!("section {title}"));
        }
        fn detail(&self, _: &str) {}
        fn success(&self, _: &str) {}
        fn warning(&self, _: &str) {}
        fn running(&self, action: &Action) {
            self.events.borrow_mut().push(format!("running {}", action.name()));
        }
        fn finished(&self, action: &Action, outcome: &Outcome) {
            self.events
                .borrow_mut()
                .push(format!("{} {}", outcome.as_str(), action.name()));
        }
    }

    fn sample_registry() -> ActionRegistry {
        let mut registry = ActionRegistry::new();
        registry
            .enqueue(
                Tier::Unsafe,
                "u1",
                CommandLine::new("apt-get", ["u1"]),
                Some("danger".into()),
            )
            .unwrap();
        registry
            .enqueue(
                Tier::Warning,
                "w1",
                CommandLine::new("apt-get", ["w1"]),
                Some("careful".into()),
            )
            .unwrap();
        registry
            .enqueue(Tier::Safe, "s1", CommandLine::new("apt-get", ["s1"]), None)
            .unwrap();
        registry
            .enqueue(
                Tier::Warning,
                "w2",
                CommandLine::new("dpkg", ["w2"]),
                Some("careful".into()),
            )
            .unwrap();
        registry
            .enqueue(Tier::Safe, "s2", CommandLine::new("apt-get", ["s2"]), None)
            .unwrap();
        registry
    }

    fn executing() -> RunMode {
        RunMode {
            execute: true,
            ..RunMode::default()
        }
    }

    fn run(
        mode: RunMode,
        registry: &ActionRegistry,
        runner: &mut RecordingRunner,
        confirm: &mut dyn Confirm,
        journal: &Journal,
    ) -> ExecutionReport {
        Executor::new(mode, runner, confirm, journal, &NullReporter).execute(registry)
    }

    #[test]
    fn test_dry_run_invokes_nothing() {
        let registry = sample_registry();
        let mut runner = RecordingRunner::default();
        let mut confirm = ScriptedConfirm {
            answers: vec![true; 5],
            asked: Vec::new(),
        };
        let mode = RunMode {
            auto_approve_warnings: true,
            auto_approve_unsafe: true,
            ..RunMode::default()
        };

        let report = run(mode, &registry, &mut runner, &mut confirm, &Journal::disabled());

        assert!(report.is_empty());
        assert!(runner.calls.is_empty());
        assert!(confirm.asked.is_empty());
    }

    #[test]
    fn test_tier_order_safe_warning_unsafe() {
        let registry = sample_registry();
        let mut runner = RecordingRunner::default();
        let mode = RunMode {
            auto_approve_warnings: true,
            auto_approve_unsafe: true,
            ..executing()
        };

        let report = run(mode, &registry, &mut runner, &mut AlwaysDeny, &Journal::disabled());

        assert_eq!(runner.calls, ["s1", "s2", "w1", "w2", "u1"]);
        assert_eq!(report.executed(), 5);
    }

    #[test]
    fn test_skip_warnings_beats_auto_approve() {
        let registry = sample_registry();
        let mut runner = RecordingRunner::default();
        let mode = RunMode {
            skip_warnings: true,
            auto_approve_warnings: true,
            auto_approve_unsafe: true,
            ..executing()
        };

        let report = run(mode, &registry, &mut runner, &mut AlwaysApprove, &Journal::disabled());

        assert_eq!(runner.calls, ["s1", "s2", "u1"]);
        for entry in &report.outcomes {
            if entry.action.tier() == Tier::Warning {
                assert!(matches!(entry.outcome, Outcome::Skipped { .. }));
            }
        }
        assert_eq!(report.skipped(), 2);
    }

    #[test]
    fn test_prompt_per_non_safe_action() {
        let registry = sample_registry();
        let mut runner = RecordingRunner::default();
        let mut confirm = ScriptedConfirm {
            answers: vec![true, false, true],
            asked: Vec::new(),
        };

        let report = run(executing(), &registry, &mut runner, &mut confirm, &Journal::disabled());

        assert_eq!(confirm.asked, ["w1", "w2", "u1"]);
        assert_eq!(runner.calls, ["s1", "s2", "w1", "u1"]);
        assert_eq!(report.executed(), 4);
        assert_eq!(report.skipped(), 1);
    }

    #[test]
    fn test_failure_does_not_stop_later_actions() {
        let registry = sample_registry();
        let mut runner = RecordingRunner {
            failing: vec!["apt-get"],
            ..RecordingRunner::default()
        };
        let mode = RunMode {
            auto_approve_warnings: true,
            auto_approve_unsafe: true,
            ..executing()
        };

        let report = run(mode, &registry, &mut runner, &mut AlwaysDeny, &Journal::disabled());

        assert_eq!(runner.calls.len(), 5);
        assert_eq!(report.failed(), 4);
        assert_eq!(report.executed(), 1);
        assert_eq!(report.outcomes[3].action.name(), "w2");
        assert_eq!(report.outcomes[3].outcome, Outcome::Executed);
    }

    #[test]
    fn test_skip_unsafe_logged_and_completes() {
        let dir = TempDir::new().unwrap();
        let journal = Journal::new(dir.path().join("sysmaint.log"));
        let mut registry = ActionRegistry::new();
        registry
            .enqueue(
                Tier::Unsafe,
                "Remove old kernels",
                CommandLine::new("apt-get", ["purge", "-y", "linux-image-5.15.0-91-generic"]),
                Some(crate::kernel::CURRENT_KERNEL_CONFLICT.to_string()),
            )
            .unwrap();
        let mut runner = RecordingRunner::default();
        let mode = RunMode {
            skip_unsafe: true,
            ..executing()
        };

        let report = run(mode, &registry, &mut runner, &mut AlwaysApprove, &journal);

        assert!(runner.calls.is_empty());
        assert_eq!(report.outcomes.len(), 1);
        assert_eq!(
            report.outcomes[0].outcome,
            Outcome::Skipped {
                reason: "unsafe tier skipped".to_string()
            }
        );

        let log = std::fs::read_to_string(dir.path().join("sysmaint.log")).unwrap();
        assert!(log.contains("[INFO] Queued unsafe action 'Remove old kernels'"));
        assert!(log.contains("[WARN] Skipped 'Remove old kernels': unsafe tier skipped"));
        assert!(log.contains("Execution finished: 0 executed, 1 skipped, 0 failed"));
    }

    #[test]
    fn test_journal_records_running_before_outcome() {
        let dir = TempDir::new().unwrap();
        let journal = Journal::new(dir.path().join("sysmaint.log"));
        let mut registry = ActionRegistry::new();
        registry
            .enqueue(Tier::Safe, "Clear package cache", CommandLine::new("apt-get", ["clean"]), None)
            .unwrap();
        let mut runner = RecordingRunner {
            failing: vec!["apt-get"],
            ..RecordingRunner::default()
        };

        run(executing(), &registry, &mut runner, &mut AlwaysDeny, &journal);

        let log = std::fs::read_to_string(dir.path().join("sysmaint.log")).unwrap();
        let running = log.find("Running 'Clear package cache'").unwrap();
        let failed = log.find("[ERROR] Failed 'Clear package cache'").unwrap();
        assert!(running < failed);
    }

    #[test]
    fn test_reporter_sees_each_action_start_and_finish() {
        let mut registry = ActionRegistry::new();
        registry
            .enqueue(Tier::Safe, "s1", CommandLine::new("apt-get", ["s1"]), None)
            .unwrap();
        registry
            .enqueue(
                Tier::Warning,
                "w1",
                CommandLine::new("dpkg", ["w1"]),
                Some("careful".into()),
            )
            .unwrap();
        let mut runner = RecordingRunner {
            failing: vec!["apt-get"],
            ..RecordingRunner::default()
        };
        let recorder = EventRecorder::default();

        Executor::new(
            executing(),
            &mut runner,
            &mut AlwaysDeny,
            &Journal::disabled(),
            &recorder,
        )
        .execute(&registry);

        assert_eq!(
            recorder.events.into_inner(),
            [
                "section Safe actions (always run)",
                "running s1",
                "failed s1",
                "section Warning actions (prompt)",
                "skipped w1",
            ]
        );
    }
}
