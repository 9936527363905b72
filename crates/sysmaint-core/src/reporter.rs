//! Reporter trait for dependency injection
//!
//! This trait allows analysis and execution to report progress without
//! being coupled to a specific terminal implementation.

use crate::executor::Outcome;
use crate::types::Action;

/// Receives progress and status from analysis and execution.
pub trait Reporter {
    /// Indicates a new phase has started (e.g. "Analysis", "Warning actions").
    fn section(&self, title: &str);

    /// Extra diagnostic detail, shown only in verbose runs.
    fn detail(&self, msg: &str);

    /// Log a success message.
    fn success(&self, msg: &str);

    /// Log a warning message.
    fn warning(&self, msg: &str);

    /// An action is about to run.
    fn running(&self, action: &Action);

    /// An action reached its final state.
    fn finished(&self, action: &Action, outcome: &Outcome);
}

/// A no-op reporter for silent operations (e.g., testing).
#[derive(Debug, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn section(&self, _: &str) {}
    fn detail(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warning(&self, _: &str) {}
    fn running(&self, _: &Action) {}
    fn finished(&self, _: &Action, _: &Outcome) {}
}
