//! Command execution and operator confirmation seams.

use crate::types::{Action, CommandLine};
use std::process::Command;

/// Errors raised while running a mutating command.
#[derive(thiserror::Error, Debug)]
pub enum RunError {
    /// The program could not be started.
    #[error("failed to start '{program}': {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },

    /// The program ran and exited unsuccessfully.
    #[error("'{program}' exited with {status}")]
    ExitStatus {
        /// Program that failed.
        program: String,
        /// Exit status description.
        status: String,
    },
}

/// Runs a command to completion.
pub trait CommandRunner {
    /// Run `command` and wait for it.
    ///
    /// # Errors
    ///
    /// Returns [`RunError`] if the command cannot start or exits non-zero.
    fn run(&mut self, command: &CommandLine) -> Result<(), RunError>;
}

/// Spawns commands directly (no shell) with the terminal's stdio attached.
/// No timeout is applied.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, command: &CommandLine) -> Result<(), RunError> {
        tracing::info!(%command, "running");
        let status = Command::new(&command.program)
            .args(&command.args)
            .status()
            .map_err(|source| RunError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(RunError::ExitStatus {
                program: command.program.clone(),
                status: status.to_string(),
            })
        }
    }
}

/// Asks the operator whether a non-safe action may run.
pub trait Confirm {
    /// `true` to run `action`, `false` to skip it.
    fn confirm(&mut self, action: &Action) -> bool;
}

/// Approves everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysApprove;

impl Confirm for AlwaysApprove {
    fn confirm(&mut self, _: &Action) -> bool {
        true
    }
}

/// Declines everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysDeny;

impl Confirm for AlwaysDeny {
    fn confirm(&mut self, _: &Action) -> bool {
        false
    }
}
