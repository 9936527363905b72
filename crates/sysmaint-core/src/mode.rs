//! Run configuration fixed at startup.

use crate::types::Tier;

/// Process-wide run configuration. Built once from the command line and
/// only read afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunMode {
    /// Run the update analysis.
    pub update_enabled: bool,
    /// Run the clean analysis.
    pub clean_enabled: bool,
    /// Perform actions instead of previewing them.
    pub execute: bool,
    /// Never run `Warning` actions.
    pub skip_warnings: bool,
    /// Never run `Unsafe` actions.
    pub skip_unsafe: bool,
    /// Run `Warning` actions without prompting.
    pub auto_approve_warnings: bool,
    /// Run `Unsafe` actions without prompting.
    pub auto_approve_unsafe: bool,
    /// Emit extra diagnostics during analysis.
    pub verbose: bool,
}

impl Default for RunMode {
    fn default() -> Self {
        Self {
            update_enabled: true,
            clean_enabled: true,
            execute: false,
            skip_warnings: false,
            skip_unsafe: false,
            auto_approve_warnings: false,
            auto_approve_unsafe: false,
            verbose: false,
        }
    }
}

/// What the executor does with a pending action of a given tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierPolicy {
    /// Run without asking (`Safe` tier).
    Always,
    /// Never run.
    Skip,
    /// Run without asking because the operator pre-approved the tier.
    AutoApprove,
    /// Ask the operator for each action.
    Prompt,
}

impl TierPolicy {
    /// Short label for summaries and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            TierPolicy::Always => "always run",
            TierPolicy::Skip => "skip",
            TierPolicy::AutoApprove => "auto-approve",
            TierPolicy::Prompt => "prompt",
        }
    }
}

impl RunMode {
    /// Confirmation policy for `tier`. Skip flags take priority over
    /// auto-approve flags.
    pub fn policy(&self, tier: Tier) -> TierPolicy {
        let (skip, approve) = match tier {
            Tier::Safe => return TierPolicy::Always,
            Tier::Warning => (self.skip_warnings, self.auto_approve_warnings),
            Tier::Unsafe => (self.skip_unsafe, self.auto_approve_unsafe),
        };

        if skip {
            TierPolicy::Skip
        } else if approve {
            TierPolicy::AutoApprove
        } else {
            TierPolicy::Prompt
        }
    }
}
