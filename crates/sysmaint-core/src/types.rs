//! Core data model: risk tiers, command lines and actions.

use std::fmt;

/// Risk classification of a maintenance action.
///
/// Ordering is meaningful: `Safe < Warning < Unsafe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Runs without confirmation.
    Safe,
    /// Needs approval unless skipped or auto-approved.
    Warning,
    /// Same policy as `Warning`, with its own flags.
    Unsafe,
}

impl Tier {
    /// All tiers in execution order.
    pub const ALL: [Tier; 3] = [Tier::Safe, Tier::Warning, Tier::Unsafe];

    /// Lowercase label used in logs and summaries.
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Safe => "safe",
            Tier::Warning => "warning",
            Tier::Unsafe => "unsafe",
        }
    }

    /// Whether actions of this tier must carry a reason.
    pub fn requires_reason(self) -> bool {
        self != Tier::Safe
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A program plus its ordered arguments.
///
/// Arguments are handed to the OS as a vector and are never re-parsed by a
/// shell. The `Display` form is only for humans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Executable name or path (e.g. `apt-get`).
    pub program: String,
    /// Arguments in order.
    pub args: Vec<String>,
}

impl CommandLine {
    /// Build a command line from a program and its arguments.
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&quote_word(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote_word(arg))?;
        }
        Ok(())
    }
}

fn quote_word(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_./:=+-".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

/// Errors raised when an action is rejected at enqueue time.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ActionError {
    /// A `Warning` or `Unsafe` action was given an empty reason.
    #[error("{tier} action '{name}' requires a reason")]
    MissingReason {
        /// Tier the action was enqueued under.
        tier: Tier,
        /// Label of the rejected action.
        name: String,
    },

    /// The command has no program to run.
    #[error("action '{0}' has an empty command")]
    EmptyCommand(String),
}

/// A single unit of maintenance work. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    name: String,
    command: CommandLine,
    tier: Tier,
    reason: Option<String>,
}

impl Action {
    /// Validate and build an action.
    ///
    /// A reason supplied for a `Safe` action is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::MissingReason`] when `tier` is not `Safe` and
    /// `reason` is blank, or [`ActionError::EmptyCommand`] when the program
    /// name is blank.
    pub fn new(
        tier: Tier,
        name: impl Into<String>,
        command: CommandLine,
        reason: Option<String>,
    ) -> Result<Self, ActionError> {
        let name = name.into();
        if command.program.trim().is_empty() {
            return Err(ActionError::EmptyCommand(name));
        }

        let reason = reason.filter(|r| !r.trim().is_empty());
        let reason = match (tier.requires_reason(), reason) {
            (true, None) => return Err(ActionError::MissingReason { tier, name }),
            (true, some) => some,
            (false, _) => None,
        };

        Ok(Self {
            name,
            command,
            tier,
            reason,
        })
    }

    /// Short human label.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The invocation this action performs.
    pub fn command(&self) -> &CommandLine {
        &self.command
    }

    /// Risk tier.
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Justification; always present for `Warning` and `Unsafe`.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}
