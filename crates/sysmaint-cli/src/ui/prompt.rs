//! Interactive confirmation for warning and unsafe actions.

use crossterm::style::Stylize;
use std::io::{BufRead, Write};
use sysmaint_core::{Action, Confirm, Tier};

/// Asks `(y/N)` on a writer and reads the answer from a reader.
///
/// Anything other than `y`/`yes`, including end of input or a read error,
/// counts as "no".
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl<R, W> std::fmt::Debug for TerminalPrompt<R, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalPrompt").finish_non_exhaustive()
    }
}

impl TerminalPrompt<std::io::StdinLock<'static>, std::io::Stdout> {
    /// Prompt on the process terminal.
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    /// Prompt using arbitrary streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, action: &Action) -> std::io::Result<bool> {
        let label = match action.tier() {
            Tier::Unsafe => "UNSAFE:".bold().red(),
            _ => "WARNING:".bold().yellow(),
        };
        writeln!(self.output)?;
        writeln!(self.output, "  {label} {}", action.name())?;
        writeln!(self.output, "    $ {}", action.command())?;
        if let Some(reason) = action.reason() {
            writeln!(self.output, "    {}", reason.dark_grey())?;
        }
        write!(self.output, "  Continue? (y/N) ")?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            writeln!(self.output)?;
            return Ok(false);
        }
        let answer = answer.trim();
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalPrompt<R, W> {
    fn confirm(&mut self, action: &Action) -> bool {
        self.ask(action).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "prompt failed, treating as no");
            false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use sysmaint_core::CommandLine;

    fn warning_action() -> Action {
        Action::new(
            Tier::Warning,
            "Remove old kernels",
            CommandLine::new("apt-get", ["purge", "-y", "linux-image-5.10.0-20-generic"]),
            Some("removes old kernel packages: linux-image-5.10.0-20-generic".into()),
        )
        .unwrap()
    }

    fn answer(input: &str) -> (bool, String) {
        let mut out = Vec::new();
        let approved = TerminalPrompt::new(Cursor::new(input.as_bytes()), &mut out)
            .confirm(&warning_action());
        (approved, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_yes_answers() {
        assert!(answer("y\n").0);
        assert!(answer("YES\n").0);
        assert!(answer("  y  \n").0);
    }

    #[test]
    fn test_everything_else_is_no() {
        assert!(!answer("n\n").0);
        assert!(!answer("\n").0);
        assert!(!answer("yep\n").0);
        assert!(!answer("").0);
    }

    #[test]
    fn test_prompt_shows_command_and_reason() {
        let (_, shown) = answer("n\n");
        assert!(shown.contains("Remove old kernels"));
        assert!(shown.contains("$ apt-get purge -y linux-image-5.10.0-20-generic"));
        assert!(shown.contains("removes old kernel packages"));
        assert!(shown.contains("(y/N)"));
    }
}
