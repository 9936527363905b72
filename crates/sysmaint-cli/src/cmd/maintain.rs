//! Maintain command: analyse, summarise, then optionally execute.
use crate::Cli;
use crate::ui::{Output, TerminalPrompt, report};
use anyhow::{Context, Result};
use sysmaint_core::privilege::require_root;
use sysmaint_core::{
    ActionRegistry, Analyzer, Config, DpkgProbe, Executor, Journal, Reporter, SystemRunner,
    render_summary_with,
};

/// Run one maintenance pass as described by `cli`.
pub fn maintain(cli: &Cli) -> Result<()> {
    require_root()?;

    let config = Config::load(&cli.config).context("Failed to load configuration")?;
    let mode = cli.run_mode();
    let log_file = cli.log_file.clone().unwrap_or(config.log_file);
    let journal = Journal::new(&log_file);
    let output = Output::new(mode.verbose);

    tracing::debug!(?mode, log_file = %log_file.display(), "starting run");
    journal.info(format!(
        "Run started: update={}, clean={}, execute={}",
        mode.update_enabled, mode.clean_enabled, mode.execute
    ));

    let probe = DpkgProbe;
    let mut registry = ActionRegistry::new();
    let analysis = Analyzer::new(&probe, &output)
        .with_clean_config(config.clean)
        .verbose(mode.verbose)
        .run(&mode, &mut registry)
        .context("Failed to build maintenance plan")?;

    for check in &analysis.degraded {
        journal.warn(format!(
            "Check '{}' incomplete: {}",
            check.check, check.error
        ));
    }

    output.block(&render_summary_with(&registry, &mode, &analysis));

    let mut runner = SystemRunner;
    let mut prompt = TerminalPrompt::stdio();
    let outcome = Executor::new(mode, &mut runner, &mut prompt, &journal, &output).execute(&registry);

    report::print_report(&outcome);
    if mode.execute {
        if outcome.failed() > 0 {
            output.warning(&format!(
                "{} action(s) failed, see {}",
                outcome.failed(),
                log_file.display()
            ));
        } else {
            output.success("Maintenance complete");
        }
    }

    Ok(())
}
