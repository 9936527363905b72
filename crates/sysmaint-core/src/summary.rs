//! Plain-text rendering of a maintenance plan.

use crate::analysis::AnalysisReport;
use crate::executor::tier_title;
use crate::mode::{RunMode, TierPolicy};
use crate::registry::ActionRegistry;
use crate::types::Tier;
use std::fmt::Write;

/// Render the queued actions and the active mode.
///
/// Output depends only on the arguments, so identical inputs always render
/// identically.
pub fn render_summary(registry: &ActionRegistry, mode: &RunMode) -> String {
    render_summary_with(registry, mode, &AnalysisReport::default())
}

/// Like [`render_summary`], also listing analysis checks that degraded.
pub fn render_summary_with(
    registry: &ActionRegistry,
    mode: &RunMode,
    analysis: &AnalysisReport,
) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_summary(&mut out, registry, mode, analysis);
    out
}

fn write_summary(
    out: &mut String,
    registry: &ActionRegistry,
    mode: &RunMode,
    analysis: &AnalysisReport,
) -> std::fmt::Result {
    writeln!(out, "Maintenance plan")?;
    writeln!(
        out,
        "  mode:    {}",
        if mode.execute {
            "execute"
        } else {
            "dry run (analysis only)"
        }
    )?;
    writeln!(out, "  update:  {}", on_off(mode.update_enabled))?;
    writeln!(out, "  clean:   {}", on_off(mode.clean_enabled))?;

    for tier in Tier::ALL {
        let actions = registry.tier(tier);
        writeln!(out)?;
        if tier == Tier::Safe {
            writeln!(out, "{} actions ({})", tier_title(tier), actions.len())?;
        } else {
            writeln!(
                out,
                "{} actions ({}) - {}",
                tier_title(tier),
                actions.len(),
                policy_label(mode.policy(tier))
            )?;
        }

        if actions.is_empty() {
            writeln!(out, "  none")?;
            continue;
        }
        for (i, action) in actions.iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, action.name())?;
            writeln!(out, "     $ {}", action.command())?;
            if let Some(reason) = action.reason() {
                writeln!(out, "     reason: {reason}")?;
            }
        }
    }

    if !analysis.degraded.is_empty() {
        writeln!(out)?;
        writeln!(out, "Incomplete checks")?;
        for check in &analysis.degraded {
            writeln!(out, "  {}: {}", check.check, check.error)?;
        }
    }

    if !mode.execute {
        writeln!(out)?;
        writeln!(out, "No changes were made.")?;
        writeln!(out, "  --execute        run safe actions and prompt for the rest")?;
        writeln!(out, "  --do-warnings    approve warning actions without prompting")?;
        writeln!(out, "  --skip-warnings  never run warning actions")?;
        writeln!(out, "  --do-unsafe      approve unsafe actions without prompting")?;
        writeln!(out, "  --skip-unsafe    never run unsafe actions")?;
    }
    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "enabled" } else { "disabled" }
}

fn policy_label(policy: TierPolicy) -> &'static str {
    match policy {
        TierPolicy::Always => "runs without confirmation",
        TierPolicy::Skip => "will be skipped",
        TierPolicy::AutoApprove => "auto-approved",
        TierPolicy::Prompt => "confirmation required",
    }
}
