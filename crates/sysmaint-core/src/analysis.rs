//! Analysis engine.
//!
//! Inspects the system through a [`SystemProbe`] and fills an
//! [`ActionRegistry`]. Nothing here changes the machine. A failed probe only
//! empties the sub-check that needed it; the run continues with whatever
//! could be read.

use crate::config::CleanConfig;
use crate::kernel::{classify_removal, kernel_base, old_kernels};
use crate::mode::RunMode;
use crate::probe::{PackageSnapshot, ProbeError, SystemProbe};
use crate::registry::ActionRegistry;
use crate::reporter::Reporter;
use crate::types::{ActionError, CommandLine, Tier};

/// Name of the kernel retirement sub-check.
pub const CHECK_KERNELS: &str = "old kernels";
/// Name of the orphaned configuration sub-check.
pub const CHECK_ORPHANED_CONFIGS: &str = "orphaned configs";

/// A sub-check that could not read system state and reported nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegradedCheck {
    /// Which sub-check degraded.
    pub check: &'static str,
    /// Why.
    pub error: String,
}

/// Side information gathered during analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisReport {
    /// Sub-checks that fell back to "no findings".
    pub degraded: Vec<DegradedCheck>,
}

impl AnalysisReport {
    fn degrade(&mut self, check: &'static str, error: &ProbeError) {
        tracing::warn!(check, %error, "analysis check degraded");
        self.degraded.push(DegradedCheck {
            check,
            error: error.to_string(),
        });
    }
}

/// Queues maintenance actions from read-only inspection.
pub struct Analyzer<'a> {
    probe: &'a dyn SystemProbe,
    reporter: &'a dyn Reporter,
    clean: CleanConfig,
    verbose: bool,
}

impl std::fmt::Debug for Analyzer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("clean", &self.clean)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

impl<'a> Analyzer<'a> {
    /// Analyzer with every clean sub-check enabled.
    pub fn new(probe: &'a dyn SystemProbe, reporter: &'a dyn Reporter) -> Self {
        Self {
            probe,
            reporter,
            clean: CleanConfig::default(),
            verbose: false,
        }
    }

    /// Enable or disable individual clean sub-checks.
    pub fn with_clean_config(mut self, clean: CleanConfig) -> Self {
        self.clean = clean;
        self
    }

    /// Report diagnostic detail through [`Reporter::detail`].
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Run the analyses enabled in `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError`] only if an action built here fails validation,
    /// which indicates a bug rather than a system condition.
    pub fn run(
        &self,
        mode: &RunMode,
        registry: &mut ActionRegistry,
    ) -> Result<AnalysisReport, ActionError> {
        let mut report = AnalysisReport::default();
        if mode.update_enabled {
            self.analyze_update(registry)?;
        }
        if mode.clean_enabled {
            self.analyze_clean(registry, &mut report)?;
        }
        Ok(report)
    }

    /// Refresh and upgrade are always safe.
    fn analyze_update(&self, registry: &mut ActionRegistry) -> Result<(), ActionError> {
        self.reporter.section("Update analysis");
        registry.enqueue(
            Tier::Safe,
            "Refresh package index",
            CommandLine::new("apt-get", ["update"]),
            None,
        )?;
        registry.enqueue(
            Tier::Safe,
            "Upgrade installed packages",
            CommandLine::new("apt-get", ["upgrade", "-y"]),
            None,
        )?;
        Ok(())
    }

    fn analyze_clean(
        &self,
        registry: &mut ActionRegistry,
        report: &mut AnalysisReport,
    ) -> Result<(), ActionError> {
        self.reporter.section("Clean analysis");
        registry.enqueue(
            Tier::Safe,
            "Remove unused packages",
            CommandLine::new("apt-get", ["autoremove", "-y"]),
            None,
        )?;
        registry.enqueue(
            Tier::Safe,
            "Clear package cache",
            CommandLine::new("apt-get", ["clean"]),
            None,
        )?;
        registry.enqueue(
            Tier::Safe,
            "Purge packages marked for removal",
            CommandLine::new("apt-get", ["autoremove", "--purge", "-y"]),
            None,
        )?;

        if !self.clean.kernels && !self.clean.orphaned_configs {
            return Ok(());
        }

        let snapshot = match self.probe.package_snapshot() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                self.reporter
                    .warning(&format!("Could not read package state: {e}"));
                if self.clean.kernels {
                    report.degrade(CHECK_KERNELS, &e);
                }
                if self.clean.orphaned_configs {
                    report.degrade(CHECK_ORPHANED_CONFIGS, &e);
                }
                return Ok(());
            }
        };

        if self.clean.kernels {
            self.analyze_kernels(registry, &snapshot, report)?;
        }
        if self.clean.orphaned_configs {
            self.analyze_orphaned_configs(registry, &snapshot)?;
        }
        Ok(())
    }

    fn analyze_kernels(
        &self,
        registry: &mut ActionRegistry,
        snapshot: &PackageSnapshot,
        report: &mut AnalysisReport,
    ) -> Result<(), ActionError> {
        let current = match self.probe.running_kernel() {
            Ok(release) => release,
            Err(e) => {
                self.reporter
                    .warning(&format!("Could not determine running kernel: {e}"));
                report.degrade(CHECK_KERNELS, &e);
                return Ok(());
            }
        };

        let installed = snapshot.kernel_images();
        self.detail(&format!(
            "Running kernel {current} (base {})",
            kernel_base(&current)
        ));
        let old = old_kernels(&current, installed.iter().copied());
        tracing::debug!(current = %current, old = ?old, "kernel analysis");
        for name in &installed {
            let decision = if old.iter().any(|o| o == name) {
                "remove"
            } else {
                "keep (running)"
            };
            self.detail(&format!("Kernel image {name}: {decision}"));
        }

        let Some(verdict) = classify_removal(&current, &old) else {
            self.detail("No old kernels to remove");
            return Ok(());
        };

        if verdict.tier == Tier::Unsafe {
            self.reporter.warning(&format!(
                "Kernel removal escalated to unsafe: {}",
                verdict.reason
            ));
        }

        let mut args = vec!["purge".to_string(), "-y".to_string()];
        args.extend(old.iter().cloned());
        registry.enqueue(
            verdict.tier,
            "Remove old kernels",
            CommandLine::new("apt-get", args),
            Some(verdict.reason),
        )
    }

    fn analyze_orphaned_configs(
        &self,
        registry: &mut ActionRegistry,
        snapshot: &PackageSnapshot,
    ) -> Result<(), ActionError> {
        let orphaned = snapshot.residual_configs();
        for name in &orphaned {
            self.detail(&format!("Leftover configuration: {name}"));
        }
        if orphaned.is_empty() {
            self.detail("No orphaned configuration files");
            return Ok(());
        }

        let count = orphaned.len();
        let mut args = vec!["--purge".to_string()];
        args.extend(orphaned.iter().map(|name| (*name).to_string()));
        registry.enqueue(
            Tier::Warning,
            "Purge orphaned configuration files",
            CommandLine::new("dpkg", args),
            Some(format!(
                "{count} removed package{} still {} configuration files",
                if count == 1 { "" } else { "s" },
                if count == 1 { "has" } else { "have" },
            )),
        )
    }

    fn detail(&self, msg: &str) {
        if self.verbose {
            self.reporter.detail(msg);
        }
    }
}
