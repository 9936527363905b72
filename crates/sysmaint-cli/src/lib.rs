//! sysmaint - tiered update and cleanup for APT systems
//!
//! Analyses what an update or cleanup would do, sorts each action into a
//! risk tier and prints the plan. Nothing is changed unless `--execute` is
//! given.
//!
//! # Tiers
//!
//! - **safe**: index refresh, upgrades, autoremove, cache cleanup. Always run.
//! - **warning**: old kernel removal, purge of leftover configuration.
//!   Prompted unless `--do-warnings` or `--skip-warnings`.
//! - **unsafe**: anything that might touch the running kernel. Prompted
//!   unless `--do-unsafe` or `--skip-unsafe`.
#![allow(missing_docs)]
#![allow(clippy::missing_errors_doc)]

pub mod cmd;
pub mod ui;

use clap::Parser;
use std::path::PathBuf;
use sysmaint_core::RunMode;
use sysmaint_core::config::DEFAULT_CONFIG_PATH;

/// Version string derived from git tags by the build script.
pub const VERSION: &str = env!("SYSMAINT_VERSION");

#[derive(Debug, Parser)]
#[command(name = "sysmaint")]
#[command(version = VERSION, about = "Tiered update and cleanup for APT-based systems")]
#[command(after_help = "Without --update or --clean both analyses run.\n\
Without --execute nothing is changed.")]
pub struct Cli {
    /// Only analyse package updates
    #[arg(long)]
    pub update: bool,

    /// Only analyse disk cleanup
    #[arg(long)]
    pub clean: bool,

    /// Perform the planned actions (default: dry run)
    #[arg(long)]
    pub execute: bool,

    /// Never run warning-tier actions
    #[arg(long)]
    pub skip_warnings: bool,

    /// Never run unsafe-tier actions
    #[arg(long)]
    pub skip_unsafe: bool,

    /// Run warning-tier actions without prompting
    #[arg(long = "do-warnings")]
    pub do_warnings: bool,

    /// Run unsafe-tier actions without prompting
    #[arg(long = "do-unsafe")]
    pub do_unsafe: bool,

    /// Show diagnostic detail during analysis
    #[arg(short, long)]
    pub verbose: bool,

    /// Append the run journal to this file
    #[arg(long, env = "SYSMAINT_LOG_FILE", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Configuration file
    #[arg(
        long,
        env = "SYSMAINT_CONFIG",
        value_name = "PATH",
        default_value = DEFAULT_CONFIG_PATH
    )]
    pub config: PathBuf,
}

impl Cli {
    /// Freeze the parsed flags into a [`RunMode`].
    ///
    /// `--update` and `--clean` restrict analysis to one category; giving
    /// neither (or both) enables both.
    pub fn run_mode(&self) -> RunMode {
        RunMode {
            update_enabled: self.update || !self.clean,
            clean_enabled: self.clean || !self.update,
            execute: self.execute,
            skip_warnings: self.skip_warnings,
            skip_unsafe: self.skip_unsafe,
            auto_approve_warnings: self.do_warnings,
            auto_approve_unsafe: self.do_unsafe,
            verbose: self.verbose,
        }
    }
}
