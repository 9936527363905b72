//! sysmaint core
//!
//! Classifies APT maintenance work into risk tiers and executes it under a
//! per-tier confirmation policy.
//!
//! # Architecture
//!
//! ```text
//! RunMode ─┐
//!          ▼
//! SystemProbe ──▶ Analyzer ──▶ ActionRegistry ──┬──▶ render_summary
//!                                               └──▶ Executor ──▶ Journal
//!                                                       │
//!                                          CommandRunner + Confirm
//! ```
//!
//! - **Read-only analysis**: [`Analyzer`] only inspects state through
//!   [`SystemProbe`]; a failed probe degrades to "no findings".
//! - **Typed actions**: an [`Action`] carries a [`CommandLine`] argument
//!   vector, never shell text, and a reason whenever its tier is not `Safe`.
//! - **Best-effort execution**: [`Executor`] runs tiers in order and keeps
//!   going after failures, journaling every transition.

pub mod analysis;
pub mod config;
pub mod executor;
pub mod journal;
pub mod kernel;
pub mod mode;
pub mod privilege;
pub mod probe;
pub mod registry;
pub mod reporter;
pub mod runner;
pub mod summary;
pub mod types;

pub use analysis::{AnalysisReport, Analyzer};
pub use config::Config;
pub use executor::{ExecutionReport, Executor, Outcome};
pub use journal::{Journal, Level};
pub use mode::{RunMode, TierPolicy};
pub use probe::{DpkgProbe, SystemProbe};
pub use registry::ActionRegistry;
pub use reporter::{NullReporter, Reporter};
pub use runner::{AlwaysApprove, AlwaysDeny, CommandRunner, Confirm, SystemRunner};
pub use summary::{render_summary, render_summary_with};
pub use types::{Action, ActionError, CommandLine, Tier};
