//! UI Module - terminal output concerns
//!
//! ```text
//! ┌─────────────┐
//! │   Command   │  maintain
//! └──────┬──────┘
//!        │ reports through
//!        ▼
//! ┌─────────────┐     ┌─────────────┐
//! │   Output    │     │   Prompt    │  Reporter / Confirm implementations
//! └──────┬──────┘     └──────┬──────┘
//!        │ styles with       │
//!        ▼                   ▼
//! ┌───────────────────────────────┐
//! │             Theme             │  Colors, icons, column widths
//! └───────────────────────────────┘
//! ```
//!
//! - [`theme`] - Colors, icons, and layout constants
//! - [`output`] - `Reporter` for analysis and live execution
//! - [`prompt`] - `(y/N)` confirmation for non-safe actions
//! - [`report`] - Column-aligned recap after execution

pub mod output;
pub mod prompt;
pub mod report;
pub mod theme;

pub use output::Output;
pub use prompt::TerminalPrompt;
pub use theme::Theme;
