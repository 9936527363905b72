//! Command implementations
pub mod maintain;
