//! Subcommand implementations.

pub mod calc;
pub mod content;
