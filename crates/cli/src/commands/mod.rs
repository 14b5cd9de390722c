//! Subcommand implementations

pub mod create;
pub mod list;
