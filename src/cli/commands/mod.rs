//! CLI subcommand implementations

pub mod config;
pub mod remix;
pub mod styles;
