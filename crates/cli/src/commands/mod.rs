//! CLI subcommand implementations.

pub mod seed;
