//! Subcommand implementations for the `j5` binary.

pub mod generate;
