//! Shipping route CLI library.
//!
//! Subcommand handlers, terminal styling and output formatting for the
//! `shiproute-cli` binary.

pub mod commands;
pub mod output;
pub mod terminal;
