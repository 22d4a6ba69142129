//! Flight path CLI library.
//!
//! Subcommand handlers, terminal styling and output formatting for the
//! `flightpath` binary. The binary only parses arguments and dispatches.

pub mod commands;
pub mod output;
pub mod terminal;
