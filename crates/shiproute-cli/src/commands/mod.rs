// Module exports for CLI subcommands
//
// Each module handles one subcommand; main.rs parses arguments and dispatches
// to these handlers.

pub mod ports;
pub mod route;
pub mod ships;
