//! CLI module for planlens
//!
//! Provides command-line interface for:
//! - analyze: Alternative plans for one query
//! - narrate: Summary and narration of one plan document
//! - serve: HTTP analysis server

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{
    analyze, analyze_query, narrate, narrate_document, query_from_request, run, run_command, serve,
};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_request, read_request, write_error, write_response};
