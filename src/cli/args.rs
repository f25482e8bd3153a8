//! CLI argument definitions using clap
//!
//! Commands:
//! - planlens analyze --config <path> [--query <sql>]
//! - planlens narrate [--plan <path>] [--config <path>]
//! - planlens serve --config <path> [--port <n>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// planlens - query plan narration and alternative plan discovery
#[derive(Parser, Debug)]
#[command(name = "planlens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Find up to three distinct plans for a query and explain each
    Analyze {
        /// Path to configuration file
        #[arg(long, default_value = "./planlens.json")]
        config: PathBuf,

        /// Query text; read as {"query": ...} from stdin when omitted
        #[arg(long)]
        query: Option<String>,
    },

    /// Summarize and narrate one EXPLAIN (FORMAT JSON) document
    Narrate {
        /// Plan document; read from stdin when omitted
        #[arg(long)]
        plan: Option<PathBuf>,

        /// Configuration file supplying emphasis markers
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Serve analysis over HTTP
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./planlens.json")]
        config: PathBuf,

        /// Port override
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
